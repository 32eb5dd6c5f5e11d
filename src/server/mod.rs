pub mod api;
pub mod dtos;
pub mod error;
pub mod extractors;
pub mod services;
pub mod utils;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{
    Extension, Router, ServiceExt,
    extract::Request,
    http::{HeaderValue, Method, header},
    routing::get,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::Lazy;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    normalize_path::NormalizePathLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    config::AppConfig,
    database::RedisDatabase,
    server::{
        api::{
            feed_controller::FeedController, health_controller::health_endpoint,
            network_controller::NetworkController,
            subscription_controller::SubscriptionController,
        },
        services::AppServices,
    },
};

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

pub fn get_app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn get_uptime_seconds() -> u64 {
    START_TIME.elapsed().as_secs()
}

pub struct ApplicationServer;

impl ApplicationServer {
    pub async fn serve(config: Arc<AppConfig>, redis_db: RedisDatabase) -> anyhow::Result<()> {
        Lazy::force(&START_TIME);

        let services = AppServices::new(redis_db, config.clone());

        let metrics_handle = PrometheusBuilder::new()
            .install_recorder()
            .context("could not install the prometheus recorder")?;

        let router = Self::router(services).route(
            "/metrics",
            get(move || std::future::ready(metrics_handle.render())),
        );

        // /api/feed/url/ and /api/feed/url are the same thing
        let app = NormalizePathLayer::trim_trailing_slash().layer(router);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("could not bind to {}", addr))?;

        info!("routes initialized, listening on {}", addr);

        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .context("error while starting server")?;

        Ok(())
    }

    /// every route minus /metrics, which needs the global recorder
    pub fn router(services: AppServices) -> Router {
        let cors = Self::cors_layer(&services.config.cors_origin);

        Router::new()
            .route("/health", get(health_endpoint))
            .nest("/api/network", NetworkController::app())
            .nest("/api/feed", FeedController::app())
            .nest("/api/admin/subscription", SubscriptionController::app())
            .layer(Extension(services))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    // * for everything, otherwise a comma separated list of origins that may send the cookie
    fn cors_layer(cors_origin: &str) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        if cors_origin.trim() == "*" {
            return layer.allow_origin(AllowOrigin::any());
        }

        let origins: Vec<HeaderValue> = cors_origin
            .split(',')
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| origin.parse().ok())
            .collect();

        layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }

    async fn shutdown_signal() {
        if let Err(e) = tokio::signal::ctrl_c().await {
            // without a signal handler we just run until killed
            tracing::error!("failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("shutdown signal received, draining connections...");
    }
}
