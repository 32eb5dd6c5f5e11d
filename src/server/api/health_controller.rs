use axum::Extension;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;
use tracing::error;

use crate::logger::Logger;
use crate::server::dtos::health_dto::{
    HealthResponse, HealthStatus, ServiceHealthDetails, StoreHealth,
};
use crate::server::services::AppServices;
use crate::server::utils::response_utils::no_store_json;
use crate::server::{get_app_version, get_uptime_seconds};

/// health endpoint - only the config store is checked, lookups to the outside world aren't
pub async fn health_endpoint(
    Extension(services): Extension<AppServices>,
) -> Response {
    let store_health = check_store_health(&services).await;

    let overall_status = store_health.status;

    let response = HealthResponse {
        status: overall_status,
        timestamp: Utc::now(),
        uptime_seconds: get_uptime_seconds(),
        version: get_app_version().to_string(),
        environment: Logger::environment_name(services.config.cargo_env).to_string(),
        services: ServiceHealthDetails {
            store: store_health,
        },
    };

    let http_status = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    no_store_json(http_status, response)
}

async fn check_store_health(services: &AppServices) -> StoreHealth {
    match services.admin_config.health_check().await {
        Ok(response_time) => StoreHealth {
            status: HealthStatus::Healthy,
            response_time_ms: response_time,
        },
        Err(e) => {
            error!("Store health check failed: {}", e);
            StoreHealth {
                status: HealthStatus::Unhealthy,
                response_time_ms: 0.0,
            }
        }
    }
}
