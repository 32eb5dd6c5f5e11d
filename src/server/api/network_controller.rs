use std::net::SocketAddr;

use axum::{Router, routing::get};
use tracing::debug;

use crate::database::AdminConfig;
use crate::server::{
    dtos::network_dto::{NetworkInfoResponse, ProbeStatus, SuggestedUrls},
    error::AppResult,
    extractors::{AdminAuthentication, RequestOrigin},
    services::AppServices,
    utils::{
        address_utils::{ExecutionContext, host_of, is_local_network, resolve_base_url},
        response_utils::NoStoreJson,
    },
};

const LOCAL_ONLY_HINT: &str = "this address is only reachable from your local network, set \
SITE_BASE or the site address in the admin panel so remote clients can connect";

pub struct NetworkController;

impl NetworkController {
    pub fn app() -> Router {
        Router::new().route("/info", get(Self::network_info))
    }

    /// the base url clients should use, resolved from env, the admin config and the caller
    pub fn resolved_base_url(
        services: &AppServices,
        admin_config: Option<&AdminConfig>,
        caller_origin: Option<&str>,
    ) -> String {
        resolve_base_url(
            caller_origin,
            admin_config.and_then(|c| c.site_base()),
            services.config.site_base.as_deref(),
            &ExecutionContext::Server,
        )
    }

    async fn network_info(
        AdminAuthentication(auth_info, _, services): AdminAuthentication,
        RequestOrigin(origin): RequestOrigin,
    ) -> AppResult<NoStoreJson<NetworkInfoResponse>> {
        debug!("network info requested by {}", auth_info.username);

        let port = services.config.advertised_port();
        let admin_config = services.load_admin_config().await;
        let base_url =
            Self::resolved_base_url(&services, admin_config.as_ref(), origin.as_deref());

        // lookups run one service at a time, the local interface scan doesn't wait on them
        let (local_ip, public_ip) =
            tokio::join!(services.network.local_ip(), services.network.public_ip());

        let is_local = host_of(&base_url)
            .map(|host| is_local_network(&host))
            .unwrap_or(false);

        let response = NetworkInfoResponse {
            local_ip: local_ip.map(|ip| ip.to_string()),
            public_ip: public_ip.map(|ip| ip.to_string()),
            public_ip_status: if public_ip.is_some() {
                ProbeStatus::Ok
            } else {
                ProbeStatus::Unavailable
            },
            port,
            base_url,
            is_local_network: is_local,
            suggested_urls: SuggestedUrls {
                local: local_ip.map(|ip| format!("http://{}", SocketAddr::new(ip, port))),
                public: public_ip.map(|ip| format!("http://{}", SocketAddr::new(ip, port))),
            },
            hint: is_local.then(|| LOCAL_ONLY_HINT.to_string()),
        };

        Ok(NoStoreJson(response))
    }
}
