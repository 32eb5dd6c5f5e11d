use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::{
    config::AppConfig,
    database::{AdminConfig, DynAdminConfigRepository, RedisAdminConfigRepository, RedisDatabase},
    server::{
        services::{
            network_services::NetworkService, permission_services::PermissionService,
            subscription_services::SubscriptionService,
        },
        utils::signature_utils::SignatureUtil,
    },
};

use super::{
    network_services::DynNetworkService, permission_services::DynPermissionService,
    subscription_services::DynSubscriptionService,
};

/// everything the handlers need, cloned into each request through an Extension
#[derive(Clone)]
pub struct AppServices {
    pub signature_util: Arc<SignatureUtil>,
    pub admin_config: DynAdminConfigRepository,
    pub permissions: DynPermissionService,
    pub network: DynNetworkService,
    pub subscriptions: DynSubscriptionService,
    pub config: Arc<AppConfig>,
}

impl AppServices {
    pub fn new(redis_db: RedisDatabase, config: Arc<AppConfig>) -> Self {
        info!("starting services...");

        let signature_util = Arc::new(SignatureUtil::new(config.auth_secret.clone()));

        let http = reqwest::Client::builder()
            .user_agent(concat!("feedhub-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let admin_config = Arc::new(RedisAdminConfigRepository::new(Arc::new(redis_db)))
            as DynAdminConfigRepository;

        let permissions = Arc::new(PermissionService::new(
            admin_config.clone(),
            config.owner_username.clone(),
            config.admin_usernames(),
        )) as DynPermissionService;

        let network = Arc::new(NetworkService::new(
            http.clone(),
            Duration::from_secs(config.ip_probe_timeout_secs),
        )) as DynNetworkService;

        let subscriptions = Arc::new(SubscriptionService::new(
            http,
            Duration::from_secs(config.subscription_timeout_secs),
        )) as DynSubscriptionService;

        Self {
            signature_util,
            admin_config,
            permissions,
            network,
            subscriptions,
            config,
        }
    }

    /// persisted admin config, a broken or empty store just means "nothing persisted"
    pub async fn load_admin_config(&self) -> Option<AdminConfig> {
        match self.admin_config.get_admin_config().await {
            Ok(admin_config) => admin_config,
            Err(e) => {
                warn!("failed to load admin config: {:#}", e);
                None
            }
        }
    }
}
