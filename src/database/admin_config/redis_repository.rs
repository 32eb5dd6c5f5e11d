use std::sync::Arc;

use anyhow::{Context, Result};
use redis::AsyncCommands;
use tracing::debug;

use super::{AdminConfig, AdminConfigRepository};
use crate::database::{REDIS_TIMEOUT, RedisDatabase};

const ADMIN_CONFIG_KEY: &str = "admin:config";

pub struct RedisAdminConfigRepository {
    redis: Arc<RedisDatabase>,
}

impl RedisAdminConfigRepository {
    pub fn new(redis: Arc<RedisDatabase>) -> Self {
        Self { redis }
    }
}

#[async_trait::async_trait]
impl AdminConfigRepository for RedisAdminConfigRepository {
    async fn get_admin_config(&self) -> Result<Option<AdminConfig>> {
        let mut conn = self.redis.connection.clone();

        let raw: Option<String> = tokio::time::timeout(REDIS_TIMEOUT, conn.get(ADMIN_CONFIG_KEY))
            .await
            .context("Timed out reading admin config")?
            .context("Failed to read admin config")?;

        let Some(raw) = raw else {
            debug!("no admin config stored under {}", ADMIN_CONFIG_KEY);
            return Ok(None);
        };

        let config = serde_json::from_str::<AdminConfig>(&raw)
            .context("Stored admin config is not valid JSON")?;

        Ok(Some(config))
    }

    async fn health_check(&self) -> Result<f64> {
        self.redis.ping().await
    }
}
