use std::time::{Duration, Instant};

use anyhow::Context;
use redis::Client;
use redis::aio::MultiplexedConnection;
use tracing::info;

/// permission checks sit on the request path, a dead redis must not hang them
pub const REDIS_TIMEOUT: Duration = Duration::from_secs(2);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct RedisDatabase {
    pub connection: MultiplexedConnection,
}

impl RedisDatabase {
    pub async fn connect(connection_string: &str) -> anyhow::Result<Self> {
        let client = Client::open(connection_string).context("Failed to create Redis client")?;

        let connection = tokio::time::timeout(
            CONNECT_TIMEOUT,
            client.get_multiplexed_tokio_connection(),
        )
        .await
        .context("Timed out connecting to Redis")?
        .context("Failed to connect to Redis database")?;

        info!("Redis connection established");

        Ok(Self { connection })
    }

    /// PING round trip in milliseconds
    pub async fn ping(&self) -> anyhow::Result<f64> {
        let start = Instant::now();

        let mut conn = self.connection.clone();
        let _: String = tokio::time::timeout(REDIS_TIMEOUT, redis::cmd("PING").query_async(&mut conn))
            .await
            .context("Redis PING timed out")?
            .context("Redis did not answer PING")?;

        Ok(start.elapsed().as_secs_f64() * 1000.0)
    }
}
