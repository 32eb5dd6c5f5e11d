use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;

use tracing::info;

use feedhub_api::{AppConfig, ApplicationServer, Logger, RedisDatabase};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Arc::new(AppConfig::parse());

    // guards are kept alive to flush logs and maintain the sentry connection
    let _guards = Logger::init(&config);

    info!("logger and env prepped...");

    info!("connecting to redis...");

    let redis_db = RedisDatabase::connect(&config.redis_url)
        .await
        .context("where is the redis connection!!")?;

    info!("redis connection ok, starting server...");

    ApplicationServer::serve(config, redis_db)
        .await
        .context("server failed to start")?;

    Ok(())
}
