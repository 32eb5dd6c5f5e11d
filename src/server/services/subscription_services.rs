use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::server::error::{AppResult, Error};

pub const INVALID_JSON_MESSAGE: &str = "subscription content is not valid JSON";

pub type DynSubscriptionService = Arc<dyn SubscriptionServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait SubscriptionServiceTrait {
    /// downloads a subscription document. the parsing into sites/lives happens elsewhere
    async fn fetch_document(&self, url: &str) -> AppResult<Value>;
}

pub struct SubscriptionService {
    http: reqwest::Client,
    timeout: Duration,
}

impl SubscriptionService {
    pub fn new(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }
}

fn invalid_json() -> Error {
    Error::InvalidContent(INVALID_JSON_MESSAGE.to_string())
}

#[async_trait]
impl SubscriptionServiceTrait for SubscriptionService {
    async fn fetch_document(&self, url: &str) -> AppResult<Value> {
        info!("fetching subscription from {}", url);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json, text/plain, */*")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!("subscription request failed: {}", e);
                Error::UpstreamUnavailable(format!("failed to fetch subscription: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "failed to fetch subscription: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        debug!("subscription content-type: {:?}", content_type);

        // declared json is decoded directly, anything else gets a chance as json text
        if content_type.contains("json") {
            return response.json::<Value>().await.map_err(|e| {
                if e.is_decode() {
                    invalid_json()
                } else {
                    Error::UpstreamUnavailable(format!("failed to read subscription: {}", e))
                }
            });
        }

        let body = response.text().await.map_err(|e| {
            Error::UpstreamUnavailable(format!("failed to read subscription: {}", e))
        })?;

        serde_json::from_str::<Value>(&body).map_err(|e| {
            debug!("subscription body is not json: {}", e);
            invalid_json()
        })
    }
}
