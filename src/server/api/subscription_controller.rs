use axum::{Router, routing::post};
use tracing::{error, info};

use crate::server::{
    dtos::subscription_dto::{ParseSubscriptionRequest, ParsedSubscription},
    error::{AppResult, Error},
    extractors::{AdminAuthentication, ValidatedJson},
    utils::{response_utils::NoStoreJson, subscription_parser::parse_subscription},
};

pub struct SubscriptionController;

impl SubscriptionController {
    pub fn app() -> Router {
        Router::new().route("/parse", post(Self::parse))
    }

    async fn parse(
        AdminAuthentication(auth_info, _, services): AdminAuthentication,
        ValidatedJson(body): ValidatedJson<ParseSubscriptionRequest>,
    ) -> AppResult<NoStoreJson<ParsedSubscription>> {
        let url = body.url.trim();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::BadRequest("invalid url format".to_string()));
        }

        info!("{} is importing subscription {}", auth_info.username, url);

        let parsed = services
            .subscriptions
            .fetch_document(url)
            .await
            .and_then(|document| parse_subscription(&document));

        match parsed {
            Ok(parsed) => {
                metrics::counter!("subscription_parse_total").increment(1);
                info!(
                    "subscription {} gave {} sites and {} lives",
                    url,
                    parsed.sites.len(),
                    parsed.lives.len()
                );
                Ok(NoStoreJson(parsed))
            }
            Err(e) => {
                metrics::counter!("subscription_parse_failures_total").increment(1);
                error!("subscription {} failed: {}", url, e);
                Err(e)
            }
        }
    }
}
