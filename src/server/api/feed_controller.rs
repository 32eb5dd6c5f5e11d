use axum::{Router, extract::Query, routing::get};
use tracing::{debug, warn};

use crate::server::{
    api::network_controller::NetworkController,
    dtos::feed_dto::{FeedFormat, FeedUrlQuery, FeedUrlResponse},
    error::{AppResult, Error},
    extractors::{Authentication, RequestOrigin},
    utils::{
        address_utils::{host_of, is_local_network},
        response_utils::NoStoreJson,
    },
};

/// path the third party client pulls its config from
const FEED_PATH: &str = "/api/tvbox";

pub struct FeedController;

impl FeedController {
    pub fn app() -> Router {
        Router::new().route("/url", get(Self::feed_url))
    }

    /// `<base>/api/tvbox?format=<format>[&token=<token>]`
    pub fn build_feed_url(base_url: &str, format: FeedFormat, token: Option<&str>) -> String {
        let mut url = format!(
            "{}{}?format={}",
            base_url.trim_end_matches('/'),
            FEED_PATH,
            format.as_str()
        );

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            url.push_str("&token=");
            url.push_str(&urlencoding::encode(token));
        }

        url
    }

    async fn feed_url(
        Authentication(auth_info, services): Authentication,
        RequestOrigin(origin): RequestOrigin,
        Query(params): Query<FeedUrlQuery>,
    ) -> AppResult<NoStoreJson<FeedUrlResponse>> {
        let format = match params.format.as_deref() {
            None | Some("") => FeedFormat::default(),
            Some(raw) => raw.parse::<FeedFormat>().map_err(Error::BadRequest)?,
        };

        let admin_config = services.load_admin_config().await;

        let base_url =
            NetworkController::resolved_base_url(&services, admin_config.as_ref(), origin.as_deref());

        let token = admin_config.as_ref().and_then(|c| c.feed_token());
        if admin_config.as_ref().is_some_and(|c| c.feed.enable_auth) && token.is_none() {
            warn!("feed auth is enabled but no token is configured, handing out an open url");
        }

        let url = Self::build_feed_url(&base_url, format, token);
        debug!("feed url for {}: {}", auth_info.username, base_url);

        let is_local = host_of(&base_url)
            .map(|host| is_local_network(&host))
            .unwrap_or(false);

        Ok(NoStoreJson(FeedUrlResponse {
            url,
            base_url,
            format,
            token_protected: token.is_some(),
            is_local_network: is_local,
        }))
    }
}
