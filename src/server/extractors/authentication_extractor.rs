use axum::Extension;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::server::error::Error;
use crate::server::services::AppServices;
use crate::server::services::permission_services::Permission;
use crate::server::utils::signature_utils::SignatureUtil;

pub const AUTH_COOKIE: &str = "auth";

/// contents of the `auth` cookie, stored as percent encoded JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthInfo {
    pub username: String,
    pub expiry: i64,
    pub signature: String,
}

impl AuthInfo {
    /// signed cookie for `username` valid for `hours`, what the frontend would issue
    pub fn issue(signature_util: &SignatureUtil, username: &str, hours: i64) -> Self {
        let expiry = SignatureUtil::generate_expiry(hours);
        Self {
            username: username.to_string(),
            expiry,
            signature: signature_util.generate_signature(username, expiry),
        }
    }

    pub fn to_cookie_value(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        urlencoding::encode(&json).into_owned()
    }

    pub fn from_cookie_value(raw: &str) -> Option<Self> {
        let decoded = urlencoding::decode(raw).ok()?;
        serde_json::from_str(&decoded).ok()
    }
}

/// any signed in user
pub struct Authentication(pub AuthInfo, pub AppServices);

/// owner or admin, everyone else gets a 403
pub struct AdminAuthentication(pub AuthInfo, pub Permission, pub AppServices);

impl<S> FromRequestParts<S> for Authentication
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(services): Extension<AppServices> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|err| Error::InternalServerErrorWithContext(err.to_string()))?;

        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(AUTH_COOKIE) else {
            debug!("no auth cookie on request to {}", parts.uri.path());
            return Err(Error::Unauthorized);
        };

        let auth_info = AuthInfo::from_cookie_value(cookie.value()).ok_or_else(|| {
            debug!("auth cookie is not valid JSON");
            Error::Unauthorized
        })?;

        if !services.signature_util.verify_signature(
            &auth_info.username,
            auth_info.expiry,
            &auth_info.signature,
        ) {
            warn!(
                "auth cookie signature invalid or expired for {}",
                auth_info.username
            );
            return Err(Error::Unauthorized);
        }

        Ok(Authentication(auth_info, services))
    }
}

impl<S> FromRequestParts<S> for AdminAuthentication
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Authentication(auth_info, services) =
            Authentication::from_request_parts(parts, state).await?;

        let permission = services
            .permissions
            .check_permission(&auth_info.username)
            .await;

        if !permission.is_admin() {
            warn!("{} tried to reach {}", auth_info.username, parts.uri.path());
            return Err(Error::Forbidden("admin permission required".to_string()));
        }

        Ok(AdminAuthentication(auth_info, permission, services))
    }
}
