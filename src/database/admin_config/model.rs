use anyhow::Result;
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// the admin config the frontend persists. only the parts this api reads are modelled, serde
/// ignores the rest of the document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminConfig {
    pub site: SiteConfig,
    pub users: Vec<UserEntry>,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_name: String,
    /// base address saved from the admin panel, e.g. https://tv.example.com
    pub site_base: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Owner,
    Admin,
    #[default]
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub banned: bool,
}

/// settings for the feed a third party client subscribes to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedConfig {
    pub enable_auth: bool,
    pub token: Option<String>,
}

impl AdminConfig {
    pub fn find_user(&self, username: &str) -> Option<&UserEntry> {
        self.users.iter().find(|u| u.username == username)
    }

    /// the persisted base address, empty strings count as unset
    pub fn site_base(&self) -> Option<&str> {
        self.site.site_base.as_deref().filter(|s| !s.is_empty())
    }

    /// token to append to the feed url, only when auth is switched on and a token exists
    pub fn feed_token(&self) -> Option<&str> {
        if !self.feed.enable_auth {
            return None;
        }
        self.feed.token.as_deref().filter(|t| !t.is_empty())
    }
}

pub type DynAdminConfigRepository = Arc<dyn AdminConfigRepository + Send + Sync>;

#[automock]
#[async_trait::async_trait]
pub trait AdminConfigRepository {
    /// None when nothing has been saved yet
    async fn get_admin_config(&self) -> Result<Option<AdminConfig>>;
    /// round trip to the store in milliseconds
    async fn health_check(&self) -> Result<f64>;
}
