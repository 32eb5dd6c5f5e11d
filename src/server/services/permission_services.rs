use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use tracing::{debug, warn};

use crate::database::{DynAdminConfigRepository, UserRole};

pub type DynPermissionService = Arc<dyn PermissionServiceTrait + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Owner,
    Admin,
    Unauthorized,
}

impl Permission {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

#[automock]
#[async_trait]
pub trait PermissionServiceTrait {
    async fn check_permission(&self, username: &str) -> Permission;
}

/// owner comes from env, admins from the persisted user list. when the store can't answer the
/// static admin list from config is used instead
pub struct PermissionService {
    repository: DynAdminConfigRepository,
    owner_username: String,
    static_admins: Vec<String>,
}

impl PermissionService {
    pub fn new(
        repository: DynAdminConfigRepository,
        owner_username: String,
        static_admins: Vec<String>,
    ) -> Self {
        Self {
            repository,
            owner_username,
            static_admins,
        }
    }

    fn static_permission(&self, username: &str) -> Permission {
        if self.static_admins.iter().any(|admin| admin == username) {
            Permission::Admin
        } else {
            Permission::Unauthorized
        }
    }
}

#[async_trait]
impl PermissionServiceTrait for PermissionService {
    async fn check_permission(&self, username: &str) -> Permission {
        if username.is_empty() {
            return Permission::Unauthorized;
        }

        if !self.owner_username.is_empty() && username == self.owner_username {
            return Permission::Owner;
        }

        let admin_config = match self.repository.get_admin_config().await {
            Ok(Some(admin_config)) => admin_config,
            Ok(None) => {
                debug!("no admin config stored, using static admin list");
                return self.static_permission(username);
            }
            Err(e) => {
                warn!("admin config unavailable, using static admin list: {:#}", e);
                return self.static_permission(username);
            }
        };

        match admin_config.find_user(username) {
            Some(user) if user.banned => {
                debug!("user {} is banned", username);
                Permission::Unauthorized
            }
            Some(user) => match user.role {
                UserRole::Owner => Permission::Owner,
                UserRole::Admin => Permission::Admin,
                UserRole::User => Permission::Unauthorized,
            },
            None => self.static_permission(username),
        }
    }
}
