use std::sync::Arc;

use feedhub_api::database::{AdminConfig, MockAdminConfigRepository, UserEntry, UserRole};
use feedhub_api::server::services::permission_services::{
    Permission, PermissionService, PermissionServiceTrait,
};

fn user(username: &str, role: UserRole, banned: bool) -> UserEntry {
    UserEntry {
        username: username.to_string(),
        role,
        banned,
    }
}

fn stored_config() -> AdminConfig {
    AdminConfig {
        users: vec![
            user("alice", UserRole::Admin, false),
            user("bob", UserRole::User, false),
            user("carol", UserRole::Admin, true),
            user("dave", UserRole::Owner, false),
        ],
        ..Default::default()
    }
}

fn service_with(repository: MockAdminConfigRepository, static_admins: &[&str]) -> PermissionService {
    PermissionService::new(
        Arc::new(repository),
        "root".to_string(),
        static_admins.iter().map(|s| s.to_string()).collect(),
    )
}

fn service_with_store(static_admins: &[&str]) -> PermissionService {
    let mut repository = MockAdminConfigRepository::new();
    repository
        .expect_get_admin_config()
        .returning(|| Ok(Some(stored_config())));
    service_with(repository, static_admins)
}

#[tokio::test]
async fn test_owner_from_config_skips_the_store() {
    let mut repository = MockAdminConfigRepository::new();
    repository.expect_get_admin_config().never();

    let service = service_with(repository, &[]);

    assert_eq!(service.check_permission("root").await, Permission::Owner);
}

#[tokio::test]
async fn test_roles_from_the_store() {
    let service = service_with_store(&[]);

    assert_eq!(service.check_permission("alice").await, Permission::Admin);
    assert_eq!(service.check_permission("dave").await, Permission::Owner);
    assert_eq!(
        service.check_permission("bob").await,
        Permission::Unauthorized
    );
}

#[tokio::test]
async fn test_banned_admin_is_unauthorized() {
    let service = service_with_store(&["carol"]);

    assert_eq!(
        service.check_permission("carol").await,
        Permission::Unauthorized
    );
}

#[tokio::test]
async fn test_unknown_user_falls_back_to_static_admins() {
    let service = service_with_store(&["erin"]);

    assert_eq!(service.check_permission("erin").await, Permission::Admin);
    assert_eq!(
        service.check_permission("frank").await,
        Permission::Unauthorized
    );
}

#[tokio::test]
async fn test_store_failure_falls_back_to_static_admins() {
    let mut repository = MockAdminConfigRepository::new();
    repository
        .expect_get_admin_config()
        .returning(|| Err(anyhow::anyhow!("connection refused")));

    let service = service_with(repository, &["alice"]);

    assert_eq!(service.check_permission("alice").await, Permission::Admin);
    assert_eq!(
        service.check_permission("bob").await,
        Permission::Unauthorized
    );
    // the owner never needs the store
    assert_eq!(service.check_permission("root").await, Permission::Owner);
}

#[tokio::test]
async fn test_empty_store_falls_back_to_static_admins() {
    let mut repository = MockAdminConfigRepository::new();
    repository.expect_get_admin_config().returning(|| Ok(None));

    let service = service_with(repository, &["alice"]);

    assert_eq!(service.check_permission("alice").await, Permission::Admin);
}

#[tokio::test]
async fn test_empty_username_is_unauthorized() {
    let mut repository = MockAdminConfigRepository::new();
    repository.expect_get_admin_config().never();

    let service = service_with(repository, &[""]);

    assert_eq!(
        service.check_permission("").await,
        Permission::Unauthorized
    );
}

#[test]
fn test_admin_config_reads_camel_case_json() {
    let raw = r#"{
        "site": { "siteName": "Home", "siteBase": "https://tv.example.com" },
        "users": [{ "username": "alice", "role": "admin" }],
        "feed": { "enableAuth": true, "token": "s3cret" },
        "sourceConfig": []
    }"#;

    let config: AdminConfig = serde_json::from_str(raw).unwrap();

    assert_eq!(config.site_base(), Some("https://tv.example.com"));
    assert_eq!(config.feed_token(), Some("s3cret"));
    assert_eq!(config.find_user("alice").map(|u| u.role), Some(UserRole::Admin));
    assert!(!config.users[0].banned);
}

#[test]
fn test_admin_config_empty_values_count_as_unset() {
    let raw = r#"{ "site": { "siteBase": "" }, "feed": { "enableAuth": false, "token": "t" } }"#;

    let config: AdminConfig = serde_json::from_str(raw).unwrap();

    assert_eq!(config.site_base(), None);
    // token only counts when auth is switched on
    assert_eq!(config.feed_token(), None);
}
