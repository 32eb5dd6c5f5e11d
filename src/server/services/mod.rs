pub mod app_services;
pub mod network_services;
pub mod permission_services;
pub mod subscription_services;

pub use app_services::AppServices;
pub use network_services::DynNetworkService;
pub use permission_services::DynPermissionService;
pub use subscription_services::DynSubscriptionService;
