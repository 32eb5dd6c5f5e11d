pub mod feed_controller;
pub mod health_controller;
pub mod network_controller;
pub mod subscription_controller;
