pub mod feed_dto;
pub mod health_dto;
pub mod network_dto;
pub mod subscription_dto;
