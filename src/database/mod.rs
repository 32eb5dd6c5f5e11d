pub mod admin_config;
mod redis_connection;

pub use admin_config::*;
pub use redis_connection::*;
