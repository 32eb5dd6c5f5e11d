pub mod address_utils;
pub mod response_utils;
pub mod signature_utils;
pub mod subscription_parser;
