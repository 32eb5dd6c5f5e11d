mod authentication_extractor;
mod request_origin_extractor;
mod validation_extractor;

pub use authentication_extractor::*;
pub use request_origin_extractor::*;
pub use validation_extractor::*;
