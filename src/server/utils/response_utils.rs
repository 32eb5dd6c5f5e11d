use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// json response with `Cache-Control: no-store`
pub struct NoStoreJson<T>(pub T);

impl<T: Serialize> IntoResponse for NoStoreJson<T> {
    fn into_response(self) -> Response {
        no_store_json(StatusCode::OK, self.0)
    }
}

pub fn no_store_json<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, no_store());
    response
}

/// everything this api returns is per request, clients and proxies must not keep it
pub fn no_store() -> HeaderValue {
    HeaderValue::from_static("no-store")
}
