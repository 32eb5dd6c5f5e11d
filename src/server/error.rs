use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::server::utils::response_utils::no_store_json;

pub type AppResult<T> = Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// missing or malformed request input
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// the remote side answered with a non-success status or couldn't be reached
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// the remote side answered but the content is unusable
    #[error("{0}")]
    InvalidContent(String),

    #[error("{0}")]
    InternalServerErrorWithContext(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidContent(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable(_)
            | Self::InternalServerErrorWithContext(_)
            | Self::AnyhowError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            // server faults get a generic message, the real one goes in details
            Self::InternalServerErrorWithContext(_) | Self::AnyhowError(_) => {
                error!("unexpected error: {:?}", self);
                ErrorResponse {
                    error: "internal server error".to_string(),
                    details: Some(self.to_string()),
                }
            }
            _ => ErrorResponse {
                error: self.to_string(),
                details: None,
            },
        };

        no_store_json(status, body)
    }
}
