use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::server::error::Error;

/// json body that has already passed its `validator` rules
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| Error::BadRequest(first_message(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// the message of the first failing rule, clients only ever show one
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .find_map(|(field, field_errors)| {
            field_errors.first().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("invalid {}", field))
            })
        })
        .unwrap_or_else(|| "invalid request".to_string())
}
