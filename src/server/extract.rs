//! Request extractors

use crate::core::error::{RestaurantError, ValidationError};
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

/// JSON request body whose rejections use the service's error format
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RestaurantError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for RestaurantError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::InvalidJson {
            message: rejection.body_text(),
        }
        .into()
    }
}
