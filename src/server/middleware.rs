//! Request middleware: token check and per-request deadline

use super::state::AppState;
use crate::core::auth::token_from_headers;
use crate::core::error::{RequestError, RestaurantError};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Reject requests whose token the auth provider does not accept
///
/// The accepted [`AuthContext`](crate::core::AuthContext) is stored in the
/// request extensions.
pub async fn require_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, RestaurantError> {
    let token = token_from_headers(req.headers()).map(str::to_owned);
    let context = state.auth.authenticate(token.as_deref()).await?;
    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Abandon requests that outlive the configured deadline
///
/// Dropping the handler future cancels any store call still in flight.
pub async fn enforce_deadline(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    match tokio::time::timeout(state.request_timeout, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%path, timeout = ?state.request_timeout, "request deadline exceeded");
            RestaurantError::from(RequestError::Timeout {
                seconds: state.request_timeout.as_secs(),
            })
            .into_response()
        }
    }
}
