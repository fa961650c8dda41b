//! Authentication seam for the HTTP surface
//!
//! The service does not issue or validate JWTs itself. Every protected
//! request carries a token (in the `token` header or as an
//! `Authorization: Bearer` credential) and an [`AuthProvider`] decides
//! whether it is acceptable:
//! - [`NoAuthProvider`]: every request passes (development, tests)
//! - [`StaticTokenProvider`]: a fixed list of accepted tokens from configuration

use crate::core::error::RequestError;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use std::collections::HashSet;

/// Name of the header the clients send their token in
pub const TOKEN_HEADER: &str = "token";

/// Authorization context attached to an accepted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// A caller presenting an accepted token
    Token { token: String },

    /// No authentication performed
    Anonymous,
}

impl AuthContext {
    /// Check if the caller presented a credential
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::Token { .. })
    }
}

/// Read the client token from the request headers
///
/// The dedicated `token` header wins over `Authorization: Bearer`.
/// Blank values count as absent.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let direct = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    direct.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Decide whether a request carrying `token` may proceed
    async fn authenticate(&self, token: Option<&str>) -> Result<AuthContext, RequestError>;
}

/// Default no-auth provider (for development)
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn authenticate(&self, _token: Option<&str>) -> Result<AuthContext, RequestError> {
        Ok(AuthContext::Anonymous)
    }
}

/// Accepts a fixed set of tokens
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    tokens: HashSet<String>,
}

impl StaticTokenProvider {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn authenticate(&self, token: Option<&str>) -> Result<AuthContext, RequestError> {
        let token = token.ok_or_else(|| RequestError::Unauthorized {
            message: "No Authorization header provided".to_string(),
        })?;

        if self.tokens.contains(token) {
            Ok(AuthContext::Token {
                token: token.to_string(),
            })
        } else {
            Err(RequestError::Unauthorized {
                message: "the provided token is not valid".to_string(),
            })
        }
    }
}
