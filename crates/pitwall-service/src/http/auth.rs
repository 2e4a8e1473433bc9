//! Editor authentication
//!
//! Editor routes take HTTP basic auth:
//!
//! ```text
//! Authorization: Basic base64(username:password)
//! ```
//!
//! A request without usable credentials gets `401`; credentials that match
//! no configured editor get `403`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::{debug, warn};

use super::AppState;
use super::error::ApiError;

/// Username and password from a basic auth header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Part before the first `:`
    pub username: String,
    /// Everything after the first `:`
    pub password: String,
}

impl BasicCredentials {
    /// Extract credentials from the `Authorization` header, if present and well formed
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Reject requests that do not carry editor credentials
pub async fn require_editor(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(credentials) = BasicCredentials::from_headers(request.headers()) else {
        debug!(path = %request.uri().path(), "Editor route called without credentials");
        return ApiError::Unauthorized.into_response();
    };

    let is_editor = state
        .editors
        .iter()
        .any(|editor| editor.matches(&credentials.username, &credentials.password));
    if !is_editor {
        warn!(username = %credentials.username, path = %request.uri().path(), "Editor login rejected");
        return ApiError::Forbidden.into_response();
    }

    next.run(request).await
}
