//! # Session Authentication
//!
//! Callers authenticate with an opaque session token:
//!
//! ```text
//! Authorization: Bearer {session_token}
//! ```
//!
//! The token is resolved through the [`SessionStore`](likes_store::SessionStore)
//! collaborator. The vote protocol reports a missing session inside its own
//! envelope rather than with a 401, so [`Caller`] never rejects an
//! anonymous request; it yields `None` and the handler decides.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use likes_core::UserId;
use likes_store::SessionStore;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated user, if the request carried a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Option<UserId>);

impl Caller {
    pub fn user(&self) -> Option<UserId> {
        self.0
    }
}

/// Pull the token out of an `Authorization: Bearer ...` header value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
        else {
            return Ok(Self(None));
        };

        let user = state.stores.sessions.authenticate(token)?;
        if user.is_none() {
            tracing::debug!("unknown session token");
        }
        Ok(Self(user))
    }
}
