//! # Custom Extractors
//!
//! [`Ajax`] detects XMLHttpRequest callers; [`extract_path`] maps path
//! parse failures to [`AppError::BadRequest`].

use std::convert::Infallible;

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;

/// Header set by browser AJAX helpers.
pub const REQUESTED_WITH: &str = "x-requested-with";

/// Whether the request was made as an XMLHttpRequest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ajax(pub bool);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Ajax {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_ajax = parts
            .headers
            .get(REQUESTED_WITH)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
        Ok(Self(is_ajax))
    }
}

/// Unwrap path parameters, mapping rejections to [`AppError::BadRequest`].
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn detect(header: Option<&str>) -> bool {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(REQUESTED_WITH, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        let Ajax(is_ajax) = Ajax::from_request_parts(&mut parts, &()).await.unwrap();
        is_ajax
    }

    #[tokio::test]
    async fn header_value_is_case_insensitive() {
        assert!(detect(Some("XMLHttpRequest")).await);
        assert!(detect(Some("xmlhttprequest")).await);
    }

    #[tokio::test]
    async fn absent_or_other_value_is_not_ajax() {
        assert!(!detect(None).await);
        assert!(!detect(Some("fetch")).await);
    }
}
