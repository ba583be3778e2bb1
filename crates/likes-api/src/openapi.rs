//! # OpenAPI Document Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI document served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the session bearer scheme to the document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Opaque session token issued by the session store."))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "likes API",
        description = "Like/unlike voting on heterogeneous content. A vote that changes an object's score fans out into the activity stream and the follow graph.\n\nVote endpoints require `Authorization: Bearer <session>` and `X-Requested-With: XMLHttpRequest`. Voter listings, health probes and `/metrics` are public.",
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    paths(
        crate::routes::votes::vote,
        crate::routes::votes::read_score,
        crate::routes::voters::list_voters,
        crate::routes::voters::list_voters_page,
    ),
    components(schemas(
        crate::error::VoteEnvelope,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::voters::Voter,
        crate::routes::voters::VoterList,
        crate::routes::voters::FirstVoterChunk,
        crate::routes::voters::IncrementalVoters,
        likes_core::Score,
        likes_core::UserId,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "votes", description = "Cast, change, clear or read votes"),
        (name = "voters", description = "Who voted on an object"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.contains(&&"/v1/votes/{content_type}/{direction}".to_string()));
        assert!(paths.contains(&&"/v1/voters/{content_type_id}/{object_id}".to_string()));
        assert!(paths
            .contains(&&"/v1/voters/{content_type_id}/{object_id}/{offset}/{limit}".to_string()));
    }

    #[test]
    fn document_has_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
