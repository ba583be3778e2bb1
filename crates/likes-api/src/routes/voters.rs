//! # Voter Listing Routes
//!
//! - `GET /v1/voters/:content_type_id/:object_id` — everyone who voted.
//! - `GET /v1/voters/:content_type_id/:object_id/:offset/:limit` — one page.
//!
//! Offset 0 always returns the first `min_voters_chunk` voters together
//! with the URL and chunk size a client should page with. Later pages
//! answer AJAX callers with a `success` flag.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use likes_core::{ContentKind, ObjectRef, UserId};
use likes_store::{ObjectResolver, UserDirectory, VoteStore};

use crate::error::AppError;
use crate::extractors::{extract_path, Ajax};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/voters/:content_type_id/:object_id", get(list_voters))
        .route(
            "/v1/voters/:content_type_id/:object_id/:offset/:limit",
            get(list_voters_page),
        )
}

/// A user who voted on the object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Voter {
    pub id: UserId,
    /// `None` when the user directory has no record for the voter.
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoterList {
    pub voters: Vec<Voter>,
}

/// Offset-0 page plus the handle for fetching the rest.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FirstVoterChunk {
    pub voters: Vec<Voter>,
    pub is_incremental: bool,
    pub data_href: String,
    pub data_chunk: usize,
}

/// Later page for AJAX callers; `voters` is omitted when the page is empty.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncrementalVoters {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voters: Option<Vec<Voter>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObjectPath {
    content_type_id: u32,
    object_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PagePath {
    content_type_id: u32,
    object_id: u64,
    offset: usize,
    limit: usize,
}

/// Resolve the content type id and object id, 404 on either miss.
fn find_object(
    state: &AppState,
    content_type_id: u32,
    object_id: u64,
) -> Result<ObjectRef, AppError> {
    let kind = ContentKind::from_content_type_id(content_type_id)
        .map_err(|_| AppError::NotFound(format!("content type {content_type_id}")))?;
    let object = ObjectRef::new(kind, object_id);
    state
        .stores
        .objects
        .get(object)?
        .map(|stored| stored.object)
        .ok_or_else(|| AppError::NotFound(format!("{} {object_id}", kind.verbose_name())))
}

fn describe(state: &AppState, ids: Vec<UserId>) -> Result<Vec<Voter>, AppError> {
    ids.into_iter()
        .map(|id| {
            let username = state.stores.users.get_user(id)?.map(|u| u.username);
            Ok::<_, AppError>(Voter { id, username })
        })
        .collect()
}

/// GET /v1/voters/:content_type_id/:object_id — All voters, in voting order.
#[utoipa::path(
    get,
    path = "/v1/voters/{content_type_id}/{object_id}",
    params(
        ("content_type_id" = u32, Path, description = "Numeric content type id"),
        ("object_id" = u64, Path, description = "Object primary key"),
    ),
    responses(
        (status = 200, description = "All voters", body = VoterList),
        (status = 404, description = "Unknown content type or object", body = crate::error::ErrorBody),
    ),
    security(()),
    tag = "voters"
)]
pub(crate) async fn list_voters(
    State(state): State<AppState>,
    path: Result<Path<ObjectPath>, PathRejection>,
) -> Result<Json<VoterList>, AppError> {
    let ObjectPath {
        content_type_id,
        object_id,
    } = extract_path(path)?;
    let object = find_object(&state, content_type_id, object_id)?;
    let voters = describe(&state, state.stores.votes.get_voters(object)?)?;
    Ok(Json(VoterList { voters }))
}

/// GET /v1/voters/:content_type_id/:object_id/:offset/:limit — One page of voters.
#[utoipa::path(
    get,
    path = "/v1/voters/{content_type_id}/{object_id}/{offset}/{limit}",
    params(
        ("content_type_id" = u32, Path, description = "Numeric content type id"),
        ("object_id" = u64, Path, description = "Object primary key"),
        ("offset" = usize, Path, description = "Index of the first voter; 0 requests the first chunk"),
        ("limit" = usize, Path, description = "Page size; ignored when offset is 0"),
    ),
    responses(
        (status = 200, description = "First chunk (offset 0), or a later page", body = FirstVoterChunk),
        (status = 404, description = "Unknown content type or object", body = crate::error::ErrorBody),
    ),
    security(()),
    tag = "voters"
)]
pub(crate) async fn list_voters_page(
    State(state): State<AppState>,
    Ajax(is_ajax): Ajax,
    path: Result<Path<PagePath>, PathRejection>,
) -> Result<Response, AppError> {
    let PagePath {
        content_type_id,
        object_id,
        offset,
        limit,
    } = extract_path(path)?;
    let object = find_object(&state, content_type_id, object_id)?;
    let votes = &state.stores.votes;

    if offset == 0 {
        let chunk = state.config.min_voters_chunk;
        let voters = describe(&state, votes.get_voters_inc(object, 0, chunk)?)?;
        return Ok(Json(FirstVoterChunk {
            voters,
            is_incremental: false,
            data_href: format!("/v1/voters/{content_type_id}/{object_id}/0/{chunk}"),
            data_chunk: chunk,
        })
        .into_response());
    }

    let voters = describe(&state, votes.get_voters_inc(object, offset, limit)?)?;
    if !is_ajax {
        return Ok(Json(VoterList { voters }).into_response());
    }
    let page = if voters.is_empty() {
        IncrementalVoters {
            success: false,
            voters: None,
        }
    } else {
        IncrementalVoters {
            success: true,
            voters: Some(voters),
        }
    };
    Ok(Json(page).into_response())
}
