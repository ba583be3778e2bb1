//! # Vote Routes
//!
//! `GET|POST /v1/votes/:content_type/:direction`
//!
//! The object is named by `?object_id=` or by `?slug=&slug_field=`. `POST`
//! records the vote; `GET` only reports the current score. Only AJAX
//! callers are served; anything else gets a 404.
//!
//! Protocol-level rejections are returned as a [`VoteEnvelope`] with HTTP
//! 200, checked in this order: session, direction, lookup, object.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use utoipa::IntoParams;

use likes_core::{ContentKind, Direction, Lookup};
use likes_store::{ObjectResolver, StoredObject, VoteStore};

use crate::auth::Caller;
use crate::error::{AppError, VoteEnvelope};
use crate::extractors::Ajax;
use crate::orchestration;
use crate::state::AppState;

pub const MISSING_LOOKUP: &str = "Generic XMLHttpRequest vote view must be called with either \
                                  object_id or slug and slug_field.";
pub const NOT_AUTHENTICATED: &str = "Not authenticated.";

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/v1/votes/:content_type/:direction",
        get(read_score).post(vote),
    )
}

/// How to find the object being voted on.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VoteQuery {
    /// Primary key of the object. Takes precedence over `slug`.
    pub object_id: Option<String>,
    /// Value of the slug field.
    pub slug: Option<String>,
    /// Name of the field `slug` is matched against.
    pub slug_field: Option<String>,
}

impl VoteQuery {
    fn lookup(&self) -> Option<Lookup> {
        Lookup::from_params(
            self.object_id.as_deref(),
            self.slug.as_deref(),
            self.slug_field.as_deref(),
        )
    }
}

/// What a validated vote request resolved to.
enum Resolved {
    Rejected(VoteEnvelope),
    Ready {
        caller: likes_core::UserId,
        direction: Direction,
        object: StoredObject,
    },
}

fn resolve_request(
    state: &AppState,
    caller: Caller,
    content_type: &str,
    direction: &str,
    query: Result<Query<VoteQuery>, QueryRejection>,
) -> Result<Resolved, AppError> {
    let kind: ContentKind = content_type
        .parse()
        .map_err(|_| AppError::NotFound(format!("unknown content type '{content_type}'")))?;
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let Some(user) = caller.user() else {
        return Ok(Resolved::Rejected(VoteEnvelope::failure(NOT_AUTHENTICATED)));
    };
    let direction: Direction = match direction.parse() {
        Ok(d) => d,
        Err(e) => return Ok(Resolved::Rejected(VoteEnvelope::failure(e.to_string()))),
    };
    let Some(lookup) = query.lookup() else {
        return Ok(Resolved::Rejected(VoteEnvelope::failure(MISSING_LOOKUP)));
    };
    let Some(object) = state.stores.objects.resolve(kind, &lookup)? else {
        return Ok(Resolved::Rejected(VoteEnvelope::failure(format!(
            "No {} found for {lookup}.",
            kind.verbose_name()
        ))));
    };

    Ok(Resolved::Ready {
        caller: user,
        direction,
        object,
    })
}

fn require_ajax(Ajax(is_ajax): Ajax) -> Result<(), AppError> {
    if is_ajax {
        Ok(())
    } else {
        Err(AppError::NotFound(
            "votes are only accepted from XMLHttpRequest callers".to_string(),
        ))
    }
}

/// POST /v1/votes/:content_type/:direction — Cast, change, or clear a vote.
#[utoipa::path(
    post,
    path = "/v1/votes/{content_type}/{direction}",
    params(
        ("content_type" = String, Path, description = "Content kind, e.g. `image` or `threadedcomment`"),
        ("direction" = String, Path, description = "`up`, `down` or `clear`"),
        VoteQuery,
        ("X-Requested-With" = String, Header, description = "Must be `XMLHttpRequest`"),
    ),
    responses(
        (status = 200, description = "Vote envelope: updated score, or an error message", body = VoteEnvelope),
        (status = 404, description = "Not an AJAX request, or unknown content type", body = crate::error::ErrorBody),
        (status = 500, description = "Vote store failure", body = crate::error::ErrorBody),
    ),
    tag = "votes"
)]
pub(crate) async fn vote(
    State(state): State<AppState>,
    ajax: Ajax,
    caller: Caller,
    Path((content_type, direction)): Path<(String, String)>,
    query: Result<Query<VoteQuery>, QueryRejection>,
) -> Result<VoteEnvelope, AppError> {
    require_ajax(ajax)?;
    match resolve_request(&state, caller, &content_type, &direction, query)? {
        Resolved::Rejected(envelope) => Ok(envelope),
        Resolved::Ready {
            caller,
            direction,
            object,
        } => {
            let score = orchestration::cast_vote(&state, caller, &object, direction)?;
            Ok(VoteEnvelope::success(score))
        }
    }
}

/// GET /v1/votes/:content_type/:direction — Current score, without voting.
#[utoipa::path(
    get,
    path = "/v1/votes/{content_type}/{direction}",
    params(
        ("content_type" = String, Path, description = "Content kind"),
        ("direction" = String, Path, description = "`up`, `down` or `clear`; validated but not applied"),
        VoteQuery,
        ("X-Requested-With" = String, Header, description = "Must be `XMLHttpRequest`"),
    ),
    responses(
        (status = 200, description = "Vote envelope with the current score", body = VoteEnvelope),
        (status = 404, description = "Not an AJAX request, or unknown content type", body = crate::error::ErrorBody),
    ),
    tag = "votes"
)]
pub(crate) async fn read_score(
    State(state): State<AppState>,
    ajax: Ajax,
    caller: Caller,
    Path((content_type, direction)): Path<(String, String)>,
    query: Result<Query<VoteQuery>, QueryRejection>,
) -> Result<VoteEnvelope, AppError> {
    require_ajax(ajax)?;
    match resolve_request(&state, caller, &content_type, &direction, query)? {
        Resolved::Rejected(envelope) => Ok(envelope),
        Resolved::Ready { object, .. } => {
            let score = state.stores.votes.get_score(object.object)?;
            Ok(VoteEnvelope::success(score))
        }
    }
}
