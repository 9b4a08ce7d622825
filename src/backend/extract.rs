use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query,
    },
    http::request::Parts,
};

use crate::backend::AppState;
use crate::database::db::queries::users;
use crate::error::AppError;

/// Header carrying the authenticated user's id. Authentication itself runs
/// in front of this service.
pub const OWNER_HEADER: &str = "x-user-id";

/// Owner of every row a request touches. Only live (not deleted) users pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerId(pub i64);

fn parse_owner(parts: &Parts) -> Result<i64, AppError> {
    let raw = parts
        .headers
        .get(OWNER_HEADER)
        .ok_or_else(|| AppError::validation("userId is required"))?;

    raw.to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::validation("userId must be a positive integer"))
}

#[async_trait]
impl FromRequestParts<AppState> for OwnerId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parse_owner(parts)?;

        if users::get_user(&state.db, user_id).await?.is_none() {
            return Err(AppError::not_found("User"));
        }
        Ok(OwnerId(user_id))
    }
}

// Framework rejections go through the same `{ "error": ... }` envelope.

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
