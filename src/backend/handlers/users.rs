use axum::{extract::State, response::IntoResponse};

use crate::backend::extract::{ApiJson, OwnerId};
use crate::backend::response::{created, ok, ok_with};
use crate::backend::validation::CreateUserRequest;
use crate::backend::AppState;
use crate::database::db::queries::users;
use crate::error::{AppError, Result};

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    let (email, name) = payload.validate()?;

    let user = users::create_user(&state.db, &email, &name)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Email already registered: {email}"))
            }
            other => AppError::Database(other),
        })?;

    tracing::info!(user_id = user.id, "user created");
    Ok(created(user, "User created"))
}

pub async fn me(State(state): State<AppState>, OwnerId(user_id): OwnerId) -> Result<impl IntoResponse> {
    let user = users::get_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(ok(user))
}

pub async fn delete_me(State(state): State<AppState>, OwnerId(user_id): OwnerId) -> Result<impl IntoResponse> {
    if !users::soft_delete_user(&state.db, user_id).await? {
        return Err(AppError::not_found("User"));
    }
    Ok(ok_with(user_id, "User deleted"))
}
