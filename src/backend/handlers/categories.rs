use axum::{extract::State, response::IntoResponse};

use crate::backend::extract::{ApiJson, ApiPath, ApiQuery, OwnerId};
use crate::backend::response::{created, ok, ok_with};
use crate::backend::validation::{CategoryQuery, CreateCategoryRequest, UpdateCategoryRequest};
use crate::backend::AppState;
use crate::database::db::queries::categories;
use crate::database::models::NewCategory;
use crate::error::{AppError, Result};

pub async fn list_categories(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiQuery(query): ApiQuery<CategoryQuery>,
) -> Result<impl IntoResponse> {
    let list = categories::list_categories(&state.db, user_id, query.r#type).await?;
    Ok(ok(list))
}

pub async fn create_category(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiJson(payload): ApiJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse> {
    let new = payload.validate()?;
    let category = categories::create_category(&state.db, user_id, &new).await?;
    Ok(created(category, "Category created"))
}

/// Inserts the default set. The emptiness check and the insert are separate
/// statements, so two concurrent calls can both seed.
pub async fn seed_categories(State(state): State<AppState>, OwnerId(user_id): OwnerId) -> Result<impl IntoResponse> {
    if categories::count_categories(&state.db, user_id).await? > 0 {
        return Err(AppError::Conflict("Categories already exist".into()));
    }

    let seeded = categories::seed_categories(&state.db, user_id, &NewCategory::defaults()).await?;
    tracing::info!(user_id, count = seeded.len(), "default categories seeded");
    Ok(created(seeded, "Default categories created"))
}

pub async fn update_category(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(category_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateCategoryRequest>,
) -> Result<impl IntoResponse> {
    let mut category = categories::get_category(&state.db, user_id, category_id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;

    if payload.changes_type(&category) && categories::category_in_use(&state.db, user_id, category_id).await? {
        return Err(AppError::validation(
            "Category type cannot change while transactions or budgets use it",
        ));
    }

    payload.apply(&mut category)?;
    let updated = categories::update_category(&state.db, &category)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;
    Ok(ok_with(updated, "Category updated"))
}

pub async fn delete_category(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(category_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    if !categories::soft_delete_category(&state.db, user_id, category_id).await? {
        return Err(AppError::not_found("Category"));
    }
    Ok(ok_with(category_id, "Category deleted"))
}
