use axum::{extract::State, response::IntoResponse};
use chrono::Utc;

use crate::backend::extract::{ApiJson, ApiPath, OwnerId};
use crate::backend::response::{created, ok, ok_with};
use crate::backend::validation::{CreateGoalRequest, DepositRequest, UpdateGoalRequest};
use crate::backend::AppState;
use crate::database::db::queries::savings as goals;
use crate::database::models::{GoalWithProgress, SavingsGoal};
use crate::error::{AppError, Result};
use crate::services::savings;

fn with_progress(goal: SavingsGoal) -> GoalWithProgress {
    let progress = savings::progress_of(&goal, Utc::now());
    GoalWithProgress { goal, progress }
}

pub async fn list_goals(State(state): State<AppState>, OwnerId(user_id): OwnerId) -> Result<impl IntoResponse> {
    let list = savings::list_goal_progress(&state.db, user_id, Utc::now()).await?;
    Ok(ok(list))
}

pub async fn goals_summary(State(state): State<AppState>, OwnerId(user_id): OwnerId) -> Result<impl IntoResponse> {
    let summary = savings::savings_summary(&state.db, user_id).await?;
    Ok(ok(summary))
}

pub async fn create_goal(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiJson(payload): ApiJson<CreateGoalRequest>,
) -> Result<impl IntoResponse> {
    let new = payload.validate()?;
    let goal = goals::create_goal(&state.db, user_id, &new).await?;
    Ok(created(with_progress(goal), "Savings goal created"))
}

pub async fn update_goal(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(goal_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateGoalRequest>,
) -> Result<impl IntoResponse> {
    let mut goal = goals::get_goal(&state.db, user_id, goal_id)
        .await?
        .ok_or_else(|| AppError::not_found("Savings goal"))?;

    payload.apply(&mut goal)?;
    let updated = goals::update_goal(&state.db, &goal)
        .await?
        .ok_or_else(|| AppError::not_found("Savings goal"))?;
    Ok(ok_with(with_progress(updated), "Savings goal updated"))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(goal_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    if !goals::soft_delete_goal(&state.db, user_id, goal_id).await? {
        return Err(AppError::not_found("Savings goal"));
    }
    Ok(ok_with(goal_id, "Savings goal deleted"))
}

pub async fn deposit(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(goal_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<DepositRequest>,
) -> Result<impl IntoResponse> {
    let amount = payload.validate()?;
    let receipt = savings::deposit(&state.db, user_id, goal_id, amount, Utc::now()).await?;
    Ok(created(receipt, "Deposit recorded"))
}

pub async fn set_primary(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(goal_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let goal = goals::set_primary(&state.db, user_id, goal_id)
        .await?
        .ok_or_else(|| AppError::not_found("Savings goal"))?;
    Ok(ok_with(with_progress(goal), "Primary goal updated"))
}
