use axum::{extract::State, response::IntoResponse};
use chrono::Utc;

use crate::backend::extract::{ApiQuery, OwnerId};
use crate::backend::response::ok;
use crate::backend::validation::{year_month, MonthQuery, SeriesQuery};
use crate::backend::AppState;
use crate::error::Result;
use crate::services::summary::{self, DEFAULT_SERIES_DAYS};

pub async fn today(State(state): State<AppState>, OwnerId(user_id): OwnerId) -> Result<impl IntoResponse> {
    let data = summary::today_summary(&state.db, user_id, Utc::now()).await?;
    Ok(ok(data))
}

pub async fn monthly(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<impl IntoResponse> {
    let (year, month) = year_month(query.year, query.month)?;
    let data = summary::monthly_summary(&state.db, user_id, year, month).await?;
    Ok(ok(data))
}

pub async fn daily_expenses(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiQuery(query): ApiQuery<SeriesQuery>,
) -> Result<impl IntoResponse> {
    let days = query.days.unwrap_or(DEFAULT_SERIES_DAYS);
    let data = summary::expense_series(&state.db, user_id, Utc::now(), days).await?;
    Ok(ok(data))
}
