use axum::{extract::State, response::IntoResponse};

use crate::backend::extract::{ApiJson, ApiPath, ApiQuery, OwnerId};
use crate::backend::response::{ok, ok_with};
use crate::backend::validation::{year_month, MonthQuery, UpsertBudgetRequest};
use crate::backend::AppState;
use crate::database::db::queries::{budgets, categories};
use crate::database::models::TransactionType;
use crate::error::{AppError, Result};
use crate::finance::kst;

pub async fn list_budgets(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<impl IntoResponse> {
    let (year, month) = year_month(query.year, query.month)?;
    let list = budgets::list_budgets(&state.db, user_id, kst::first_of_month(year, month)?).await?;
    Ok(ok(list))
}

/// One live budget per (owner, category or whole month, month); a second
/// PUT for the same key overwrites the amount.
pub async fn upsert_budget(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiJson(payload): ApiJson<UpsertBudgetRequest>,
) -> Result<impl IntoResponse> {
    let (category_id, month, amount) = payload.validate()?;

    if let Some(category_id) = category_id {
        let category = categories::get_category(&state.db, user_id, category_id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))?;
        if category.r#type != TransactionType::Expense {
            return Err(AppError::validation("Budgets can only be set on EXPENSE categories"));
        }
    }

    let budget = budgets::upsert_budget(&state.db, user_id, category_id, month, amount).await?;
    Ok(ok_with(budget, "Budget saved"))
}

pub async fn delete_budget(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(budget_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    if !budgets::soft_delete_budget(&state.db, user_id, budget_id).await? {
        return Err(AppError::not_found("Budget"));
    }
    Ok(ok_with(budget_id, "Budget deleted"))
}
