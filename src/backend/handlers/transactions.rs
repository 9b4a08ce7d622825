use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::backend::extract::{ApiJson, ApiPath, ApiQuery, OwnerId};
use crate::backend::response::{created, ok, ok_with};
use crate::backend::validation::{CreateTransactionRequest, TransactionQuery, UpdateTransactionRequest};
use crate::backend::AppState;
use crate::database::db::queries::{categories, transactions, transactions::TransactionFilter};
use crate::database::models::{NewTransaction, TransactionType};
use crate::error::{AppError, Result};
use crate::finance::kst;

/// The category must belong to the owner and carry the same type as the row.
async fn check_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category_id: i64,
    r#type: TransactionType,
) -> Result<()> {
    let category = categories::get_category(pool, user_id, category_id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;

    if category.r#type != r#type {
        return Err(AppError::validation(format!(
            "Category type {} does not match transaction type {}",
            category.r#type.as_str(),
            r#type.as_str()
        )));
    }
    Ok(())
}

pub async fn list_transactions(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiQuery(query): ApiQuery<TransactionQuery>,
) -> Result<impl IntoResponse> {
    let range = match query.month()? {
        Some((year, month)) => Some(kst::month_range(year, month)?),
        None => None,
    };
    let (limit, offset) = query.page()?;

    let filter = TransactionFilter {
        range,
        r#type: query.r#type,
        category_id: query.category_id,
        limit,
        offset,
    };
    let list = transactions::list_transactions(&state.db, user_id, &filter).await?;
    Ok(ok(list))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(transaction_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let transaction = transactions::get_transaction(&state.db, user_id, transaction_id)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction"))?;
    Ok(ok(transaction))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiJson(payload): ApiJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse> {
    let valid = payload.validate()?;
    check_category(&state.db, user_id, valid.category_id, valid.r#type).await?;

    let new = NewTransaction {
        r#type: valid.r#type,
        amount: valid.amount,
        occurred_at: valid.occurred_at.unwrap_or_else(Utc::now),
        category_id: Some(valid.category_id),
        savings_goal_id: None,
        description: valid.description,
    };
    let transaction = transactions::create_transaction(&state.db, user_id, &new).await?;

    tracing::debug!(user_id, transaction_id = transaction.id, "transaction created");
    Ok(created(transaction, "Transaction created"))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(transaction_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateTransactionRequest>,
) -> Result<impl IntoResponse> {
    let mut transaction = transactions::get_transaction(&state.db, user_id, transaction_id)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction"))?;

    if transaction.is_savings_contribution() {
        return Err(AppError::validation("Savings contributions cannot be edited"));
    }

    let recheck = payload.r#type.is_some() || payload.category_id.is_some();
    payload.apply(&mut transaction)?;
    if let (true, Some(category_id)) = (recheck, transaction.category_id) {
        check_category(&state.db, user_id, category_id, transaction.r#type).await?;
    }

    let updated = transactions::update_transaction(&state.db, &transaction)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction"))?;
    Ok(ok_with(updated, "Transaction updated"))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    OwnerId(user_id): OwnerId,
    ApiPath(transaction_id): ApiPath<i64>,
) -> Result<impl IntoResponse> {
    let transaction = transactions::get_transaction(&state.db, user_id, transaction_id)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction"))?;

    if transaction.is_savings_contribution() {
        return Err(AppError::validation("Savings contributions cannot be deleted"));
    }

    transactions::soft_delete_transaction(&state.db, user_id, transaction_id).await?;
    Ok(ok_with(transaction_id, "Transaction deleted"))
}
