use sqlx::{Pool, Sqlite};

use super::now_ms;
use crate::database::models::{NewTransaction, Transaction, TransactionDetail, TransactionType};
use crate::finance::TimeRange;

/*==========Transaction Queries=========== */

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub range: Option<TimeRange>,
    pub r#type: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Newest first, with category and goal display fields joined in.
pub async fn list_transactions(
    pool: &Pool<Sqlite>,
    user_id: i64,
    filter: &TransactionFilter,
) -> Result<Vec<TransactionDetail>, sqlx::Error> {
    sqlx::query_as::<_, TransactionDetail>(
        r#"
        SELECT
            t.*,
            c.name  AS category_name,
            c.color AS category_color,
            c.icon  AS category_icon,
            g.name  AS savings_goal_name
        FROM transactions t
        LEFT JOIN categories c    ON c.id = t.category_id
        LEFT JOIN savings_goals g ON g.id = t.savings_goal_id
        WHERE t.user_id = ?
          AND t.deleted_at IS NULL
          AND (? IS NULL OR t.occurred_at >= ?)
          AND (? IS NULL OR t.occurred_at <= ?)
          AND (? IS NULL OR t.type = ?)
          AND (? IS NULL OR t.category_id = ?)
        ORDER BY t.occurred_at DESC, t.id DESC
        LIMIT COALESCE(?, 200) OFFSET COALESCE(?, 0)
        "#,
    )
    .bind(user_id)
    .bind(filter.range.map(|r| r.start_ms()))
    .bind(filter.range.map(|r| r.start_ms()))
    .bind(filter.range.map(|r| r.end_ms()))
    .bind(filter.range.map(|r| r.end_ms()))
    .bind(filter.r#type)
    .bind(filter.r#type)
    .bind(filter.category_id)
    .bind(filter.category_id)
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(pool)
    .await
}

pub async fn get_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    transaction_id: i64,
) -> Result<Option<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        r#"
        SELECT * FROM transactions
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(transaction_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn create_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    t: &NewTransaction,
) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (
            user_id, type, amount, occurred_at, category_id,
            savings_goal_id, description, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(t.r#type)
    .bind(t.amount)
    .bind(t.occurred_at.timestamp_millis())
    .bind(t.category_id)
    .bind(t.savings_goal_id)
    .bind(&t.description)
    .bind(now_ms())
    .fetch_one(pool)
    .await
}

/// Writes type, amount, date, category and description. The goal link is
/// fixed at creation.
pub async fn update_transaction(pool: &Pool<Sqlite>, t: &Transaction) -> Result<Option<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        r#"
        UPDATE transactions
        SET type = ?, amount = ?, occurred_at = ?, category_id = ?, description = ?
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(t.r#type)
    .bind(t.amount)
    .bind(t.occurred_at.timestamp_millis())
    .bind(t.category_id)
    .bind(&t.description)
    .bind(t.id)
    .bind(t.user_id)
    .fetch_optional(pool)
    .await
}

pub async fn soft_delete_transaction(
    pool: &Pool<Sqlite>,
    user_id: i64,
    transaction_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE transactions SET deleted_at = ?
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now_ms())
    .bind(transaction_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
