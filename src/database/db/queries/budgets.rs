use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use super::now_ms;
use crate::database::models::Budget;

/*==========Budget Queries=========== */

pub async fn list_budgets(
    pool: &Pool<Sqlite>,
    user_id: i64,
    month: NaiveDate,
) -> Result<Vec<Budget>, sqlx::Error> {
    sqlx::query_as::<_, Budget>(
        r#"
        SELECT * FROM budgets
        WHERE user_id = ? AND month = ? AND deleted_at IS NULL
        ORDER BY category_id IS NOT NULL, category_id
        "#,
    )
    .bind(user_id)
    .bind(month)
    .fetch_all(pool)
    .await
}

/// Whole-month budget amount (the row without a category), if one is set.
pub async fn whole_month_budget(
    pool: &Pool<Sqlite>,
    user_id: i64,
    month: NaiveDate,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT amount FROM budgets
        WHERE user_id = ? AND category_id IS NULL AND month = ? AND deleted_at IS NULL
        "#,
    )
    .bind(user_id)
    .bind(month)
    .fetch_optional(pool)
    .await
}

/// Insert-or-update keyed on (user, category-or-null, month). A soft-deleted
/// row under the same key is revived rather than duplicated.
pub async fn upsert_budget(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category_id: Option<i64>,
    month: NaiveDate,
    amount: i64,
) -> Result<Budget, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let now = now_ms();

    // `IS` matches NULL to NULL
    let existing: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM budgets
        WHERE user_id = ? AND category_id IS ? AND month = ?
        "#,
    )
    .bind(user_id)
    .bind(category_id)
    .bind(month)
    .fetch_optional(&mut *tx)
    .await?;

    let budget = match existing {
        Some(id) => {
            sqlx::query_as::<_, Budget>(
                r#"
                UPDATE budgets
                SET amount = ?, updated_at = ?, deleted_at = NULL
                WHERE id = ?
                RETURNING *
                "#,
            )
            .bind(amount)
            .bind(now)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        }
        None => {
            sqlx::query_as::<_, Budget>(
                r#"
                INSERT INTO budgets (user_id, category_id, month, amount, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(category_id)
            .bind(month)
            .bind(amount)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    tx.commit().await?;
    Ok(budget)
}

pub async fn soft_delete_budget(pool: &Pool<Sqlite>, user_id: i64, budget_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE budgets SET deleted_at = ?
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now_ms())
    .bind(budget_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
