use sqlx::{Pool, Sqlite};

use super::now_ms;
use crate::database::models::{Category, NewCategory, TransactionType};

/*==========Category Queries=========== */

pub async fn list_categories(
    pool: &Pool<Sqlite>,
    user_id: i64,
    r#type: Option<TransactionType>,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT * FROM categories
        WHERE user_id = ?
          AND deleted_at IS NULL
          AND (? IS NULL OR type = ?)
        ORDER BY type ASC, sort_order ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(r#type)
    .bind(r#type)
    .fetch_all(pool)
    .await
}

pub async fn get_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT * FROM categories
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(category_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_categories(pool: &Pool<Sqlite>, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM categories WHERE user_id = ? AND deleted_at IS NULL",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn create_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    c: &NewCategory,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (user_id, name, type, color, icon, default_budget, sort_order, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&c.name)
    .bind(c.r#type)
    .bind(&c.color)
    .bind(&c.icon)
    .bind(c.default_budget)
    .bind(c.sort_order)
    .bind(now_ms())
    .fetch_one(pool)
    .await
}

/// Inserts the whole batch or nothing.
pub async fn seed_categories(
    pool: &Pool<Sqlite>,
    user_id: i64,
    categories: &[NewCategory],
) -> Result<Vec<Category>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let created_at = now_ms();

    let mut out = Vec::with_capacity(categories.len());
    for c in categories {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name, type, color, icon, default_budget, sort_order, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&c.name)
        .bind(c.r#type)
        .bind(&c.color)
        .bind(&c.icon)
        .bind(c.default_budget)
        .bind(c.sort_order)
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;
        out.push(row);
    }

    tx.commit().await?;
    Ok(out)
}

/// Writes every mutable column of `c`.
pub async fn update_category(pool: &Pool<Sqlite>, c: &Category) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET name = ?, type = ?, color = ?, icon = ?, default_budget = ?, sort_order = ?
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(&c.name)
    .bind(c.r#type)
    .bind(&c.color)
    .bind(&c.icon)
    .bind(c.default_budget)
    .bind(c.sort_order)
    .bind(c.id)
    .bind(c.user_id)
    .fetch_optional(pool)
    .await
}

/// Whether any live transaction or budget points at the category.
pub async fn category_in_use(pool: &Pool<Sqlite>, user_id: i64, category_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM transactions
            WHERE user_id = ? AND category_id = ? AND deleted_at IS NULL
        ) OR EXISTS (
            SELECT 1 FROM budgets
            WHERE user_id = ? AND category_id = ? AND deleted_at IS NULL
        )
        "#,
    )
    .bind(user_id)
    .bind(category_id)
    .bind(user_id)
    .bind(category_id)
    .fetch_one(pool)
    .await
}

pub async fn soft_delete_category(pool: &Pool<Sqlite>, user_id: i64, category_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE categories SET deleted_at = ?
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now_ms())
    .bind(category_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
