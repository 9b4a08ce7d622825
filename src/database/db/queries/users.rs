use sqlx::{Pool, Sqlite};

use super::now_ms;
use crate::database::models::User;

/*==========User Queries=========== */

pub async fn create_user(pool: &Pool<Sqlite>, email: &str, name: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, name, created_at)
        VALUES (?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(now_ms())
    .fetch_one(pool)
    .await
}

pub async fn get_user(pool: &Pool<Sqlite>, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn soft_delete_user(pool: &Pool<Sqlite>, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users SET deleted_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now_ms())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
