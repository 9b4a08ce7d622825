use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use super::now_ms;
use crate::database::models::{NewSavingsGoal, SavingsGoal, Transaction, TransactionType};

/*==========Savings Goal Queries=========== */

/// Primary goal first, then by target month.
pub async fn list_goals(pool: &Pool<Sqlite>, user_id: i64) -> Result<Vec<SavingsGoal>, sqlx::Error> {
    sqlx::query_as::<_, SavingsGoal>(
        r#"
        SELECT * FROM savings_goals
        WHERE user_id = ? AND deleted_at IS NULL
        ORDER BY is_primary DESC, target_year ASC, target_month ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get_goal(pool: &Pool<Sqlite>, user_id: i64, goal_id: i64) -> Result<Option<SavingsGoal>, sqlx::Error> {
    sqlx::query_as::<_, SavingsGoal>(
        r#"
        SELECT * FROM savings_goals
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(goal_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn create_goal(pool: &Pool<Sqlite>, user_id: i64, g: &NewSavingsGoal) -> Result<SavingsGoal, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if g.is_primary {
        sqlx::query("UPDATE savings_goals SET is_primary = 0 WHERE user_id = ? AND is_primary = 1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    let goal = sqlx::query_as::<_, SavingsGoal>(
        r#"
        INSERT INTO savings_goals (
            user_id, name, icon, target_amount, current_amount,
            target_year, target_month, is_primary, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&g.name)
    .bind(&g.icon)
    .bind(g.target_amount)
    .bind(g.current_amount)
    .bind(g.target_year)
    .bind(g.target_month)
    .bind(g.is_primary)
    .bind(now_ms())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(goal)
}

/// Writes name, icon, target amount and target month. `current_amount` only
/// moves through [`deposit`].
pub async fn update_goal(pool: &Pool<Sqlite>, g: &SavingsGoal) -> Result<Option<SavingsGoal>, sqlx::Error> {
    sqlx::query_as::<_, SavingsGoal>(
        r#"
        UPDATE savings_goals
        SET name = ?, icon = ?, target_amount = ?, target_year = ?, target_month = ?
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(&g.name)
    .bind(&g.icon)
    .bind(g.target_amount)
    .bind(g.target_year)
    .bind(g.target_month)
    .bind(g.id)
    .bind(g.user_id)
    .fetch_optional(pool)
    .await
}

/// Makes `goal_id` the only primary goal of the user.
pub async fn set_primary(pool: &Pool<Sqlite>, user_id: i64, goal_id: i64) -> Result<Option<SavingsGoal>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE savings_goals SET is_primary = 0 WHERE user_id = ? AND id <> ?")
        .bind(user_id)
        .bind(goal_id)
        .execute(&mut *tx)
        .await?;

    let goal = sqlx::query_as::<_, SavingsGoal>(
        r#"
        UPDATE savings_goals SET is_primary = 1
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(goal_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    // unknown goal: leave the other flags alone
    if goal.is_some() {
        tx.commit().await?;
    } else {
        tx.rollback().await?;
    }
    Ok(goal)
}

pub async fn soft_delete_goal(pool: &Pool<Sqlite>, user_id: i64, goal_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE savings_goals SET deleted_at = ?, is_primary = 0
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(now_ms())
    .bind(goal_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/* The goal balance and its EXPENSE row are written in one SQL transaction:
either both become visible or neither does. Returns None (and writes nothing)
when the goal does not exist for this owner. */
pub async fn deposit(
    pool: &Pool<Sqlite>,
    user_id: i64,
    goal_id: i64,
    amount: i64,
    occurred_at: DateTime<Utc>,
) -> Result<Option<(SavingsGoal, Transaction)>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // step 1: bump the goal balance
    let goal = sqlx::query_as::<_, SavingsGoal>(
        r#"
        UPDATE savings_goals
        SET current_amount = current_amount + ?
        WHERE id = ? AND user_id = ? AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(amount)
    .bind(goal_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(goal) = goal else {
        tx.rollback().await?;
        return Ok(None);
    };

    // step 2: record the contribution
    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (
            user_id, type, amount, occurred_at, category_id,
            savings_goal_id, description, created_at
        )
        VALUES (?, ?, ?, ?, NULL, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(TransactionType::Expense)
    .bind(amount)
    .bind(occurred_at.timestamp_millis())
    .bind(goal.id)
    .bind(format!("{} 저축", goal.name))
    .bind(now_ms())
    .fetch_one(&mut *tx)
    .await?;

    // step 3: commit
    tx.commit().await?;

    Ok(Some((goal, transaction)))
}

/// (sum of current, sum of target, count) over every live goal.
pub async fn goal_totals(pool: &Pool<Sqlite>, user_id: i64) -> Result<(i64, i64, i64), sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(current_amount), 0),
            COALESCE(SUM(target_amount), 0),
            COUNT(*)
        FROM savings_goals
        WHERE user_id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
