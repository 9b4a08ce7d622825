use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{Pool, Sqlite};

use super::ensure_owner;
use crate::database::db::queries::savings;
use crate::database::models::{GoalWithProgress, SavingsGoal, Transaction};
use crate::error::{AppError, Result};
use crate::finance::{kst, progress, GoalProgress, SavingsTotals, MAX_AMOUNT};

/// Progress of one goal as of the KST month containing `now`.
pub fn progress_of(goal: &SavingsGoal, now: DateTime<Utc>) -> GoalProgress {
    GoalProgress::compute(
        goal.target_amount,
        goal.current_amount,
        (goal.target_year, goal.target_month),
        kst::kst_year_month(now),
    )
}

/// Goals whose target month has not passed yet, with their progress.
pub async fn list_goal_progress(
    pool: &Pool<Sqlite>,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<Vec<GoalWithProgress>> {
    ensure_owner(user_id)?;
    let (year, month) = kst::kst_year_month(now);

    let goals = savings::list_goals(pool, user_id).await?;
    Ok(goals
        .into_iter()
        .filter(|g| progress::is_active(g.target_year, g.target_month, year, month))
        .map(|goal| {
            let progress = progress_of(&goal, now);
            GoalWithProgress { goal, progress }
        })
        .collect())
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositReceipt {
    pub goal: GoalWithProgress,
    pub transaction: Transaction,
}

/// Adds `amount` to the goal and records the matching EXPENSE row, atomically.
pub async fn deposit(
    pool: &Pool<Sqlite>,
    user_id: i64,
    goal_id: i64,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<DepositReceipt> {
    ensure_owner(user_id)?;
    if amount <= 0 {
        return Err(AppError::validation("amount must be greater than 0"));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::validation(format!("amount must not exceed {MAX_AMOUNT}")));
    }

    let (goal, transaction) = savings::deposit(pool, user_id, goal_id, amount, now)
        .await?
        .ok_or_else(|| AppError::not_found("Savings goal"))?;

    tracing::info!(user_id, goal_id, amount, current = goal.current_amount, "savings deposit recorded");

    let progress = progress_of(&goal, now);
    Ok(DepositReceipt {
        goal: GoalWithProgress { goal, progress },
        transaction,
    })
}

/// Totals over every live goal, active or expired.
pub async fn savings_summary(pool: &Pool<Sqlite>, user_id: i64) -> Result<SavingsTotals> {
    ensure_owner(user_id)?;
    let (current, target, count) = savings::goal_totals(pool, user_id).await?;
    Ok(SavingsTotals::new(current, target, count))
}
