use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use super::ensure_owner;
use crate::database::db::queries::{budgets, reports};
use crate::database::models::{CategoryBreakdown, DailySummary, MonthlySummary};
use crate::error::{AppError, Result};
use crate::finance::{aggregate, holidays, kst, BudgetUsage, DailyAmount};

pub const DEFAULT_SERIES_DAYS: u32 = 7;
pub const MAX_SERIES_DAYS: u32 = 31;

/// Income, spending and savings for the KST day containing `now`.
pub async fn today_summary(pool: &Pool<Sqlite>, user_id: i64, now: DateTime<Utc>) -> Result<DailySummary> {
    ensure_owner(user_id)?;

    let totals = reports::period_totals(pool, user_id, kst::today_range(now)).await?;
    let date = kst::kst_date(now);

    Ok(DailySummary {
        date,
        weekday: kst::to_kst(now).weekday,
        holiday: holidays::holiday_name(date),
        income: totals.income,
        expense: totals.spending,
        savings: totals.savings,
    })
}

pub async fn monthly_summary(pool: &Pool<Sqlite>, user_id: i64, year: i32, month: u32) -> Result<MonthlySummary> {
    ensure_owner(user_id)?;
    if !(1970..=9999).contains(&year) {
        return Err(AppError::validation(format!("Invalid year: {year}")));
    }

    let range = kst::month_range(year, month)?;
    let first = kst::first_of_month(year, month)?;

    let totals = reports::period_totals(pool, user_id, range).await?;
    let by_category = reports::expense_by_category(pool, user_id, range, first).await?;
    let budget_amount = budgets::whole_month_budget(pool, user_id, first).await?.unwrap_or(0);

    let overflow = || AppError::Internal(format!("expense totals overflow for {year}-{month:02}"));
    let expense = totals.gross_expense().ok_or_else(overflow)?;
    let balance = totals.income.total.checked_sub(expense.total).ok_or_else(overflow)?;

    let mut categories: Vec<CategoryBreakdown> = by_category
        .into_iter()
        .map(|row| CategoryBreakdown {
            id: row.category_id,
            name: row.name,
            color: row.color,
            icon: row.icon,
            total: row.total,
            count: row.count,
            budget: row.budget.map(|amount| BudgetUsage::new(amount, row.total)),
        })
        .collect();
    aggregate::sort_by_total_desc(&mut categories, |c| (c.total, c.id));

    tracing::debug!(user_id, year, month, categories = categories.len(), "monthly summary computed");

    Ok(MonthlySummary {
        year,
        month,
        total_income: totals.income.total,
        total_expense: expense.total,
        total_savings: totals.savings.total,
        balance,
        income_count: totals.income.count,
        expense_count: expense.count,
        savings_count: totals.savings.count,
        categories,
        budget: BudgetUsage::new(budget_amount, expense.total),
    })
}

/// Gross expense for each of the last `days` KST days, oldest first, zero-filled.
pub async fn expense_series(
    pool: &Pool<Sqlite>,
    user_id: i64,
    now: DateTime<Utc>,
    days: u32,
) -> Result<Vec<DailyAmount>> {
    ensure_owner(user_id)?;
    if !(1..=MAX_SERIES_DAYS).contains(&days) {
        return Err(AppError::validation(format!(
            "days must be between 1 and {MAX_SERIES_DAYS}"
        )));
    }

    let dates = kst::last_n_days(now, days)?;
    let range = kst::last_n_days_range(now, days)?;
    let grouped = reports::daily_expense_sums(pool, user_id, range).await?;

    Ok(aggregate::fill_daily_series(&dates, &grouped))
}
