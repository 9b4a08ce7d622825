use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Pool, Row, Sqlite};

use crate::database::models::{SummaryBucket, TransactionType};
use crate::finance::kst::{KST_OFFSET_MS, MS_PER_DAY};
use crate::finance::TimeRange;

/*==========Report Queries=========== */
// Every number here is computed by SQLite; nothing is summed in Rust.

/// Totals for one period split the way the summaries need them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub income: SummaryBucket,
    /// EXPENSE rows without a savings goal.
    pub spending: SummaryBucket,
    /// EXPENSE rows linked to a savings goal.
    pub savings: SummaryBucket,
}

impl PeriodTotals {
    /// All EXPENSE rows, contributions included. `None` if the total leaves `i64`.
    pub fn gross_expense(&self) -> Option<SummaryBucket> {
        Some(SummaryBucket {
            total: self.spending.total.checked_add(self.savings.total)?,
            count: self.spending.count + self.savings.count,
        })
    }
}

pub async fn period_totals(
    pool: &Pool<Sqlite>,
    user_id: i64,
    range: TimeRange,
) -> Result<PeriodTotals, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT
            type,
            savings_goal_id IS NOT NULL AS is_savings,
            COALESCE(SUM(amount), 0)    AS total,
            COUNT(*)                    AS cnt
        FROM transactions
        WHERE user_id = ?
          AND deleted_at IS NULL
          AND occurred_at BETWEEN ? AND ?
        GROUP BY type, is_savings
        "#,
    )
    .bind(user_id)
    .bind(range.start_ms())
    .bind(range.end_ms())
    .fetch_all(pool)
    .await?;

    let mut totals = PeriodTotals::default();
    for row in rows {
        let r#type: TransactionType = row.try_get("type")?;
        let is_savings: bool = row.try_get("is_savings")?;
        let bucket = SummaryBucket {
            total: row.try_get("total")?,
            count: row.try_get("cnt")?,
        };

        let slot = match (r#type, is_savings) {
            (TransactionType::Income, _) => &mut totals.income,
            (TransactionType::Expense, false) => &mut totals.spending,
            (TransactionType::Expense, true) => &mut totals.savings,
        };
        slot.total += bucket.total;
        slot.count += bucket.count;
    }

    Ok(totals)
}

/// One grouped expense category, already joined with its display fields and
/// the category budget for the month.
#[derive(Debug, Clone)]
pub struct CategoryTotalRow {
    pub category_id: i64,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub total: i64,
    pub count: i64,
    /// Month budget row for the category, else the category default.
    pub budget: Option<i64>,
}

impl<'r> FromRow<'r, SqliteRow> for CategoryTotalRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(CategoryTotalRow {
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            color: row.try_get("color")?,
            icon: row.try_get("icon")?,
            total: row.try_get("total")?,
            count: row.try_get("cnt")?,
            budget: row.try_get("budget")?,
        })
    }
}

/// Expense totals grouped by category. The inner join drops groups whose
/// category row no longer exists; soft-deleted categories still resolve.
pub async fn expense_by_category(
    pool: &Pool<Sqlite>,
    user_id: i64,
    range: TimeRange,
    month: NaiveDate,
) -> Result<Vec<CategoryTotalRow>, sqlx::Error> {
    sqlx::query_as::<_, CategoryTotalRow>(
        r#"
        SELECT
            g.category_id                     AS category_id,
            c.name                            AS name,
            c.color                           AS color,
            c.icon                            AS icon,
            g.total                           AS total,
            g.cnt                             AS cnt,
            COALESCE(b.amount, c.default_budget) AS budget
        FROM (
            SELECT category_id, SUM(amount) AS total, COUNT(*) AS cnt
            FROM transactions
            WHERE user_id = ?
              AND deleted_at IS NULL
              AND type = 'EXPENSE'
              AND category_id IS NOT NULL
              AND occurred_at BETWEEN ? AND ?
            GROUP BY category_id
        ) g
        JOIN categories c
          ON c.id = g.category_id AND c.user_id = ?
        LEFT JOIN budgets b
          ON b.user_id = ? AND b.category_id = g.category_id
         AND b.month = ? AND b.deleted_at IS NULL
        ORDER BY g.total DESC, g.category_id ASC
        "#,
    )
    .bind(user_id)
    .bind(range.start_ms())
    .bind(range.end_ms())
    .bind(user_id)
    .bind(user_id)
    .bind(month)
    .fetch_all(pool)
    .await
}

/// Gross expense per KST day in the range as `(kst day number, sum)`. Days
/// without rows are absent.
pub async fn daily_expense_sums(
    pool: &Pool<Sqlite>,
    user_id: i64,
    range: TimeRange,
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT
            (occurred_at + ?) / ? AS day_number,
            SUM(amount)           AS total
        FROM transactions
        WHERE user_id = ?
          AND deleted_at IS NULL
          AND type = 'EXPENSE'
          AND occurred_at BETWEEN ? AND ?
        GROUP BY day_number
        ORDER BY day_number
        "#,
    )
    .bind(KST_OFFSET_MS)
    .bind(MS_PER_DAY)
    .bind(user_id)
    .bind(range.start_ms())
    .bind(range.end_ms())
    .fetch_all(pool)
    .await
}
