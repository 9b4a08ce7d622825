pub mod budget;
pub mod category;
pub mod saving_goal;
pub mod summary;
pub mod transaction;
pub mod user;

pub use budget::Budget;
pub use category::{Category, NewCategory};
pub use saving_goal::{NewSavingsGoal, SavingsGoal};
pub use summary::{CategoryBreakdown, DailySummary, GoalWithProgress, MonthlySummary, SummaryBucket};
pub use transaction::{NewTransaction, Transaction, TransactionDetail, TransactionType};
pub use user::User;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::finance::kst;

/// Reads an epoch-millisecond column as a UTC instant.
pub(crate) fn instant(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let ms: i64 = row.try_get(column)?;
    kst::from_millis(ms).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn opt_instant(row: &SqliteRow, column: &str) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    let ms: Option<i64> = row.try_get(column)?;
    ms.map(|ms| {
        kst::from_millis(ms).map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
    })
    .transpose()
}
