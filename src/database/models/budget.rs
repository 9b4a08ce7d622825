use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use super::{instant, opt_instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    /// `None` is the whole-month budget.
    pub category_id: Option<i64>,
    /// Always the first day of the month.
    pub month: NaiveDate,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl<'r> FromRow<'r, SqliteRow> for Budget {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Budget {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            category_id: row.try_get("category_id")?,
            month: row.try_get("month")?,
            amount: row.try_get("amount")?,
            created_at: instant(row, "created_at")?,
            updated_at: instant(row, "updated_at")?,
            deleted_at: opt_instant(row, "deleted_at")?,
        })
    }
}
