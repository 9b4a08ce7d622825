use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use super::{instant, opt_instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub icon: String,
    pub target_amount: i64,
    /// Only grows, and only through deposits.
    pub current_amount: i64,
    pub target_year: i32,
    pub target_month: u32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl<'r> FromRow<'r, SqliteRow> for SavingsGoal {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(SavingsGoal {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            icon: row.try_get("icon")?,
            target_amount: row.try_get("target_amount")?,
            current_amount: row.try_get("current_amount")?,
            target_year: row.try_get("target_year")?,
            target_month: row.try_get("target_month")?,
            is_primary: row.try_get("is_primary")?,
            created_at: instant(row, "created_at")?,
            deleted_at: opt_instant(row, "deleted_at")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewSavingsGoal {
    pub name: String,
    pub icon: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub target_year: i32,
    pub target_month: u32,
    pub is_primary: bool,
}
