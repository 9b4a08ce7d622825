use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use super::{instant, opt_instant};

/// Shared by transactions and the categories they reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    pub amount: i64,
    pub occurred_at: DateTime<Utc>,
    pub category_id: Option<i64>,
    pub savings_goal_id: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// EXPENSE rows linked to a goal are deposits, not spending.
    pub fn is_savings_contribution(&self) -> bool {
        self.r#type == TransactionType::Expense && self.savings_goal_id.is_some()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Transaction {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Transaction {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            r#type: row.try_get("type")?,
            amount: row.try_get("amount")?,
            occurred_at: instant(row, "occurred_at")?,
            category_id: row.try_get("category_id")?,
            savings_goal_id: row.try_get("savings_goal_id")?,
            description: row.try_get("description")?,
            created_at: instant(row, "created_at")?,
            deleted_at: opt_instant(row, "deleted_at")?,
        })
    }
}

/// A transaction with the display fields of its category or goal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub category_icon: Option<String>,
    pub savings_goal_name: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for TransactionDetail {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(TransactionDetail {
            transaction: Transaction::from_row(row)?,
            category_name: row.try_get("category_name")?,
            category_color: row.try_get("category_color")?,
            category_icon: row.try_get("category_icon")?,
            savings_goal_name: row.try_get("savings_goal_name")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub r#type: TransactionType,
    pub amount: i64,
    pub occurred_at: DateTime<Utc>,
    pub category_id: Option<i64>,
    pub savings_goal_id: Option<i64>,
    pub description: Option<String>,
}
