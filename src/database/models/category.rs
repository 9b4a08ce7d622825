use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use super::{instant, opt_instant, TransactionType};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    pub color: String,
    pub icon: String,
    pub default_budget: Option<i64>,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl<'r> FromRow<'r, SqliteRow> for Category {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Category {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            r#type: row.try_get("type")?,
            color: row.try_get("color")?,
            icon: row.try_get("icon")?,
            default_budget: row.try_get("default_budget")?,
            sort_order: row.try_get("sort_order")?,
            created_at: instant(row, "created_at")?,
            deleted_at: opt_instant(row, "deleted_at")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub r#type: TransactionType,
    pub color: String,
    pub icon: String,
    pub default_budget: Option<i64>,
    pub sort_order: i64,
}

impl NewCategory {
    fn seed(name: &str, r#type: TransactionType, color: &str, icon: &str, sort_order: i64) -> Self {
        Self {
            name: name.to_string(),
            r#type,
            color: color.to_string(),
            icon: icon.to_string(),
            default_budget: None,
            sort_order,
        }
    }

    /// Starter set inserted by `POST /api/categories/seed`.
    pub fn defaults() -> Vec<NewCategory> {
        use TransactionType::{Expense, Income};
        vec![
            Self::seed("식비", Expense, "#FF7043", "🍚", 1),
            Self::seed("교통", Expense, "#42A5F5", "🚌", 2),
            Self::seed("주거/통신", Expense, "#8D6E63", "🏠", 3),
            Self::seed("생활용품", Expense, "#AB47BC", "🧺", 4),
            Self::seed("의료/건강", Expense, "#EF5350", "💊", 5),
            Self::seed("문화/여가", Expense, "#FFCA28", "🎬", 6),
            Self::seed("교육", Expense, "#5C6BC0", "📚", 7),
            Self::seed("경조사", Expense, "#EC407A", "🎁", 8),
            Self::seed("기타", Expense, "#9E9E9E", "📦", 9),
            Self::seed("급여", Income, "#66BB6A", "💰", 1),
            Self::seed("부수입", Income, "#26A69A", "💵", 2),
            Self::seed("용돈", Income, "#9CCC65", "👛", 3),
            Self::seed("기타수입", Income, "#78909C", "➕", 4),
        ]
    }
}
