use chrono::NaiveDate;
use serde::Serialize;

use super::SavingsGoal;
use crate::finance::{BudgetUsage, GoalProgress};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryBucket {
    pub total: i64,
    pub count: i64,
}

/// One KST day. `expense` leaves out savings contributions, which are
/// reported separately under `savings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub weekday: u32,
    pub holiday: Option<String>,
    pub income: SummaryBucket,
    pub expense: SummaryBucket,
    pub savings: SummaryBucket,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub total: i64,
    pub count: i64,
    /// Category budget for the month, falling back to the category default.
    pub budget: Option<BudgetUsage>,
}

/// One KST month. `total_expense` is gross: savings contributions are
/// included here and also reported on their own as `total_savings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: i64,
    pub total_expense: i64,
    pub total_savings: i64,
    pub balance: i64,
    pub income_count: i64,
    pub expense_count: i64,
    pub savings_count: i64,
    pub categories: Vec<CategoryBreakdown>,
    /// Whole-month budget. Amount is 0 when none is set.
    pub budget: BudgetUsage,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalWithProgress {
    #[serde(flatten)]
    pub goal: SavingsGoal,
    #[serde(flatten)]
    pub progress: GoalProgress,
}
