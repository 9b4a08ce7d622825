//! Request payloads. Required fields are `Option` so a missing one produces
//! a specific message instead of a generic deserialization failure.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::database::models::{Category, NewCategory, NewSavingsGoal, SavingsGoal, Transaction, TransactionType};
use crate::error::{AppError, Result};
use crate::finance::{kst, MAX_AMOUNT};

pub const MAX_PAGE_SIZE: i64 = 500;

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| AppError::validation(format!("{field} is required")))
}

fn non_blank(value: Option<String>, field: &str) -> Result<String> {
    let value = required(value, field)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn at_most_max(value: i64, field: &str) -> Result<i64> {
    if value > MAX_AMOUNT {
        return Err(AppError::validation(format!("{field} must not exceed {MAX_AMOUNT}")));
    }
    Ok(value)
}

fn positive(value: Option<i64>, field: &str) -> Result<i64> {
    let value = required(value, field)?;
    if value <= 0 {
        return Err(AppError::validation(format!("{field} must be greater than 0")));
    }
    at_most_max(value, field)
}

fn non_negative(value: i64, field: &str) -> Result<i64> {
    if value < 0 {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    at_most_max(value, field)
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Year and month must come together; month is checked against the calendar.
pub fn year_month(year: Option<i32>, month: Option<u32>) -> Result<(i32, u32)> {
    let year = required(year, "year")?;
    let month = required(month, "month")?;
    if !(1970..=9999).contains(&year) {
        return Err(AppError::validation(format!("Invalid year: {year}")));
    }
    kst::first_of_month(year, month)?;
    Ok((year, month))
}

/*========== Users ========== */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<(String, String)> {
        let email = non_blank(self.email, "email")?;
        if !email.contains('@') {
            return Err(AppError::validation("email is not valid"));
        }
        let name = non_blank(self.name, "name")?;
        Ok((email, name))
    }
}

/*========== Categories ========== */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    #[serde(rename = "type")]
    pub r#type: Option<TransactionType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<TransactionType>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub default_budget: Option<i64>,
    pub sort_order: Option<i64>,
}

impl CreateCategoryRequest {
    pub fn validate(self) -> Result<NewCategory> {
        Ok(NewCategory {
            name: non_blank(self.name, "name")?,
            r#type: required(self.r#type, "type")?,
            color: self.color.unwrap_or_else(|| "#9E9E9E".to_string()),
            icon: self.icon.unwrap_or_default(),
            default_budget: self
                .default_budget
                .map(|b| non_negative(b, "defaultBudget"))
                .transpose()?,
            sort_order: self.sort_order.unwrap_or(0),
        })
    }
}

/// Each present field replaces the stored value; `defaultBudget: null` clears it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<TransactionType>,
    pub color: Option<String>,
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub default_budget: Option<Option<i64>>,
    pub sort_order: Option<i64>,
}

impl UpdateCategoryRequest {
    pub fn changes_type(&self, current: &Category) -> bool {
        self.r#type.is_some_and(|t| t != current.r#type)
    }

    pub fn apply(self, category: &mut Category) -> Result<()> {
        if let Some(name) = self.name {
            category.name = non_blank(Some(name), "name")?;
        }
        if let Some(r#type) = self.r#type {
            category.r#type = r#type;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
        if let Some(icon) = self.icon {
            category.icon = icon;
        }
        if let Some(default_budget) = self.default_budget {
            category.default_budget = default_budget
                .map(|b| non_negative(b, "defaultBudget"))
                .transpose()?;
        }
        if let Some(sort_order) = self.sort_order {
            category.sort_order = sort_order;
        }
        Ok(())
    }
}

/*========== Transactions ========== */

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    #[serde(rename = "type")]
    pub r#type: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TransactionQuery {
    /// Month filter if either part was given (then both are required).
    pub fn month(&self) -> Result<Option<(i32, u32)>> {
        if self.year.is_none() && self.month.is_none() {
            return Ok(None);
        }
        year_month(self.year, self.month).map(Some)
    }

    pub fn page(&self) -> Result<(Option<i64>, Option<i64>)> {
        if let Some(limit) = self.limit {
            if !(1..=MAX_PAGE_SIZE).contains(&limit) {
                return Err(AppError::validation(format!(
                    "limit must be between 1 and {MAX_PAGE_SIZE}"
                )));
            }
        }
        let offset = self.offset.map(|o| non_negative(o, "offset")).transpose()?;
        Ok((self.limit, offset))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub r#type: Option<TransactionType>,
    pub amount: Option<i64>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
}

/// Validated create payload; the category still has to be checked against the store.
#[derive(Debug)]
pub struct ValidTransaction {
    pub r#type: TransactionType,
    pub amount: i64,
    pub occurred_at: Option<DateTime<Utc>>,
    pub category_id: i64,
    pub description: Option<String>,
}

impl CreateTransactionRequest {
    pub fn validate(self) -> Result<ValidTransaction> {
        Ok(ValidTransaction {
            r#type: required(self.r#type, "type")?,
            amount: positive(self.amount, "amount")?,
            occurred_at: self.occurred_at,
            category_id: required(self.category_id, "categoryId")?,
            description: self.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    #[serde(rename = "type")]
    pub r#type: Option<TransactionType>,
    pub amount: Option<i64>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

impl UpdateTransactionRequest {
    pub fn apply(self, t: &mut Transaction) -> Result<()> {
        if let Some(r#type) = self.r#type {
            t.r#type = r#type;
        }
        if self.amount.is_some() {
            t.amount = positive(self.amount, "amount")?;
        }
        if let Some(occurred_at) = self.occurred_at {
            t.occurred_at = occurred_at;
        }
        if let Some(category_id) = self.category_id {
            t.category_id = Some(category_id);
        }
        if let Some(description) = self.description {
            t.description = description.filter(|d| !d.trim().is_empty());
        }
        Ok(())
    }
}

/*========== Budgets ========== */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertBudgetRequest {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub category_id: Option<i64>,
    pub amount: Option<i64>,
}

impl UpsertBudgetRequest {
    pub fn validate(self) -> Result<(Option<i64>, NaiveDate, i64)> {
        let (year, month) = year_month(self.year, self.month)?;
        let amount = non_negative(required(self.amount, "amount")?, "amount")?;
        Ok((self.category_id, kst::first_of_month(year, month)?, amount))
    }
}

/*========== Savings goals ========== */

fn target_month(year: Option<i32>, month: Option<u32>) -> Result<(i32, u32)> {
    let year = required(year, "targetYear")?;
    let month = required(month, "targetMonth")?;
    if !(1..=12).contains(&month) {
        return Err(AppError::validation(format!("Invalid targetMonth: {month}")));
    }
    if !(1970..=9999).contains(&year) {
        return Err(AppError::validation(format!("Invalid targetYear: {year}")));
    }
    Ok((year, month))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub target_amount: Option<i64>,
    pub target_year: Option<i32>,
    pub target_month: Option<u32>,
    #[serde(default)]
    pub is_primary: bool,
}

impl CreateGoalRequest {
    /// Goals start empty; the balance only grows through deposits.
    pub fn validate(self) -> Result<NewSavingsGoal> {
        let (target_year, target_month) = target_month(self.target_year, self.target_month)?;
        Ok(NewSavingsGoal {
            name: non_blank(self.name, "name")?,
            icon: self.icon.unwrap_or_default(),
            target_amount: positive(self.target_amount, "targetAmount")?,
            current_amount: 0,
            target_year,
            target_month,
            is_primary: self.is_primary,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub target_amount: Option<i64>,
    pub target_year: Option<i32>,
    pub target_month: Option<u32>,
}

impl UpdateGoalRequest {
    pub fn apply(self, goal: &mut SavingsGoal) -> Result<()> {
        if let Some(name) = self.name {
            goal.name = non_blank(Some(name), "name")?;
        }
        if let Some(icon) = self.icon {
            goal.icon = icon;
        }
        if self.target_amount.is_some() {
            goal.target_amount = positive(self.target_amount, "targetAmount")?;
        }
        if self.target_year.is_some() || self.target_month.is_some() {
            let (year, month) = target_month(
                self.target_year.or(Some(goal.target_year)),
                self.target_month.or(Some(goal.target_month)),
            )?;
            goal.target_year = year;
            goal.target_month = month;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub amount: Option<i64>,
}

impl DepositRequest {
    pub fn validate(self) -> Result<i64> {
        positive(self.amount, "amount")
    }
}

/*========== Summaries & calendar ========== */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl HolidayQuery {
    pub fn validate(&self) -> Result<(i32, Option<u32>)> {
        let year = required(self.year, "year")?;
        if let Some(month) = self.month {
            kst::first_of_month(year, month)?;
        }
        Ok((year, self.month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_name_the_field() {
        let err = CreateTransactionRequest {
            r#type: Some(TransactionType::Expense),
            amount: None,
            occurred_at: None,
            category_id: Some(1),
            description: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "amount is required");
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for amount in [0, -5] {
            let err = DepositRequest { amount: Some(amount) }.validate().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(DepositRequest { amount: Some(50_000) }.validate().unwrap(), 50_000);
    }

    #[test]
    fn amounts_are_capped() {
        assert_eq!(DepositRequest { amount: Some(MAX_AMOUNT) }.validate().unwrap(), MAX_AMOUNT);

        let err = DepositRequest { amount: Some(MAX_AMOUNT + 1) }.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let budget = UpsertBudgetRequest {
            year: Some(2025),
            month: Some(3),
            category_id: None,
            amount: Some(i64::MAX),
        }
        .validate();
        assert!(matches!(budget, Err(AppError::Validation(_))));

        let tx = CreateTransactionRequest {
            r#type: Some(TransactionType::Expense),
            amount: Some(i64::MAX / 2 + 1),
            occurred_at: None,
            category_id: Some(1),
            description: None,
        }
        .validate();
        assert!(matches!(tx, Err(AppError::Validation(_))));
    }

    #[test]
    fn year_and_month_travel_together() {
        assert!(year_month(Some(2025), None).is_err());
        assert!(year_month(None, Some(3)).is_err());
        assert!(year_month(Some(2025), Some(13)).is_err());
        assert_eq!(year_month(Some(2025), Some(3)).unwrap(), (2025, 3));

        let q = TransactionQuery::default();
        assert_eq!(q.month().unwrap(), None);
    }

    #[test]
    fn budget_month_is_first_of_month() {
        let (category, month, amount) = UpsertBudgetRequest {
            year: Some(2025),
            month: Some(2),
            category_id: None,
            amount: Some(50_000),
        }
        .validate()
        .unwrap();
        assert_eq!(category, None);
        assert_eq!(month, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(amount, 50_000);
    }

    #[test]
    fn explicit_null_clears_default_budget() {
        let absent: UpdateCategoryRequest = serde_json::from_str(r#"{"name":"외식"}"#).unwrap();
        assert_eq!(absent.default_budget, None);

        let cleared: UpdateCategoryRequest = serde_json::from_str(r#"{"defaultBudget":null}"#).unwrap();
        assert_eq!(cleared.default_budget, Some(None));

        let set: UpdateCategoryRequest = serde_json::from_str(r#"{"defaultBudget":300000}"#).unwrap();
        assert_eq!(set.default_budget, Some(Some(300_000)));
    }

    #[test]
    fn goal_update_keeps_unspecified_fields() {
        let mut goal = SavingsGoal {
            id: 1,
            user_id: 1,
            name: "여행".into(),
            icon: "✈️".into(),
            target_amount: 2_000_000,
            current_amount: 500_000,
            target_year: 2026,
            target_month: 6,
            is_primary: false,
            created_at: Utc::now(),
            deleted_at: None,
        };
        UpdateGoalRequest { target_month: Some(9), ..Default::default() }
            .apply(&mut goal)
            .unwrap();
        assert_eq!((goal.target_year, goal.target_month), (2026, 9));
        assert_eq!(goal.current_amount, 500_000);

        let err = UpdateGoalRequest { target_month: Some(0), ..Default::default() }.apply(&mut goal);
        assert!(err.is_err());
    }
}
