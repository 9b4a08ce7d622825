//! Savings goal progress: months left, required monthly deposit and percent done.

use serde::Serialize;

use super::aggregate::percent;

/// A goal is active until its target month has fully passed.
pub fn is_active(target_year: i32, target_month: u32, current_year: i32, current_month: u32) -> bool {
    target_year > current_year || (target_year == current_year && target_month >= current_month)
}

/// Floored at 1 so a goal due this month still divides cleanly.
pub fn months_remaining(target_year: i32, target_month: u32, current_year: i32, current_month: u32) -> i64 {
    let months = i64::from(target_year - current_year) * 12
        + (i64::from(target_month) - i64::from(current_month));
    months.max(1)
}

pub fn amount_remaining(target_amount: i64, current_amount: i64) -> i64 {
    target_amount.saturating_sub(current_amount).max(0)
}

/// `ceil(remaining / months)`; `months` is always >= 1 here.
pub fn monthly_required(amount_remaining: i64, months_remaining: i64) -> i64 {
    let months = months_remaining.max(1);
    amount_remaining / months + i64::from(amount_remaining % months != 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub months_remaining: i64,
    pub amount_remaining: i64,
    pub monthly_required: i64,
    pub progress_percent: i64,
}

impl GoalProgress {
    pub fn compute(
        target_amount: i64,
        current_amount: i64,
        target: (i32, u32),
        current: (i32, u32),
    ) -> Self {
        let months_remaining = months_remaining(target.0, target.1, current.0, current.1);
        let amount_remaining = amount_remaining(target_amount, current_amount);
        Self {
            months_remaining,
            amount_remaining,
            monthly_required: monthly_required(amount_remaining, months_remaining),
            progress_percent: percent(current_amount, target_amount),
        }
    }
}

/// Totals across every live goal, expired ones included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsTotals {
    pub total_current_amount: i64,
    pub total_target_amount: i64,
    pub goals_count: i64,
    pub progress_percent: i64,
}

impl SavingsTotals {
    pub fn new(total_current_amount: i64, total_target_amount: i64, goals_count: i64) -> Self {
        Self {
            total_current_amount,
            total_target_amount,
            goals_count,
            progress_percent: percent(total_current_amount, total_target_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_months_out() {
        let p = GoalProgress::compute(2_000_000, 500_000, (2026, 10), (2025, 10));
        assert_eq!(p.months_remaining, 12);
        assert_eq!(p.amount_remaining, 1_500_000);
        assert_eq!(p.monthly_required, 125_000);
        assert_eq!(p.progress_percent, 25);
    }

    #[test]
    fn due_this_month_is_clamped_to_one() {
        let p = GoalProgress::compute(1_000_000, 400_000, (2025, 10), (2025, 10));
        assert_eq!(p.months_remaining, 1);
        assert_eq!(p.monthly_required, 600_000);
    }

    #[test]
    fn required_amount_rounds_up() {
        assert_eq!(monthly_required(100, 3), 34);
        assert_eq!(monthly_required(99, 3), 33);
        assert_eq!(monthly_required(0, 5), 0);
    }

    #[test]
    fn huge_targets_do_not_overflow() {
        let p = GoalProgress::compute(i64::MAX, 0, (2026, 12), (2025, 12));
        assert_eq!(p.months_remaining, 12);
        assert_eq!(p.amount_remaining, i64::MAX);
        assert_eq!(p.monthly_required, i64::MAX / 12 + 1);
        assert_eq!(p.progress_percent, 0);

        assert_eq!(monthly_required(i64::MAX, 1), i64::MAX);
        assert_eq!(amount_remaining(i64::MAX, -1), i64::MAX);
    }

    #[test]
    fn overfunded_goal_needs_nothing() {
        let p = GoalProgress::compute(1_000, 1_500, (2026, 1), (2025, 6));
        assert_eq!(p.amount_remaining, 0);
        assert_eq!(p.monthly_required, 0);
        assert_eq!(p.progress_percent, 150);
    }

    #[test]
    fn zero_target_reports_zero_percent() {
        let p = GoalProgress::compute(0, 0, (2026, 1), (2025, 6));
        assert_eq!(p.progress_percent, 0);
    }

    #[test]
    fn active_window() {
        assert!(is_active(2025, 10, 2025, 10));
        assert!(is_active(2026, 1, 2025, 12));
        assert!(!is_active(2025, 9, 2025, 10));
        assert!(!is_active(2024, 12, 2025, 1));
    }

    #[test]
    fn totals_example() {
        let totals = SavingsTotals::new(500_000 + 1_000_000, 2_000_000 + 5_000_000, 2);
        assert_eq!(totals.total_current_amount, 1_500_000);
        assert_eq!(totals.total_target_amount, 7_000_000);
        assert_eq!(totals.progress_percent, 21);
    }
}
