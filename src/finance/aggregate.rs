//! Arithmetic shared by the summary endpoints. The sums themselves come out of
//! SQL; this module only shapes them.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::kst;

/// `round(part / whole * 100)`, half rounded up. Zero denominator gives 0.
pub fn percent(part: i64, whole: i64) -> i64 {
    if whole <= 0 || part <= 0 {
        return 0;
    }
    let part = i128::from(part);
    let whole = i128::from(whole);
    ((part * 200 + whole) / (whole * 2)) as i64
}

/// Spending against a budget amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub amount: i64,
    pub used: i64,
    pub remaining: i64,
    /// Capped at 100.
    pub usage_percent: i64,
}

impl BudgetUsage {
    pub fn new(amount: i64, used: i64) -> Self {
        Self {
            amount,
            used,
            remaining: (amount - used).max(0),
            usage_percent: percent(used, amount).min(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAmount {
    pub date: NaiveDate,
    pub amount: i64,
}

/// Lays grouped `(kst day number, sum)` rows over `days`, filling gaps with 0.
/// Output has exactly `days.len()` entries in the order of `days`.
pub fn fill_daily_series(days: &[NaiveDate], grouped: &[(i64, i64)]) -> Vec<DailyAmount> {
    let sums: HashMap<NaiveDate, i64> = grouped
        .iter()
        .filter_map(|&(day_number, sum)| {
            kst::date_from_day_number(day_number).map(|date| (date, sum))
        })
        .collect();

    days.iter()
        .map(|&date| DailyAmount {
            date,
            amount: sums.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Descending by total; ties by id so the order is deterministic.
pub fn sort_by_total_desc<T>(items: &mut [T], key: impl Fn(&T) -> (i64, i64)) {
    items.sort_by(|a, b| {
        let (total_a, id_a) = key(a);
        let (total_b, id_b) = key(b);
        total_b.cmp(&total_a).then(id_a.cmp(&id_b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn percent_rounds_half_up_and_guards_zero() {
        assert_eq!(percent(30_000, 50_000), 60);
        assert_eq!(percent(1_500_000, 7_000_000), 21);
        assert_eq!(percent(1, 200), 1); // 0.5
        assert_eq!(percent(1, 201), 0);
        assert_eq!(percent(5, 0), 0);
        assert_eq!(percent(0, 10), 0);
        assert_eq!(percent(300, 100), 300);
    }

    #[test]
    fn budget_usage_caps_and_floors() {
        let within = BudgetUsage::new(50_000, 30_000);
        assert_eq!(within.remaining, 20_000);
        assert_eq!(within.usage_percent, 60);

        let over = BudgetUsage::new(50_000, 80_000);
        assert_eq!(over.remaining, 0);
        assert_eq!(over.usage_percent, 100);

        let none = BudgetUsage::new(0, 12_000);
        assert_eq!(none.remaining, 0);
        assert_eq!(none.usage_percent, 0);
    }

    #[test]
    fn series_fills_gaps_with_zero() {
        let days = [date(3, 1), date(3, 2), date(3, 3)];
        let day_number = |d: NaiveDate| kst::kst_day_number(kst::date_range(d).start);
        let grouped = [(day_number(date(3, 1)), 1_000), (day_number(date(3, 3)), 2_500)];

        let series = fill_daily_series(&days, &grouped);
        assert_eq!(series.len(), 3);
        assert_eq!(series.iter().map(|d| d.amount).collect::<Vec<_>>(), vec![1_000, 0, 2_500]);
        assert_eq!(series.iter().map(|d| d.date).collect::<Vec<_>>(), days.to_vec());
    }

    #[test]
    fn series_ignores_rows_outside_window() {
        let days = [date(3, 2)];
        let outside = kst::kst_day_number(kst::date_range(date(2, 1)).start);
        let series = fill_daily_series(&days, &[(outside, 9_999)]);
        assert_eq!(series, vec![DailyAmount { date: date(3, 2), amount: 0 }]);
    }

    #[test]
    fn sorts_descending_with_stable_ties() {
        let mut rows = vec![(3, 100), (1, 500), (2, 100)];
        sort_by_total_desc(&mut rows, |&(id, total)| (total, id));
        assert_eq!(rows, vec![(1, 500), (2, 100), (3, 100)]);
    }
}
