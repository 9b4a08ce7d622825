//! Korean public holidays.
//!
//! Fixed-date holidays repeat every year. Lunar holidays (설날, 부처님오신날, 추석)
//! come from a precomputed table; coverage is extended by adding rows to
//! `LUNAR_TABLE`, there is no lunar-to-solar conversion here.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HolidayKind {
    Fixed,
    Lunar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: &'static str,
    pub kind: HolidayKind,
}

const FIXED_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "신정"),
    (3, 1, "삼일절"),
    (5, 5, "어린이날"),
    (6, 6, "현충일"),
    (8, 15, "광복절"),
    (10, 3, "개천절"),
    (10, 9, "한글날"),
    (12, 25, "성탄절"),
];

struct LunarYear {
    year: i32,
    /// Day before, the day, day after.
    seollal: [(u32, u32); 3],
    buddha: (u32, u32),
    chuseok: [(u32, u32); 3],
}

const LUNAR_TABLE: &[LunarYear] = &[
    LunarYear { year: 2023, seollal: [(1, 21), (1, 22), (1, 23)], buddha: (5, 27), chuseok: [(9, 28), (9, 29), (9, 30)] },
    LunarYear { year: 2024, seollal: [(2, 9), (2, 10), (2, 11)], buddha: (5, 15), chuseok: [(9, 16), (9, 17), (9, 18)] },
    LunarYear { year: 2025, seollal: [(1, 28), (1, 29), (1, 30)], buddha: (5, 5), chuseok: [(10, 5), (10, 6), (10, 7)] },
    LunarYear { year: 2026, seollal: [(2, 16), (2, 17), (2, 18)], buddha: (5, 24), chuseok: [(9, 24), (9, 25), (9, 26)] },
    LunarYear { year: 2027, seollal: [(2, 6), (2, 7), (2, 8)], buddha: (5, 13), chuseok: [(9, 14), (9, 15), (9, 16)] },
    LunarYear { year: 2028, seollal: [(1, 25), (1, 26), (1, 27)], buddha: (5, 2), chuseok: [(10, 2), (10, 3), (10, 4)] },
    LunarYear { year: 2029, seollal: [(2, 12), (2, 13), (2, 14)], buddha: (5, 20), chuseok: [(9, 21), (9, 22), (9, 23)] },
    LunarYear { year: 2030, seollal: [(2, 2), (2, 3), (2, 4)], buddha: (5, 9), chuseok: [(9, 11), (9, 12), (9, 13)] },
];

/// Years with lunar holiday data.
#[cfg(test)]
fn lunar_table_years() -> std::ops::RangeInclusive<i32> {
    let first = LUNAR_TABLE.first().map_or(0, |y| y.year);
    let last = LUNAR_TABLE.last().map_or(-1, |y| y.year);
    first..=last
}

fn lunar_entries(year: i32) -> Vec<(u32, u32, &'static str)> {
    let Some(row) = LUNAR_TABLE.iter().find(|row| row.year == year) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(7);
    for (i, &(m, d)) in row.seollal.iter().enumerate() {
        out.push((m, d, if i == 1 { "설날" } else { "설날 연휴" }));
    }
    out.push((row.buddha.0, row.buddha.1, "부처님오신날"));
    for (i, &(m, d)) in row.chuseok.iter().enumerate() {
        out.push((m, d, if i == 1 { "추석" } else { "추석 연휴" }));
    }
    out
}

/// All holidays of `year` ordered by date. Fixed holidays sort before lunar
/// ones falling on the same day.
pub fn holidays(year: i32) -> Vec<Holiday> {
    let fixed = FIXED_HOLIDAYS
        .iter()
        .map(|&(m, d, name)| (m, d, name, HolidayKind::Fixed));
    let lunar = lunar_entries(year)
        .into_iter()
        .map(|(m, d, name)| (m, d, name, HolidayKind::Lunar));

    let mut list: Vec<Holiday> = fixed
        .chain(lunar)
        .filter_map(|(m, d, name, kind)| {
            NaiveDate::from_ymd_opt(year, m, d).map(|date| Holiday { date, name, kind })
        })
        .collect();

    // stable: keeps fixed-before-lunar on ties
    list.sort_by_key(|h| h.date);
    list
}

pub fn holidays_in_month(year: i32, month: u32) -> Vec<Holiday> {
    holidays(year)
        .into_iter()
        .filter(|h| h.date.month() == month)
        .collect()
}

pub fn is_holiday(year: i32, month: u32, day: u32) -> bool {
    holidays(year)
        .iter()
        .any(|h| h.date.month() == month && h.date.day() == day)
}

/// Names of the holidays on a date, joined when two fall on the same day.
pub fn holiday_name(date: NaiveDate) -> Option<String> {
    let names: Vec<&str> = holidays(date.year())
        .iter()
        .filter(|h| h.date == date)
        .map(|h| h.name)
        .collect();
    (!names.is_empty()).then(|| names.join(" · "))
}

/// Distinct holiday days of the month, ascending.
pub fn holiday_days_in_month(year: i32, month: u32) -> Vec<u32> {
    let mut days: Vec<u32> = holidays_in_month(year, month)
        .iter()
        .map(|h| h.date.day())
        .collect();
    days.dedup();
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fixed_holiday_appears_once_in_any_year() {
        for year in [1999, 2023, 2025, 2031, 2100] {
            let list = holidays(year);
            for &(m, d, name) in FIXED_HOLIDAYS {
                let hits = list
                    .iter()
                    .filter(|h| h.kind == HolidayKind::Fixed && h.name == name)
                    .count();
                assert_eq!(hits, 1, "{name} in {year}");
                assert!(is_holiday(year, m, d));
            }
        }
    }

    #[test]
    fn years_outside_table_have_only_fixed_holidays() {
        assert!(!lunar_table_years().contains(&2040));
        let list = holidays(2040);
        assert_eq!(list.len(), FIXED_HOLIDAYS.len());
        assert!(list.iter().all(|h| h.kind == HolidayKind::Fixed));
    }

    #[test]
    fn lunar_holidays_for_2026() {
        let list = holidays(2026);
        let date = |m, d| NaiveDate::from_ymd_opt(2026, m, d).unwrap();

        assert!(list.iter().any(|h| h.date == date(2, 17) && h.name == "설날"));
        assert!(list.iter().any(|h| h.date == date(5, 24) && h.name == "부처님오신날"));
        assert!(list.iter().any(|h| h.date == date(9, 25) && h.name == "추석"));
        assert_eq!(list.len(), FIXED_HOLIDAYS.len() + 7);
    }

    #[test]
    fn list_is_sorted_by_date() {
        for year in lunar_table_years() {
            let list = holidays(year);
            assert!(list.windows(2).all(|w| w[0].date <= w[1].date), "{year}");
        }
    }

    #[test]
    fn derived_views_agree_with_list() {
        for year in lunar_table_years() {
            let list = holidays(year);
            for month in 1..=12 {
                let days = holiday_days_in_month(year, month);
                let expected: std::collections::BTreeSet<u32> = list
                    .iter()
                    .filter(|h| h.date.month() == month)
                    .map(|h| h.date.day())
                    .collect();
                assert_eq!(days, expected.into_iter().collect::<Vec<_>>());

                for day in 1..=31 {
                    let listed = list.iter().any(|h| h.date.month() == month && h.date.day() == day);
                    assert_eq!(is_holiday(year, month, day), listed);
                }
            }
        }
    }

    #[test]
    fn overlapping_holidays_share_a_day() {
        // 2025: 부처님오신날 falls on 어린이날
        assert_eq!(holiday_days_in_month(2025, 5), vec![5]);
        let name = holiday_name(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()).unwrap();
        assert_eq!(name, "어린이날 · 부처님오신날");
        assert_eq!(holiday_name(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()), None);
    }
}
