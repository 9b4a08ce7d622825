use chrono::{DateTime, NaiveDate, Utc};

use super::kst;

const WEEKDAYS_KO: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// `1234567` -> `"1,234,567원"`
pub fn fmt_won(amount: i64) -> String {
    format!("{}원", group_thousands(amount))
}

pub fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Accepts `50000`, `50,000` and `50,000원`.
pub fn parse_amount(s: &str) -> Option<i64> {
    let cleaned: String = s
        .trim()
        .trim_end_matches('원')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.trim().parse().ok()
}

pub fn iso(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// 0 = 일요일
pub fn weekday_ko(weekday: u32) -> &'static str {
    WEEKDAYS_KO[(weekday % 7) as usize]
}

/// `2025-03-03 (월) 14:05`, in KST.
pub fn fmt_kst(instant: DateTime<Utc>) -> String {
    let t = kst::to_kst(instant);
    format!(
        "{}-{:02}-{:02} ({}) {:02}:{:02}",
        t.year,
        t.month,
        t.day,
        weekday_ko(t.weekday),
        t.hour,
        t.minute
    )
}

pub fn fmt_year_month(year: i32, month: u32) -> String {
    format!("{year}년 {month}월")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn groups_thousands() {
        assert_eq!(fmt_won(0), "0원");
        assert_eq!(fmt_won(999), "999원");
        assert_eq!(fmt_won(1_000), "1,000원");
        assert_eq!(fmt_won(1_234_567), "1,234,567원");
        assert_eq!(group_thousands(-125_000), "-125,000");
    }

    #[test]
    fn parses_formatted_amounts() {
        assert_eq!(parse_amount("50000"), Some(50_000));
        assert_eq!(parse_amount(" 50,000원 "), Some(50_000));
        assert_eq!(parse_amount("-3"), Some(-3));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn formats_in_kst() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 2, 16, 5, 0).unwrap();
        assert_eq!(fmt_kst(instant), "2025-03-03 (월) 01:05");
    }
}
