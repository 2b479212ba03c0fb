use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{1,2})\D+(\d{1,2})").unwrap())
}

/// Bank statement date columns carry month and day only. The calendar year
/// is resolved against a reference date (the statement period's closing
/// date) using the six-month heuristic: a month more than six months ahead
/// of the reference belongs to the prior year, one more than six months
/// behind belongs to the next year. This keeps statements that straddle a
/// year boundary (a December-opening, January-closing period) honest about
/// which December or which January a line actually falls in.
pub fn resolve_date(column_text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let captures = date_pattern().captures(column_text.trim())?;
    let month: u32 = captures.get(1)?.as_str().parse().ok()?;
    let day: u32 = captures.get(2)?.as_str().parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    let reference_year = reference.year();
    let reference_month = reference.month() as i32;
    let diff = month as i32 - reference_month;
    let year = if diff > 6 {
        reference_year - 1
    } else if diff < -6 {
        reference_year + 1
    } else {
        reference_year
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// True when the column looks like an attempt at a date (digits present)
/// even if it fails to resolve — used to distinguish a malformed date from
/// a plain continuation line that has no date at all.
pub fn looks_like_date(column_text: &str) -> bool {
    column_text.trim().chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_date_within_same_year() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let resolved = resolve_date("01 15", reference).unwrap();
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn december_line_before_january_close_rolls_back_a_year() {
        let reference = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let resolved = resolve_date("12 28", reference).unwrap();
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2024, 12, 28).unwrap());
    }

    #[test]
    fn january_line_after_december_close_rolls_forward_a_year() {
        let reference = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let resolved = resolve_date("01 03", reference).unwrap();
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
    }

    #[test]
    fn invalid_month_is_rejected() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert!(resolve_date("13 40", reference).is_none());
    }

    #[test]
    fn blank_column_has_no_date() {
        let reference = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert!(resolve_date("   ", reference).is_none());
        assert!(!looks_like_date("   "));
    }
}
