// src/utils/validation.rs
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Full names: letters, spaces, hyphens and apostrophes.
pub static FULL_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z .'-]*$").unwrap());

pub fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if FULL_NAME_REGEX.is_match(full_name) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_full_name"))
    }
}

/// Objective target dates must land on a 2025 quarter end.
pub fn is_quarter_end_2025(date: NaiveDate) -> bool {
    if date.year() != 2025 {
        return false;
    }
    matches!(
        (date.month(), date.day()),
        (3, 31) | (6, 30) | (9, 30) | (12, 31)
    )
}

pub fn validate_target_date(date: NaiveDate) -> Result<(), ValidationError> {
    if is_quarter_end_2025(date) {
        Ok(())
    } else {
        Err(ValidationError::new("target_date_not_quarter_end"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_name_regex() {
        assert!(FULL_NAME_REGEX.is_match("Jordan Smith"));
        assert!(FULL_NAME_REGEX.is_match("Mary-Jane O'Neil"));
        assert!(!FULL_NAME_REGEX.is_match(" leading space"));
        assert!(!FULL_NAME_REGEX.is_match("tab\tname"));
        assert!(!FULL_NAME_REGEX.is_match(""));
    }

    #[test]
    fn test_quarter_end_dates() {
        assert!(is_quarter_end_2025(date(2025, 3, 31)));
        assert!(is_quarter_end_2025(date(2025, 6, 30)));
        assert!(is_quarter_end_2025(date(2025, 9, 30)));
        assert!(is_quarter_end_2025(date(2025, 12, 31)));

        assert!(!is_quarter_end_2025(date(2025, 6, 29)));
        assert!(!is_quarter_end_2025(date(2025, 1, 31)));
        assert!(!is_quarter_end_2025(date(2024, 12, 31)));
        assert!(!is_quarter_end_2025(date(2026, 3, 31)));
    }
}
