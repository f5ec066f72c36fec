//! Caller-supplied date validation.
//!
//! Accepts strictly `YYYY-MM-DD` (zero-padded, real calendar date). An empty
//! or absent input means "today" in the process-local calendar, with no
//! timezone conversion.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date '{input}': expected YYYY-MM-DD")]
pub struct ValidationError {
    pub input: String,
}

/// Validate and normalize a caller-supplied date string.
pub fn validate(input: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let raw = match input {
        None => return Ok(chrono::Local::now().date_naive()),
        Some(s) if s.trim().is_empty() => return Ok(chrono::Local::now().date_naive()),
        Some(s) => s,
    };

    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError {
        input: raw.to_string(),
    })?;

    // chrono tolerates unpadded components; re-format to enforce the strict
    // zero-padded shape.
    if parsed.format("%Y-%m-%d").to_string() != raw {
        return Err(ValidationError {
            input: raw.to_string(),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_date_passes() {
        assert_eq!(
            validate(Some("2024-01-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn impossible_calendar_date_fails() {
        assert!(validate(Some("2024-02-30")).is_err());
        assert!(validate(Some("2023-02-29")).is_err());
        assert!(validate(Some("2024-13-01")).is_err());
    }

    #[test]
    fn leap_day_passes_on_leap_years() {
        assert!(validate(Some("2024-02-29")).is_ok());
    }

    #[test]
    fn loose_formats_are_rejected() {
        for input in ["2024-1-1", "2024/01/01", "01-01-2024", "20240101", "2024-01-01x"] {
            assert!(validate(Some(input)).is_err(), "accepted: {input}");
        }
    }

    #[test]
    fn absent_or_blank_input_means_today() {
        let today = chrono::Local::now().date_naive();
        assert_eq!(validate(None).unwrap(), today);
        assert_eq!(validate(Some("")).unwrap(), today);
        assert_eq!(validate(Some("  ")).unwrap(), today);
    }

    #[test]
    fn error_carries_the_offending_input() {
        let err = validate(Some("nope")).unwrap_err();
        assert_eq!(err.input, "nope");
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
