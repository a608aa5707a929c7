use chrono::{Local, NaiveDate, NaiveTime, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";
pub const WIRE_DATE_FORMAT: &str = "%d-%m-%Y";
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Literal marker the chat agent writes for a missing value.
pub const NOT_AVAILABLE: &str = "N/A";

static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}(:\d{2})?$").expect("clock pattern"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("date cannot be empty")]
    Empty,
    #[error("invalid date format: expected YYYY-MM-DD")]
    InvalidFormDate,
    #[error("invalid date format: expected DD-MM-YYYY")]
    InvalidWireDate,
    #[error("invalid time format: expected HH:MM")]
    InvalidTimeFormat,
}

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn local_now_time() -> NaiveTime {
    Local::now().time()
}

pub fn format_clock(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Normalizes a loose time expression to zero-padded 24-hour `HH:MM`,
/// using the local clock for missing values.
pub fn normalize_time(raw: &str) -> String {
    normalize_time_at(raw, local_now_time())
}

/// Same as [`normalize_time`] with an explicit clock.
///
/// Input that matches none of the accepted shapes is returned unchanged, so
/// callers must tolerate non-canonical strings coming back.
pub fn normalize_time_at(raw: &str, now: NaiveTime) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return format_clock(now);
    }

    let compact: String = trimmed.chars().filter(|ch| !ch.is_whitespace()).collect();
    let cleaned = compact.trim_matches('*').to_lowercase();

    if let Some(rest) = cleaned.strip_suffix("am") {
        return match leading_hour(rest) {
            Some(12) => "00:00".to_string(),
            Some(hour) => format!("{hour:02}:00"),
            None => raw.to_string(),
        };
    }

    if let Some(rest) = cleaned.strip_suffix("pm") {
        return match leading_hour(rest) {
            Some(12) => "12:00".to_string(),
            Some(hour) => match hour.checked_add(12) {
                Some(hour) => format!("{hour:02}:00"),
                None => raw.to_string(),
            },
            None => raw.to_string(),
        };
    }

    if CLOCK_RE.is_match(&cleaned) {
        let mut parts = cleaned.splitn(2, ':');
        let hour = parts.next().unwrap_or_default();
        let minute = parts.next().unwrap_or("00");
        return format!("{hour:0>2}:{minute:0>2}");
    }

    raw.to_string()
}

fn leading_hour(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    digits.parse().ok()
}

pub fn parse_form_date(raw: &str) -> Result<NaiveDate, TimeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    NaiveDate::parse_from_str(trimmed, FORM_DATE_FORMAT)
        .map_err(|_| TimeParseError::InvalidFormDate)
}

pub fn parse_wire_date(raw: &str) -> Result<NaiveDate, TimeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    NaiveDate::parse_from_str(trimmed, WIRE_DATE_FORMAT)
        .map_err(|_| TimeParseError::InvalidWireDate)
}

pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, TimeParseError> {
    NaiveTime::parse_from_str(raw.trim(), CLOCK_FORMAT)
        .map_err(|_| TimeParseError::InvalidTimeFormat)
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_time, normalize_time_at, parse_clock_time, parse_form_date, parse_wire_date,
        TimeParseError,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 34, 56).unwrap()
    }

    #[test]
    fn meridiem_suffixes_convert_to_24_hour() {
        assert_eq!(normalize_time_at("7pm", noon()), "19:00");
        assert_eq!(normalize_time_at("12am", noon()), "00:00");
        assert_eq!(normalize_time_at("12pm", noon()), "12:00");
        assert_eq!(normalize_time_at("9am", noon()), "09:00");
        assert_eq!(normalize_time_at(" 7 PM ", noon()), "19:00");
    }

    #[test]
    fn clock_values_are_zero_padded() {
        assert_eq!(normalize_time_at("19:05", noon()), "19:05");
        assert_eq!(normalize_time_at("7", noon()), "07:00");
        assert_eq!(normalize_time_at("7:30", noon()), "07:30");
    }

    #[test]
    fn emphasis_markers_are_stripped() {
        assert_eq!(normalize_time_at("**7pm**", noon()), "19:00");
        assert_eq!(normalize_time_at("*14:15*", noon()), "14:15");
    }

    #[test]
    fn missing_values_use_the_clock() {
        assert_eq!(normalize_time_at("", noon()), "12:34");
        assert_eq!(normalize_time_at("N/A", noon()), "12:34");
    }

    #[test]
    fn empty_input_yields_a_clock_shaped_value() {
        let value = normalize_time("");
        let bytes = value.as_bytes();
        assert_eq!(bytes.len(), 5);
        assert!(bytes[..2].iter().all(u8::is_ascii_digit));
        assert_eq!(bytes[2], b':');
        assert!(bytes[3..].iter().all(u8::is_ascii_digit));
    }

    #[test]
    fn unrecognised_input_passes_through() {
        assert_eq!(normalize_time_at("after lunch", noon()), "after lunch");
        assert_eq!(normalize_time_at("pm", noon()), "pm");
        assert_eq!(normalize_time_at("123:45", noon()), "123:45");
    }

    #[test]
    fn oversized_hours_pass_through() {
        assert_eq!(normalize_time_at("4294967295pm", noon()), "4294967295pm");
        assert_eq!(normalize_time_at("99999999999am", noon()), "99999999999am");
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let once = normalize_time_at("7pm", noon());
        assert_eq!(normalize_time_at(&once, noon()), once);
    }

    #[test]
    fn strict_parsers_enforce_formats() {
        assert_eq!(
            parse_form_date("2025-05-21").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 21).unwrap()
        );
        assert_eq!(
            parse_wire_date("21-05-2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 21).unwrap()
        );
        assert_eq!(
            parse_wire_date("2025-05-21").unwrap_err(),
            TimeParseError::InvalidWireDate
        );
        assert_eq!(parse_form_date(" ").unwrap_err(), TimeParseError::Empty);
        assert!(parse_clock_time("19:05").is_ok());
        assert_eq!(
            parse_clock_time("7pm").unwrap_err(),
            TimeParseError::InvalidTimeFormat
        );
    }
}
