use crate::time::NOT_AVAILABLE;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_TRIPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+-\d+-\d+$").expect("numeric date pattern"));

/// `DD-MM-YYYY` to `YYYY-MM-DD`. Anything that is not three dash-separated
/// digit runs is returned unchanged.
pub fn to_iso_display(raw: &str) -> String {
    swap_dashed_parts(raw)
}

/// `YYYY-MM-DD` to `DD-MM-YYYY`, the mirror of [`to_iso_display`].
pub fn to_wire_format(raw: &str) -> String {
    swap_dashed_parts(raw)
}

fn swap_dashed_parts(raw: &str) -> String {
    if raw.is_empty() || raw == NOT_AVAILABLE {
        return String::new();
    }
    if !NUMERIC_TRIPLE_RE.is_match(raw) {
        return raw.to_string();
    }
    let parts: Vec<&str> = raw.split('-').collect();
    match parts.as_slice() {
        [first, middle, last] => format!("{last}-{middle}-{first}"),
        _ => raw.to_string(),
    }
}

/// True when `raw` looks like `YYYY-MM-DD` rather than `DD-MM-YYYY`.
pub fn is_iso_shaped(raw: &str) -> bool {
    let parts: Vec<&str> = raw.trim().split('-').collect();
    matches!(parts.as_slice(), [year, _, _] if year.len() == 4 && year.chars().all(|ch| ch.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::{is_iso_shaped, to_iso_display, to_wire_format};

    #[test]
    fn converts_wire_dates_for_display() {
        assert_eq!(to_iso_display("21-05-2025"), "2025-05-21");
    }

    #[test]
    fn missing_dates_become_empty() {
        assert_eq!(to_iso_display(""), "");
        assert_eq!(to_iso_display("N/A"), "");
        assert_eq!(to_wire_format("N/A"), "");
    }

    #[test]
    fn malformed_dates_pass_through() {
        assert_eq!(to_iso_display("not-a-date"), "not-a-date");
        assert_eq!(to_wire_format("not-a-date"), "not-a-date");
        assert_eq!(to_iso_display("21/05/2025"), "21/05/2025");
        assert_eq!(to_wire_format("2025-05"), "2025-05");
        assert_eq!(to_iso_display("21-May-2025"), "21-May-2025");
        assert_eq!(to_iso_display("21-05-"), "21-05-");
    }

    #[test]
    fn conversions_round_trip() {
        for raw in ["21-05-2025", "1-2-3", "2025-05-21", "07-11-1999"] {
            assert_eq!(to_wire_format(&to_iso_display(raw)), raw);
            assert_eq!(to_iso_display(&to_wire_format(raw)), raw);
        }
    }

    #[test]
    fn detects_iso_shape() {
        assert!(is_iso_shaped("2025-05-21"));
        assert!(!is_iso_shaped("21-05-2025"));
        assert!(!is_iso_shaped("tomorrow"));
    }
}
