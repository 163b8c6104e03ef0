//! Fiscal code fields
//!
//! Store establishment codes and terminal emission points are three-digit
//! codes. Input keeps digits only and stops at three; leaving the field
//! zero-pads a short code.

/// Digits in an establishment code or emission point
pub const CODE_LEN: usize = 3;

/// Digits of a receipt sequence number
const SEQUENCE_LEN: usize = 9;

/// Keep the first [`CODE_LEN`] digits of `input`
pub fn sanitize_code(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CODE_LEN)
        .collect()
}

/// Zero-pad a non-empty code when the field loses focus
pub fn pad_on_blur(code: &str) -> String {
    let code = sanitize_code(code);
    if code.is_empty() {
        return code;
    }
    format!("{code:0>width$}", width = CODE_LEN)
}

pub fn is_complete_code(code: &str) -> bool {
    code.len() == CODE_LEN && code.chars().all(|c| c.is_ascii_digit())
}

/// Emission point offered for a new terminal when `existing` already exist
pub fn suggest_next_code(existing: usize) -> String {
    let next = (existing + 1).min(999);
    format!("{next:0>width$}", width = CODE_LEN)
}

/// First receipt number a terminal would print, e.g. `001-002-000000001`
///
/// Missing parts render as `XXX`/`YYY`.
pub fn receipt_number_preview(establishment_code: Option<&str>, emission_point: &str) -> String {
    let establishment = establishment_code
        .filter(|c| !c.is_empty())
        .unwrap_or("XXX");
    let emission = if emission_point.is_empty() {
        "YYY"
    } else {
        emission_point
    };
    format!("{establishment}-{emission}-{:0>width$}", 1, width = SEQUENCE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_and_filters() {
        assert_eq!(sanitize_code("1234"), "123");
        assert_eq!(sanitize_code("a1-2"), "12");
        assert_eq!(sanitize_code(""), "");
    }

    #[test]
    fn test_pad_on_blur() {
        assert_eq!(pad_on_blur("7"), "007");
        assert_eq!(pad_on_blur("42"), "042");
        assert_eq!(pad_on_blur("123"), "123");
        assert_eq!(pad_on_blur(""), "");
    }

    #[test]
    fn test_suggest_next_code() {
        assert_eq!(suggest_next_code(0), "001");
        assert_eq!(suggest_next_code(11), "012");
        assert_eq!(suggest_next_code(5000), "999");
    }

    #[test]
    fn test_complete_code() {
        assert!(is_complete_code("001"));
        assert!(!is_complete_code("01"));
        assert!(!is_complete_code("0a1"));
    }

    #[test]
    fn test_receipt_preview() {
        assert_eq!(receipt_number_preview(Some("001"), "002"), "001-002-000000001");
        assert_eq!(receipt_number_preview(None, ""), "XXX-YYY-000000001");
    }
}
