//! Date tokens embedded in file names
//!
//! A token is the first run of eight ASCII digits in a name and is read
//! positionally as `YYYYMMDD`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{8}").expect("date token pattern is valid"));

/// Extract the first 8-digit run from `name`
#[must_use]
pub fn extract_date_token(name: &str) -> Option<&str> {
    DATE_TOKEN.find(name).map(|m| m.as_str())
}

/// Whether a token names a real calendar date
#[must_use]
pub fn validate_date_token(token: &str) -> bool {
    NaiveDate::parse_from_str(token, "%Y%m%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_eight_digits() {
        assert_eq!(extract_date_token("AuthorID_20240628.csv"), Some("20240628"));
        assert_eq!(extract_date_token("v2_list_2024062899.csv"), Some("20240628"));
        assert_eq!(extract_date_token("authors_2024.csv"), None);
    }

    #[test]
    fn test_validate_is_positional_only() {
        assert!(validate_date_token("20240628"));
        assert!(!validate_date_token("20241399"));
        assert_eq!(extract_date_token("x_20241399.csv"), Some("20241399"));
    }
}
