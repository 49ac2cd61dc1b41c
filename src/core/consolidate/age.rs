//! Calendar-correct age derivation
//!
//! Clinical exports carry dates as ISO-8601 date or date-time strings of
//! uneven quality; only the date portion (first 10 characters) is
//! significant here, and anything unparsable degrades to a missing value.

use chrono::{Datelike, NaiveDate};

/// Full years elapsed between a birth date and a reference date.
///
/// The year has not incremented yet when the reference month/day precedes
/// the birth month/day. Returns `None` (never an error) when either input
/// is missing or unparsable.
///
/// # Examples
///
/// ```
/// use edsan::core::consolidate::age::compute_age;
///
/// assert_eq!(compute_age(Some("2000-06-15"), Some("2020-06-14")), Some(19));
/// assert_eq!(compute_age(Some("2000-06-15"), Some("2020-06-15")), Some(20));
/// assert_eq!(compute_age(None, Some("2020-06-15")), None);
/// ```
pub fn compute_age(birth: Option<&str>, reference: Option<&str>) -> Option<i64> {
    let birth = parse_date(birth?)?;
    let reference = parse_date(reference?)?;

    let mut age = i64::from(reference.year() - birth.year());
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

/// Parses the date portion of an ISO-ish date or date-time string.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2000-06-15", "2020-06-14", 19 ; "day before birthday")]
    #[test_case("2000-06-15", "2020-06-15", 20 ; "on birthday")]
    #[test_case("2000-06-15", "2020-06-16", 20 ; "day after birthday")]
    #[test_case("1980-01-01", "2020-01-01", 40 ; "round year")]
    #[test_case("2000-12-31", "2001-01-01", 0 ; "newborn")]
    fn test_compute_age(birth: &str, reference: &str, expected: i64) {
        assert_eq!(compute_age(Some(birth), Some(reference)), Some(expected));
    }

    #[test]
    fn test_datetime_strings_use_date_portion_only() {
        assert_eq!(
            compute_age(Some("2000-06-15T23:59:00Z"), Some("2020-06-15T00:00:01Z")),
            Some(20)
        );
    }

    #[test]
    fn test_missing_inputs_are_none() {
        assert_eq!(compute_age(None, Some("2020-06-15")), None);
        assert_eq!(compute_age(Some("2000-06-15"), None), None);
        assert_eq!(compute_age(None, None), None);
    }

    #[test]
    fn test_unparsable_inputs_are_none() {
        assert_eq!(compute_age(Some("not-a-date"), Some("2020-06-15")), None);
        assert_eq!(compute_age(Some("2000-06-15"), Some("15/06/2020")), None);
        assert_eq!(compute_age(Some(""), Some("2020-06-15")), None);
    }
}
