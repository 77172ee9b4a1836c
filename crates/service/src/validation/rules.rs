//! Field rules for the [`Validator`](super::Validator).
//!
//! Each rule coerces one JSON value into a typed output or reports every
//! constraint the value violates.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SubsecRound};
use serde_json::Value;
use uuid::Uuid;

pub trait Rule {
    type Output;

    fn check(&self, value: &Value) -> Result<Self::Output, Vec<String>>;
}

/// String rule. Input is trimmed before any bound is checked; lengths count
/// characters, not bytes.
#[derive(Clone, Debug)]
pub struct Text {
    min: usize,
    max: usize,
    one_of: Option<&'static [&'static str]>,
    must_contain: Option<char>,
    digits_only: bool,
}

pub fn text() -> Text {
    Text { min: 0, max: usize::MAX, one_of: None, must_contain: None, digits_only: false }
}

impl Text {
    pub fn len(mut self, min: usize, max: usize) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn exact_len(self, n: usize) -> Self {
        self.len(n, n)
    }

    pub fn max_len(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    pub fn one_of(mut self, vocabulary: &'static [&'static str]) -> Self {
        self.one_of = Some(vocabulary);
        self
    }

    pub fn must_contain(mut self, c: char) -> Self {
        self.must_contain = Some(c);
        self
    }

    pub fn digits_only(mut self) -> Self {
        self.digits_only = true;
        self
    }
}

impl Rule for Text {
    type Output = String;

    fn check(&self, value: &Value) -> Result<String, Vec<String>> {
        let Some(raw) = value.as_str() else {
            return Err(vec!["must be a string".into()]);
        };
        let s = raw.trim();
        let n = s.chars().count();
        let mut errors = Vec::new();
        if self.min == self.max && n != self.min {
            errors.push(format!("must be exactly {} characters", self.min));
        } else {
            if n < self.min {
                errors.push(format!("must be at least {} characters", self.min));
            }
            if n > self.max {
                errors.push(format!("must be at most {} characters", self.max));
            }
        }
        if let Some(vocabulary) = self.one_of {
            if !vocabulary.contains(&s) {
                errors.push(format!("must be one of: {}", vocabulary.join(", ")));
            }
        }
        if let Some(c) = self.must_contain {
            if !s.contains(c) {
                errors.push(format!("must contain '{c}'"));
            }
        }
        if self.digits_only && !s.chars().all(|c| c.is_ascii_digit()) {
            errors.push("must contain only digits".into());
        }
        if errors.is_empty() { Ok(s.to_string()) } else { Err(errors) }
    }
}

/// Whole-number rule producing an `i32` column value.
#[derive(Clone, Debug)]
pub struct Integer {
    min: Option<i64>,
    max: Option<i64>,
}

pub fn integer() -> Integer {
    Integer { min: None, max: None }
}

impl Integer {
    pub fn non_negative(mut self) -> Self {
        self.min = Some(0);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Rule for Integer {
    type Output = i32;

    fn check(&self, value: &Value) -> Result<i32, Vec<String>> {
        let Some(n) = value.as_i64() else {
            return Err(vec!["must be an integer".into()]);
        };
        let mut errors = Vec::new();
        if let Some(min) = self.min {
            if n < min {
                errors.push(if min == 0 { "must not be negative".to_string() } else { format!("must be at least {min}") });
            }
        }
        if let Some(max) = self.max {
            if n > max {
                errors.push(format!("must be at most {max}"));
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        i32::try_from(n).map_err(|_| vec!["is out of range".to_string()])
    }
}

/// Identifier of a related record.
#[derive(Clone, Copy, Debug)]
pub struct UuidRule;

pub fn uuid() -> UuidRule {
    UuidRule
}

impl Rule for UuidRule {
    type Output = Uuid;

    fn check(&self, value: &Value) -> Result<Uuid, Vec<String>> {
        value
            .as_str()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or_else(|| vec!["must be a valid UUID".to_string()])
    }
}

/// Calendar date from `YYYY-MM-DD` or the date part of an RFC 3339
/// timestamp.
#[derive(Clone, Copy, Debug)]
pub struct DateRule;

pub fn date() -> DateRule {
    DateRule
}

impl Rule for DateRule {
    type Output = NaiveDate;

    fn check(&self, value: &Value) -> Result<NaiveDate, Vec<String>> {
        let parsed = value.as_str().map(str::trim).and_then(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        });
        parsed.ok_or_else(|| vec!["must be a date (YYYY-MM-DD or RFC 3339)".to_string()])
    }
}

/// Instant from an RFC 3339 timestamp, or a bare date read as midnight UTC.
/// Truncated to microseconds to match stored precision.
#[derive(Clone, Copy, Debug)]
pub struct TimestampRule;

pub fn timestamp() -> TimestampRule {
    TimestampRule
}

impl Rule for TimestampRule {
    type Output = DateTime<FixedOffset>;

    fn check(&self, value: &Value) -> Result<DateTime<FixedOffset>, Vec<String>> {
        let parsed = value.as_str().map(str::trim).and_then(|s| {
            DateTime::parse_from_rfc3339(s).ok().or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN).and_utc().fixed_offset())
            })
        });
        parsed
            .map(|dt| dt.trunc_subsecs(6))
            .ok_or_else(|| vec!["must be a timestamp (RFC 3339 or YYYY-MM-DD)".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_trims_and_reports_all_violations() {
        assert_eq!(text().len(1, 5).check(&json!("  abc ")), Ok("abc".to_string()));
        let errs = text().len(3, 10).one_of(&["Clinic"]).check(&json!("x")).unwrap_err();
        assert_eq!(errs.len(), 2);
        assert_eq!(text().check(&json!(5)), Err(vec!["must be a string".to_string()]));
    }

    #[test]
    fn text_exact_length() {
        assert!(text().exact_len(10).check(&json!("1234567890")).is_ok());
        assert_eq!(
            text().exact_len(10).check(&json!("123")),
            Err(vec!["must be exactly 10 characters".to_string()])
        );
    }

    #[test]
    fn text_digits_only() {
        assert!(text().digits_only().check(&json!("0123")).is_ok());
        assert_eq!(
            text().exact_len(4).digits_only().check(&json!("12a")),
            Err(vec!["must be exactly 4 characters".to_string(), "must contain only digits".to_string()])
        );
    }

    #[test]
    fn text_counts_characters() {
        assert!(text().max_len(3).check(&json!("äöü")).is_ok());
    }

    #[test]
    fn integer_bounds() {
        assert_eq!(integer().non_negative().check(&json!(0)), Ok(0));
        assert_eq!(
            integer().non_negative().check(&json!(-2)),
            Err(vec!["must not be negative".to_string()])
        );
        assert!(integer().check(&json!("7")).is_err());
        assert!(integer().check(&json!(1.5)).is_err());
        assert_eq!(integer().check(&json!(i64::MAX)), Err(vec!["is out of range".to_string()]));
    }

    #[test]
    fn uuid_shape() {
        let id = Uuid::new_v4();
        assert_eq!(uuid().check(&json!(id.to_string())), Ok(id));
        assert!(uuid().check(&json!("not-a-uuid")).is_err());
        assert!(uuid().check(&json!(42)).is_err());
    }

    #[test]
    fn date_coerces_iso_forms() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(date().check(&json!("2025-06-30")), Ok(d));
        assert_eq!(date().check(&json!("2025-06-30T23:00:00+02:00")), Ok(d));
        assert!(date().check(&json!("30/06/2025")).is_err());
    }

    #[test]
    fn timestamp_accepts_bare_dates() {
        let ts = timestamp().check(&json!("2024-02-29")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-02-29T00:00:00+00:00");
        let ts = timestamp().check(&json!("2024-02-29T10:11:12.123456789Z")).unwrap();
        assert_eq!(ts.timestamp_subsec_nanos(), 123_456_000);
    }
}
