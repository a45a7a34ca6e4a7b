//! Date values and their ISO-8601 wire form.
//!
//! Decoding is lenient: input that does not parse as a date becomes
//! [`DateValue::Invalid`] carrying the raw text, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde_json::Value;

/// A domain date, or the sentinel for a wire value that was not a date.
///
/// Valid dates carry millisecond precision, the precision of the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Valid(DateTime<Utc>),
    /// Raw wire text that could not be parsed.
    Invalid(String),
}

impl DateValue {
    /// Parse a wire string.
    ///
    /// Accepts RFC 3339 timestamps, offset-less timestamps (read as UTC), bare
    /// calendar dates (midnight UTC) and RFC 2822 timestamps.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Self::from(dt.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Self::from(naive.and_utc());
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Self::from(naive.and_utc());
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Self::from(dt.with_timezone(&Utc));
        }

        DateValue::Invalid(raw.to_string())
    }

    /// Decode from the wire: strings are parsed, numbers are epoch milliseconds.
    pub fn from_wire(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(Self::from)
                .unwrap_or_else(|| DateValue::Invalid(n.to_string())),
            other => DateValue::Invalid(other.to_string()),
        }
    }

    /// Encode for the wire. Invalid dates re-emit their raw text unchanged.
    pub fn to_wire(&self) -> Value {
        match self {
            DateValue::Valid(_) => Value::String(self.to_iso_string().unwrap_or_default()),
            DateValue::Invalid(raw) => Value::String(raw.clone()),
        }
    }

    /// `YYYY-MM-DDTHH:MM:SS.sssZ`, or `None` for the invalid sentinel.
    pub fn to_iso_string(&self) -> Option<String> {
        self.as_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            DateValue::Valid(dt) => Some(dt),
            DateValue::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, DateValue::Valid(_))
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(value: DateTime<Utc>) -> Self {
        DateValue::Valid(value.trunc_subsecs(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_like_iso_string() {
        let dt = Utc.with_ymd_and_hms(2020, 2, 29, 13, 5, 9).unwrap();
        let value = DateValue::from(dt);
        assert_eq!(value.to_iso_string().as_deref(), Some("2020-02-29T13:05:09.000Z"));
        assert_eq!(value.to_wire(), Value::String("2020-02-29T13:05:09.000Z".into()));
    }

    #[test]
    fn parses_offsets_into_utc() {
        let value = DateValue::parse("2021-06-01T12:00:00+02:00");
        let expected = Utc.with_ymd_and_hms(2021, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(value, DateValue::Valid(expected));
    }

    #[test]
    fn parses_bare_dates_and_naive_timestamps_as_utc() {
        let midnight = Utc.with_ymd_and_hms(2019, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(DateValue::parse("2019-12-31"), DateValue::Valid(midnight));

        let naive = Utc.with_ymd_and_hms(2019, 12, 31, 8, 30, 0).unwrap();
        assert_eq!(DateValue::parse("2019-12-31T08:30:00"), DateValue::Valid(naive));
    }

    #[test]
    fn numbers_are_epoch_millis() {
        let value = DateValue::from_wire(&serde_json::json!(86_400_000));
        let expected = Utc.with_ymd_and_hms(1970, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(value, DateValue::Valid(expected));
    }

    #[test]
    fn malformed_input_is_the_invalid_sentinel() {
        let value = DateValue::parse("not a date");
        assert_eq!(value, DateValue::Invalid("not a date".into()));
        assert!(!value.is_valid());
        assert_eq!(value.to_iso_string(), None);
        assert_eq!(value.to_wire(), Value::String("not a date".into()));

        assert_eq!(
            DateValue::from_wire(&serde_json::json!(true)),
            DateValue::Invalid("true".into())
        );
    }

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let dt = Utc.timestamp_opt(1_600_000_000, 123_456_789).unwrap();
        let value = DateValue::from(dt);
        assert_eq!(value.to_iso_string().as_deref(), Some("2020-09-13T12:26:40.123Z"));
        assert_eq!(DateValue::parse(&value.to_iso_string().unwrap()), value);
    }
}
