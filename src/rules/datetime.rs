use chrono::{ DateTime as ChronoDateTime, NaiveDate, NaiveDateTime };

use super::{ FieldValue, Result, Rule, RuleContext };

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a datetime in one of the accepted forms, normalized to UTC:
///
/// * an integer Unix timestamp (`1700000000`)
/// * `YYYY-MM-DD`
/// * `YYYY-MM-DD HH:MM:SS`
/// * RFC 3339 (`2024-02-29T12:00:00+01:00`)
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(seconds) = text.parse::<i64>() {
        return from_timestamp(seconds);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            ChronoDateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

fn from_timestamp(seconds: i64) -> Option<NaiveDateTime> {
    ChronoDateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

/// `datetime`: the value must parse with [`parse_datetime`], or be a whole
/// number usable as a Unix timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct Datetime;

impl Rule for Datetime {
    fn name(&self) -> &str {
        "datetime"
    }

    fn message(&self) -> Option<&str> {
        Some("The :attribute field could not be parsed as a datetime.")
    }

    fn validate(
        &self,
        _attribute: &str,
        value: &FieldValue,
        _parameters: &[&str],
        _context: &mut RuleContext<'_>,
    ) -> Result<bool> {
        let parsed = match value {
            FieldValue::Text(text) => parse_datetime(text),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                from_timestamp(*n as i64)
            }
            _ => None,
        };
        Ok(parsed.is_some())
    }
}
