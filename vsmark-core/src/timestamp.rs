//! Timestamp normalization: any accepted input is reduced to the
//! canonical `YYYY-MM-DDTHH:MM:SSZ` form before signing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{VsMarkError, VsMarkResult};

/// Accepted timestamp inputs, mirroring the reference's union of
/// ISO 8601 string, datetime, date, and epoch-seconds forms.
#[derive(Debug, Clone)]
pub enum TimestampInput {
    Iso(String),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    EpochSeconds(f64),
}

impl From<&str> for TimestampInput {
    fn from(s: &str) -> Self {
        TimestampInput::Iso(s.to_string())
    }
}

impl From<String> for TimestampInput {
    fn from(s: String) -> Self {
        TimestampInput::Iso(s)
    }
}

impl From<DateTime<Utc>> for TimestampInput {
    fn from(dt: DateTime<Utc>) -> Self {
        TimestampInput::DateTime(dt)
    }
}

impl From<NaiveDate> for TimestampInput {
    fn from(d: NaiveDate) -> Self {
        TimestampInput::Date(d)
    }
}

impl From<i64> for TimestampInput {
    fn from(epoch: i64) -> Self {
        TimestampInput::EpochSeconds(epoch as f64)
    }
}

impl From<f64> for TimestampInput {
    fn from(epoch: f64) -> Self {
        TimestampInput::EpochSeconds(epoch)
    }
}

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Normalize any accepted timestamp input to `YYYY-MM-DDTHH:MM:SSZ`
/// UTC, with second-level precision.
pub fn normalize(input: TimestampInput) -> VsMarkResult<String> {
    let dt: DateTime<Utc> = match input {
        TimestampInput::DateTime(dt) => dt,
        TimestampInput::Date(date) => {
            let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
                VsMarkError::InputValue(format!("invalid date: {date}"))
            })?;
            Utc.from_utc_datetime(&naive)
        }
        TimestampInput::EpochSeconds(secs) => {
            if !secs.is_finite() {
                return Err(VsMarkError::InputValue(format!(
                    "invalid timestamp value: {secs}"
                )));
            }
            DateTime::from_timestamp(secs.trunc() as i64, 0).ok_or_else(|| {
                VsMarkError::InputValue(format!("invalid timestamp value: {secs}"))
            })?
        }
        TimestampInput::Iso(s) => parse_iso(&s)?,
    };

    Ok(dt.format(CANONICAL_FORMAT).to_string())
}

fn parse_iso(s: &str) -> VsMarkResult<DateTime<Utc>> {
    let normalized = s.replace('Z', "+00:00");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Naive datetime without an offset: assume UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    Err(VsMarkError::InputValue(format!(
        "invalid timestamp string format: {s}. Use ISO 8601."
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn iso_string_with_z_roundtrips() {
        let result = normalize("2024-01-01T00:00:00Z".into()).unwrap();
        assert_eq!(result, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn iso_string_with_offset_converts_to_utc() {
        let result = normalize("2024-01-01T05:30:00+05:30".into()).unwrap();
        assert_eq!(result, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn naive_iso_string_assumed_utc() {
        let result = normalize("2024-06-15T12:00:00".into()).unwrap();
        assert_eq!(result, "2024-06-15T12:00:00Z");
    }

    #[test]
    fn date_only_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let result = normalize(date.into()).unwrap();
        assert_eq!(result, "2024-03-05T00:00:00Z");
    }

    #[test]
    fn epoch_seconds_integer() {
        let result = normalize(0i64.into()).unwrap();
        assert_eq!(result, "1970-01-01T00:00:00Z");
    }

    #[test]
    fn epoch_seconds_float_truncates_subseconds() {
        let result = normalize(1700000000.75f64.into()).unwrap();
        assert_eq!(result, normalize(1700000000i64.into()).unwrap());
    }

    #[test]
    fn datetime_value_converted_to_utc() {
        let dt = DateTime::parse_from_rfc3339("2024-02-02T10:00:00-03:00")
            .unwrap()
            .with_timezone(&Utc);
        let result = normalize(dt.into()).unwrap();
        assert_eq!(result, "2024-02-02T13:00:00Z");
    }

    #[test]
    fn invalid_iso_string_errors() {
        assert!(normalize("not-a-timestamp".into()).is_err());
    }

    #[test]
    fn nan_epoch_errors() {
        assert!(normalize(f64::NAN.into()).is_err());
    }

    #[test]
    fn no_subsecond_precision_in_output() {
        let result = normalize("2024-01-01T00:00:00.999Z".into()).unwrap();
        assert_eq!(result, "2024-01-01T00:00:00Z");
    }
}
