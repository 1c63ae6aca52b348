//! Shared TEXT-column conversion helpers.
//!
//! Decimals and timestamps are persisted as TEXT. Parsing back is tolerant:
//! a corrupted numeric cell logs an error and falls back rather than
//! poisoning a whole partition read.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Parses a stored decimal, falling back through f64 for scientific
/// notation, and to zero for garbage.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value) {
            Ok(f_val) => Decimal::from_f64(f_val).unwrap_or_else(|| {
                log::error!(
                    "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                    field_name,
                    value,
                    f_val
                );
                Decimal::ZERO
            }),
            Err(e_f64) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value, e_decimal, e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

pub fn parse_decimal_opt(value: Option<&str>, field_name: &str) -> Option<Decimal> {
    value.map(|v| parse_decimal(v, field_name))
}

/// Parses a stored RFC 3339 timestamp, accepting the space-separated form as
/// well. Garbage logs an error and falls back to the epoch, which reads as
/// maximally stale.
pub fn parse_datetime(value: &str, field_name: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return naive.and_utc();
    }
    log::error!(
        "Failed to parse {} '{}' as a timestamp. Falling back to epoch.",
        field_name,
        value
    );
    DateTime::<Utc>::UNIX_EPOCH
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_decimal_plain_and_scientific() {
        assert_eq!(parse_decimal("42000.5", "f"), Decimal::new(420005, 1));
        assert_eq!(parse_decimal("1e2", "f"), Decimal::new(100, 0));
        assert_eq!(parse_decimal("garbage", "f"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_datetime_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_datetime("2026-03-01T12:00:00+00:00", "f"), expected);
        assert_eq!(parse_datetime("2026-03-01 12:00:00", "f"), expected);
        assert_eq!(
            parse_datetime("not a date", "f"),
            DateTime::<Utc>::UNIX_EPOCH
        );
    }
}
