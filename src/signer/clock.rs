//! Timestamp source and wire format (`yyyy-MM-ddTHH:mm:ssZ`, UTC)

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{Clock, Error, Result};

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::ClockUnavailable(format!("system time before Unix epoch: {}", e)))?;

        let secs = i64::try_from(since_epoch.as_secs())
            .map_err(|_| Error::ClockUnavailable("system time out of range".to_string()))?;

        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| Error::ClockUnavailable("system time out of range".to_string()))
    }
}

/// Always returns the same instant. For tests and replaying signatures.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Parse an RFC 3339 timestamp such as `2024-01-01T00:00:00Z`.
    pub fn parse(timestamp: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(timestamp)
            .map(|t| Self(t.with_timezone(&Utc)))
            .map_err(|e| Error::Config(format!("bad timestamp {}: {}", timestamp, e)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<DateTime<Utc>> {
        Ok(self.0)
    }
}

/// Second precision, always `Z`.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_drops_fraction() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(750);
        assert_eq!(format_timestamp(&at), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_fixed_clock_normalises_offset() {
        let clock = FixedClock::parse("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(&clock.now().unwrap()), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_fixed_clock_rejects_bad_input() {
        let err = FixedClock::parse("2024-01-01 00:00").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_system_clock_format() {
        let now = format_timestamp(&SystemClock.now().unwrap());
        assert_eq!(now.len(), 20);
        assert!(now.ends_with('Z'));
        assert_eq!(&now[10..11], "T");
    }
}
