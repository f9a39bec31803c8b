use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::logger::LogError;

/// Timezone of log timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTimeZone {
    #[default]
    Utc,
    Local,
}

impl FromStr for LogTimeZone {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LogError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl fmt::Display for LogTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogTimeZone::Utc => "utc",
            LogTimeZone::Local => "local",
        })
    }
}

/// RFC3339 timestamp formatter with a fixed offset.
///
/// The local offset is detected once, when the timer is built.
#[derive(Debug, Clone, Copy)]
pub struct LogTimer {
    offset: UtcOffset,
}

impl LogTimer {
    pub fn new(tz: LogTimeZone) -> Self {
        let offset = match tz {
            LogTimeZone::Utc => UtcOffset::UTC,
            LogTimeZone::Local => UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        };
        Self { offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    fn now(&self) -> String {
        OffsetDateTime::now_utc()
            .to_offset(self.offset)
            .format(&Rfc3339)
            .unwrap_or_else(|_| "<invalid-time>".to_string())
    }
}

impl FormatTime for LogTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{} ", self.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timezone_parses_case_insensitive() {
        assert_eq!("UTC".parse::<LogTimeZone>().unwrap(), LogTimeZone::Utc);
        assert_eq!("Local".parse::<LogTimeZone>().unwrap(), LogTimeZone::Local);
        assert!("pst".parse::<LogTimeZone>().is_err());
    }

    #[test]
    fn utc_timer_has_zero_offset() {
        let timer = LogTimer::new(LogTimeZone::Utc);
        assert_eq!(timer.offset(), UtcOffset::UTC);
        assert!(timer.now().ends_with('Z'));
    }

    #[test]
    fn local_timer_offset_is_plausible() {
        let timer = LogTimer::new(LogTimeZone::Local);
        assert!(timer.offset().whole_hours().abs() <= 14);
    }
}
