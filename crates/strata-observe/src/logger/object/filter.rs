use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LogError;

/// Validated `EnvFilter` directive string, e.g. `"info"` or
/// `"strata_api=debug,info"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogFilter(String);

impl LogFilter {
    /// # Examples
    /// ```
    /// use strata_observe::LogFilter;
    ///
    /// let f = LogFilter::new("strata_core=trace,warn").unwrap();
    /// assert_eq!(f.as_str(), "strata_core=trace,warn");
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LogError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the subscriber filter. Falls back to `info` if the directive
    /// stops parsing, which construction rules out.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.0).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LogFilter {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LogFilter {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LogFilter {
    type Error = LogError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        EnvFilter::try_new(&s)
            .map(|_| LogFilter(s.clone()))
            .map_err(|e| LogError::InvalidFilter(format!("{s}: {e}")))
    }
}

impl From<LogFilter> for String {
    fn from(f: LogFilter) -> Self {
        f.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_levels_and_directives() {
        for ok in ["info", "trace", "strata_api=debug,info", "strata_core=trace"] {
            assert!(ok.parse::<LogFilter>().is_ok(), "rejected {ok:?}");
        }
    }

    #[test]
    fn rejects_bad_levels() {
        for bad in ["strata_api=loud", "a=trace,b=wat"] {
            let err = bad.parse::<LogFilter>().unwrap_err();
            assert!(matches!(err, LogError::InvalidFilter(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LogFilter::default().as_str(), "info");
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let f: LogFilter = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(f.as_str(), "debug");
        assert!(serde_json::from_str::<LogFilter>(r#""x=nope""#).is_err());
    }
}
