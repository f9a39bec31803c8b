use std::io::IsTerminal;

use serde::{Deserialize, Serialize};
use strata_core::conf::{NodeConf, keys};

use crate::logger::{
    error::LogError,
    object::{LogFilter, LogFormat, LogTimeZone},
};

/// Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive, e.g. `"info"` or `"strata_api=debug,info"`.
    pub filter: LogFilter,
    pub tz: LogTimeZone,
    /// Include module targets in each line.
    pub with_targets: bool,
    /// Allow ANSI colors (text format on a terminal only).
    pub use_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: LogFilter::default(),
            tz: LogTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LogConfig {
    /// Read the `strata.log.*` settings, keeping defaults for unset keys.
    pub fn from_conf(conf: &NodeConf) -> Result<Self, LogError> {
        let mut cfg = Self::default();
        if let Some(format) = conf.get(keys::LOG_FORMAT) {
            cfg.format = format.parse()?;
        }
        if let Some(level) = conf.get(keys::LOG_LEVEL) {
            cfg.filter = level.parse()?;
        }
        if let Some(tz) = conf.get(keys::LOG_TIMEZONE) {
            cfg.tz = tz.parse()?;
        }
        cfg.use_color = conf
            .get_bool(keys::LOG_COLOR, cfg.use_color)
            .map_err(|e| LogError::InvalidSetting(e.to_string()))?;
        Ok(cfg)
    }

    /// Color is used only when enabled and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}
