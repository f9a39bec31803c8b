mod config;
mod error;
mod install;
mod object;

pub use config::LogConfig;
pub use error::{LogError, LogResult};
pub use object::{LogFilter, LogFormat, LogTimeZone, LogTimer};

/// Installs the global tracing subscriber described by `cfg`.
///
/// After this call every `tracing` macro in the process goes through it.
/// Fails with [`LogError::AlreadyInitialized`] when called twice.
///
/// With [`LogTimeZone::Local`], call this before the tokio runtime spawns
/// worker threads; local offset detection is unreliable afterwards and falls
/// back to UTC.
///
/// # Examples
/// ```rust
/// use strata_observe::{LogConfig, init_logger};
///
/// init_logger(&LogConfig::default()).expect("logger init");
/// tracing::info!("logger ready");
/// ```
pub fn init_logger(cfg: &LogConfig) -> Result<(), LogError> {
    match cfg.format {
        LogFormat::Text => install::text(cfg),
        LogFormat::Json => install::json(cfg),
        LogFormat::Journald => install::journald(cfg),
    }
}
