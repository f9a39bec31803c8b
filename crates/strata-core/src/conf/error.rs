use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config line {line}: {content:?} (expected `key value` or `key=value`)")]
    Malformed { line: usize, content: String },

    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
