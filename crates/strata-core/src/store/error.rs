use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown dynamic config store backend: {0} (expected: FS)")]
    UnknownBackend(String),

    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("failed to read config snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}
