use thiserror::Error;

use strata_model::NodeRole;

use crate::admin::AdminOp;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("operation `{op}` is not supported on {role}")]
    Unsupported { op: AdminOp, role: NodeRole },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Returns `true` for [`AdminError::Unsupported`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, AdminError::Unsupported { .. })
    }
}
