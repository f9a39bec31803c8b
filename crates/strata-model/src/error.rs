use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown config scope: {0} (expected: SYSTEM|TENANT|TENANT_USER)")]
    UnknownScope(String),

    #[error("unknown node role: {0} (expected: master|worker)")]
    UnknownRole(String),

    #[error("unknown exit type: {0} (expected: DECOMMISSION|GRACEFUL|IMMEDIATELY)")]
    UnknownExitKind(String),
}
