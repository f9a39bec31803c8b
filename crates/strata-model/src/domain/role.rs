use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Role a node plays in the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// Coordinates workers, owns cluster membership.
    Master,
    /// Serves data and reports to the master.
    Worker,
}

impl NodeRole {
    /// Lower-case role name, as used in configuration keys.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Master => "master",
            NodeRole::Worker => "worker",
        }
    }
}

impl FromStr for NodeRole {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "master" => Ok(Self::Master),
            "worker" => Ok(Self::Worker),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a node is asked to leave the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExitKind {
    /// Drain data to peers before exiting.
    Decommission,
    /// Wait for in-flight work, then exit.
    #[default]
    Graceful,
    /// Exit right away.
    Immediately,
}

impl ExitKind {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitKind::Decommission => "DECOMMISSION",
            ExitKind::Graceful => "GRACEFUL",
            ExitKind::Immediately => "IMMEDIATELY",
        }
    }
}

impl FromStr for ExitKind {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DECOMMISSION" => Ok(Self::Decommission),
            "GRACEFUL" => Ok(Self::Graceful),
            "IMMEDIATELY" => Ok(Self::Immediately),
            _ => Err(ModelError::UnknownExitKind(s.to_string())),
        }
    }
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitive() {
        assert_eq!("Master".parse::<NodeRole>().unwrap(), NodeRole::Master);
        assert_eq!(" worker ".parse::<NodeRole>().unwrap(), NodeRole::Worker);
        assert!("client".parse::<NodeRole>().is_err());
    }

    #[test]
    fn role_serde_uses_lowercase() {
        let json = serde_json::to_string(&NodeRole::Worker).unwrap();
        assert_eq!(json, r#""worker""#);
    }

    #[test]
    fn exit_kind_parses_case_insensitive() {
        assert_eq!(
            "decommission".parse::<ExitKind>().unwrap(),
            ExitKind::Decommission
        );
        assert_eq!("Graceful".parse::<ExitKind>().unwrap(), ExitKind::Graceful);
        assert_eq!(
            "IMMEDIATELY".parse::<ExitKind>().unwrap(),
            ExitKind::Immediately
        );
    }

    #[test]
    fn exit_kind_rejects_unknown() {
        let err = "reboot".parse::<ExitKind>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownExitKind(s) if s == "reboot"));
    }

    #[test]
    fn exit_kind_default_is_graceful() {
        assert_eq!(ExitKind::default(), ExitKind::Graceful);
        assert_eq!(ExitKind::default().to_string(), "GRACEFUL");
    }
}
