use std::fmt;

use strata_model::ExitKind;

/// Named administrative operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminOp {
    WorkerInfo,
    ThreadDump,
    ShuffleList,
    ApplicationList,
    TopDiskUsage,
    MasterGroupInfo,
    LostWorkers,
    ShutdownWorkers,
    ExcludedWorkers,
    Hostnames,
    Exclude,
    PartitionLocationInfo,
    UnavailablePeers,
    ShutdownState,
    RegistrationState,
    Exit,
    WorkerEvent,
    WorkerEventInfo,
}

impl AdminOp {
    pub const ALL: [AdminOp; 18] = [
        AdminOp::WorkerInfo,
        AdminOp::ThreadDump,
        AdminOp::ShuffleList,
        AdminOp::ApplicationList,
        AdminOp::TopDiskUsage,
        AdminOp::MasterGroupInfo,
        AdminOp::LostWorkers,
        AdminOp::ShutdownWorkers,
        AdminOp::ExcludedWorkers,
        AdminOp::Hostnames,
        AdminOp::Exclude,
        AdminOp::PartitionLocationInfo,
        AdminOp::UnavailablePeers,
        AdminOp::ShutdownState,
        AdminOp::RegistrationState,
        AdminOp::Exit,
        AdminOp::WorkerEvent,
        AdminOp::WorkerEventInfo,
    ];

    /// Operations every role must implement.
    pub const MANDATORY: [AdminOp; 5] = [
        AdminOp::WorkerInfo,
        AdminOp::ThreadDump,
        AdminOp::ShuffleList,
        AdminOp::ApplicationList,
        AdminOp::TopDiskUsage,
    ];

    /// Endpoint path of the operation on the admin HTTP surface.
    pub fn path(&self) -> &'static str {
        match self {
            AdminOp::WorkerInfo => "/workerInfo",
            AdminOp::ThreadDump => "/threadDump",
            AdminOp::ShuffleList => "/shuffle",
            AdminOp::ApplicationList => "/applications",
            AdminOp::TopDiskUsage => "/listTopDiskUsedApps",
            AdminOp::MasterGroupInfo => "/masterGroupInfo",
            AdminOp::LostWorkers => "/lostWorkers",
            AdminOp::ShutdownWorkers => "/shutdownWorkers",
            AdminOp::ExcludedWorkers => "/excludedWorkers",
            AdminOp::Hostnames => "/hostnames",
            AdminOp::Exclude => "/exclude",
            AdminOp::PartitionLocationInfo => "/listPartitionLocationInfo",
            AdminOp::UnavailablePeers => "/unavailablePeers",
            AdminOp::ShutdownState => "/isShutdown",
            AdminOp::RegistrationState => "/isRegistered",
            AdminOp::Exit => "/exit",
            AdminOp::WorkerEvent => "/sendWorkerEvent",
            AdminOp::WorkerEventInfo => "/workerEventInfo",
        }
    }

    /// Operation name, the endpoint path without its leading slash.
    pub fn name(&self) -> &'static str {
        &self.path()[1..]
    }

    pub fn is_mandatory(&self) -> bool {
        Self::MANDATORY.contains(self)
    }
}

impl fmt::Display for AdminOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One administrative call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRequest {
    WorkerInfo,
    ThreadDump,
    ShuffleList,
    ApplicationList,
    TopDiskUsage,
    MasterGroupInfo,
    LostWorkers,
    ShutdownWorkers,
    ExcludedWorkers,
    Hostnames,
    /// Comma-separated worker ids to add to / remove from the exclusion list.
    Exclude { add: String, remove: String },
    PartitionLocationInfo,
    UnavailablePeers,
    ShutdownState,
    RegistrationState,
    Exit { kind: ExitKind },
    /// Event type name and comma-separated target workers.
    WorkerEvent { kind: String, workers: String },
    WorkerEventInfo,
}

impl AdminRequest {
    pub fn op(&self) -> AdminOp {
        match self {
            AdminRequest::WorkerInfo => AdminOp::WorkerInfo,
            AdminRequest::ThreadDump => AdminOp::ThreadDump,
            AdminRequest::ShuffleList => AdminOp::ShuffleList,
            AdminRequest::ApplicationList => AdminOp::ApplicationList,
            AdminRequest::TopDiskUsage => AdminOp::TopDiskUsage,
            AdminRequest::MasterGroupInfo => AdminOp::MasterGroupInfo,
            AdminRequest::LostWorkers => AdminOp::LostWorkers,
            AdminRequest::ShutdownWorkers => AdminOp::ShutdownWorkers,
            AdminRequest::ExcludedWorkers => AdminOp::ExcludedWorkers,
            AdminRequest::Hostnames => AdminOp::Hostnames,
            AdminRequest::Exclude { .. } => AdminOp::Exclude,
            AdminRequest::PartitionLocationInfo => AdminOp::PartitionLocationInfo,
            AdminRequest::UnavailablePeers => AdminOp::UnavailablePeers,
            AdminRequest::ShutdownState => AdminOp::ShutdownState,
            AdminRequest::RegistrationState => AdminOp::RegistrationState,
            AdminRequest::Exit { .. } => AdminOp::Exit,
            AdminRequest::WorkerEvent { .. } => AdminOp::WorkerEvent,
            AdminRequest::WorkerEventInfo => AdminOp::WorkerEventInfo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<_> = AdminOp::ALL.iter().map(|op| op.path()).collect();
        assert_eq!(paths.len(), AdminOp::ALL.len());
    }

    #[test]
    fn name_drops_leading_slash() {
        assert_eq!(AdminOp::TopDiskUsage.name(), "listTopDiskUsedApps");
        assert_eq!(AdminOp::WorkerEvent.to_string(), "sendWorkerEvent");
    }

    #[test]
    fn mandatory_ops_are_flagged() {
        let mandatory = AdminOp::ALL.iter().filter(|op| op.is_mandatory()).count();
        assert_eq!(mandatory, 5);
        assert!(!AdminOp::Exit.is_mandatory());
    }

    #[test]
    fn request_maps_to_its_op() {
        let req = AdminRequest::Exclude {
            add: "w1".into(),
            remove: String::new(),
        };
        assert_eq!(req.op(), AdminOp::Exclude);
        let req = AdminRequest::Exit {
            kind: ExitKind::Decommission,
        };
        assert_eq!(req.op(), AdminOp::Exit);
    }
}
