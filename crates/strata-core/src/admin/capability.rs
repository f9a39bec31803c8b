use std::fmt;

use crate::admin::AdminOp;

/// Set of [`AdminOp`]s a role implements.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u32);

impl Capabilities {
    /// Operations every role carries.
    pub const MANDATORY: Capabilities = Capabilities::of(&AdminOp::MANDATORY);

    /// Master role: cluster-wide worker management and worker events.
    pub const MASTER: Capabilities = Capabilities::MANDATORY
        .with(AdminOp::MasterGroupInfo)
        .with(AdminOp::LostWorkers)
        .with(AdminOp::ShutdownWorkers)
        .with(AdminOp::ExcludedWorkers)
        .with(AdminOp::Hostnames)
        .with(AdminOp::Exclude)
        .with(AdminOp::WorkerEvent)
        .with(AdminOp::WorkerEventInfo);

    /// Worker role: local partition state, peers and exit control.
    pub const WORKER: Capabilities = Capabilities::MANDATORY
        .with(AdminOp::PartitionLocationInfo)
        .with(AdminOp::UnavailablePeers)
        .with(AdminOp::ShutdownState)
        .with(AdminOp::RegistrationState)
        .with(AdminOp::Exit);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn of(ops: &[AdminOp]) -> Self {
        let mut caps = Self::empty();
        let mut i = 0;
        while i < ops.len() {
            caps = caps.with(ops[i]);
            i += 1;
        }
        caps
    }

    pub const fn with(self, op: AdminOp) -> Self {
        Self(self.0 | bit(op))
    }

    pub const fn contains(&self, op: AdminOp) -> bool {
        self.0 & bit(op) != 0
    }

    /// Operations in the set, in [`AdminOp::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = AdminOp> + '_ {
        AdminOp::ALL.into_iter().filter(|op| self.contains(*op))
    }

    /// The set without its mandatory operations.
    pub const fn extended(&self) -> Self {
        Self(self.0 & !Self::MANDATORY.0)
    }

    pub const fn intersection(&self, other: &Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

const fn bit(op: AdminOp) -> u32 {
    1 << op as u32
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
