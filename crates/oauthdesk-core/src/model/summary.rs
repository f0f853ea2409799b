use serde::{Deserialize, Serialize};

/// Usage against a per-user limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuota {
    pub total: u64,
    pub used: u64,
}

impl SummaryQuota {
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.total
    }
}

/// Per-user quota overview. One per user; carries no identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub applications: SummaryQuota,
    pub authorizations: SummaryQuota,
    pub contacts: SummaryQuota,
}
