//! Outcome of destroying a customer's active schedules.

use payments_types::{DestroyResponse, GatewayError, ScheduleId};
use serde::Serialize;

/// A schedule whose deletion failed, with the error the gateway reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDeletion {
    pub id: ScheduleId,
    pub error: GatewayError,
}

/// Aggregate result of a settle-all batch of deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DestroyOutcome {
    /// Every targeted schedule was deleted (also when none were targeted).
    Deleted,
    /// Some deletions succeeded and some failed.
    Partial,
    /// Every deletion failed.
    Failed,
}

/// Which schedules were deleted and which were not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestroySchedulesReport {
    pub deleted: Vec<ScheduleId>,
    pub failed: Vec<FailedDeletion>,
}

impl DestroySchedulesReport {
    pub fn outcome(&self) -> DestroyOutcome {
        match (self.deleted.is_empty(), self.failed.is_empty()) {
            (_, true) => DestroyOutcome::Deleted,
            (true, false) => DestroyOutcome::Failed,
            (false, false) => DestroyOutcome::Partial,
        }
    }

    /// True if no deletion failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of deletions issued.
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    pub fn failed_ids(&self) -> impl Iterator<Item = &ScheduleId> {
        self.failed.iter().map(|f| &f.id)
    }

    /// Collapses the report into the `{ deleted: true }` marker, or hands the
    /// report back when any deletion failed.
    pub fn into_destroy_response(self) -> Result<DestroyResponse, Self> {
        if self.is_complete() {
            Ok(DestroyResponse::deleted())
        } else {
            Err(self)
        }
    }
}
