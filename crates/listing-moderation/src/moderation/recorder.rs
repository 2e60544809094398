use serde::Serialize;

use super::domain::{ModerationDecision, ModerationStatus};

/// Hook invoked after every successful decision (metrics, audit sinks).
///
/// Implementations observe the decision; they cannot change it.
pub trait DecisionRecorder: Send + Sync {
    fn record(&self, decision: &ModerationDecision);
}

/// Recorder that discards every decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl DecisionRecorder for NoopRecorder {
    fn record(&self, _decision: &ModerationDecision) {}
}

/// Aggregate decision counts grouped by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionCounts {
    pub approved: u64,
    pub flagged: u64,
    pub rejected: u64,
    pub total: u64,
}

impl DecisionCounts {
    pub fn get(&self, status: ModerationStatus) -> u64 {
        match status {
            ModerationStatus::Approved => self.approved,
            ModerationStatus::Flagged => self.flagged,
            ModerationStatus::Rejected => self.rejected,
        }
    }
}
