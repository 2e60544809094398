use listing_moderation::moderation::{
    DecisionCounts, DecisionRecorder, ModerationDecision, ModerationStatus,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) const DECISIONS_METRIC: &str = "moderation_decisions_total";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) tally: Arc<DecisionTally>,
}

/// Counts decisions by status and mirrors them into the Prometheus recorder.
#[derive(Debug, Default)]
pub(crate) struct DecisionTally {
    approved: AtomicU64,
    flagged: AtomicU64,
    rejected: AtomicU64,
}

impl DecisionTally {
    pub(crate) fn snapshot(&self) -> DecisionCounts {
        let approved = self.approved.load(Ordering::Relaxed);
        let flagged = self.flagged.load(Ordering::Relaxed);
        let rejected = self.rejected.load(Ordering::Relaxed);
        DecisionCounts {
            approved,
            flagged,
            rejected,
            total: approved + flagged + rejected,
        }
    }

    fn counter(&self, status: ModerationStatus) -> &AtomicU64 {
        match status {
            ModerationStatus::Approved => &self.approved,
            ModerationStatus::Flagged => &self.flagged,
            ModerationStatus::Rejected => &self.rejected,
        }
    }
}

impl DecisionRecorder for DecisionTally {
    fn record(&self, decision: &ModerationDecision) {
        self.counter(decision.status).fetch_add(1, Ordering::Relaxed);
        metrics::counter!(DECISIONS_METRIC, "status" => decision.status.label()).increment(1);
    }
}
