//! Listing moderation: request validation, the rule pipeline, and the HTTP
//! surface that exposes it.
//!
//! The engine is a pure function of the request and the [`ModerationSettings`]
//! it was built with. Rules run as an ordered list of stages; each stage may
//! replace the draft's status, score, or notes and may append labels.

pub mod domain;
pub mod guard;
pub mod recorder;
pub mod router;
mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ListingImage, ListingVariant, ModerationDecision, ModerationLabel, ModerationRequest,
    ModerationStatus,
};
pub use guard::{
    ImageSubmission, ModerationSubmission, RequestGuard, RequestViolation, VariantSubmission,
};
pub use recorder::{DecisionCounts, DecisionRecorder, NoopRecorder};
pub use router::moderation_router;
pub use service::{ModerationService, ModerationServiceError};

use crate::config::ModerationSettings;
use rules::{round_score, DecisionDraft, PIPELINE};
use tracing::trace;

/// Stateless evaluator applying the configured rule set to a listing.
#[derive(Debug, Clone)]
pub struct ModerationEngine {
    settings: ModerationSettings,
}

impl ModerationEngine {
    pub fn new(settings: ModerationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ModerationSettings {
        &self.settings
    }

    pub fn score_listing(&self, request: &ModerationRequest) -> ModerationDecision {
        let mut draft = DecisionDraft::default();

        for stage in PIPELINE {
            let outcome = stage.evaluate(request, &self.settings, &draft);
            if !outcome.is_empty() {
                trace!(?stage, ?outcome, "rule stage applied");
            }
            draft.apply(outcome);
        }

        ModerationDecision {
            listing_id: request.listing_id.clone(),
            status: draft.status,
            score: round_score(draft.score),
            labels: draft.labels,
            notes: draft.notes,
        }
    }
}
