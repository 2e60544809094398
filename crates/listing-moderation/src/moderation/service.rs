use std::sync::Arc;

use tracing::{field, info, info_span, warn};

use super::domain::{ModerationDecision, ModerationRequest};
use super::guard::{ModerationSubmission, RequestGuard, RequestViolation};
use super::recorder::DecisionRecorder;
use super::ModerationEngine;

/// Service composing the request guard, the engine, and the decision recorder.
pub struct ModerationService<O> {
    guard: RequestGuard,
    engine: Arc<ModerationEngine>,
    recorder: Arc<O>,
}

impl<O> ModerationService<O>
where
    O: DecisionRecorder + 'static,
{
    pub fn new(engine: ModerationEngine, recorder: Arc<O>) -> Self {
        Self {
            guard: RequestGuard,
            engine: Arc::new(engine),
            recorder,
        }
    }

    pub fn engine(&self) -> &ModerationEngine {
        &self.engine
    }

    /// Validate a wire submission and score it.
    pub fn moderate(
        &self,
        submission: ModerationSubmission,
    ) -> Result<ModerationDecision, ModerationServiceError> {
        let request = self.guard.request_from_submission(submission).map_err(|err| {
            warn!(invalid_field = err.field(), error = %err, "moderation request rejected");
            err
        })?;
        self.moderate_request(&request)
    }

    /// Score an already validated request.
    pub fn moderate_request(
        &self,
        request: &ModerationRequest,
    ) -> Result<ModerationDecision, ModerationServiceError> {
        let span = info_span!(
            "moderate_listing",
            listing_id = %request.listing_id,
            seller_id = %request.seller_id,
            score = field::Empty,
        );
        let _entered = span.enter();

        info!(
            event = "request_received",
            reason = %request.reason,
            images = request.images.len(),
            variants = request.variants.len(),
            "moderation request received"
        );

        let decision = self.engine.score_listing(request);
        span.record("score", decision.score);

        if !decision.score_within_bounds() {
            return Err(ModerationServiceError::ScoreOutOfRange {
                listing_id: decision.listing_id,
                score: decision.score,
            });
        }

        self.recorder.record(&decision);

        info!(
            event = "decision_returned",
            status = decision.status.label(),
            score = decision.score,
            labels = ?decision.labels,
            "moderation decision returned"
        );

        Ok(decision)
    }
}

/// Error raised by the moderation service.
#[derive(Debug, thiserror::Error)]
pub enum ModerationServiceError {
    #[error(transparent)]
    Invalid(#[from] RequestViolation),
    #[error("decision for listing {listing_id} produced out-of-range score {score}")]
    ScoreOutOfRange { listing_id: String, score: f64 },
}
