use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use super::domain::ModerationDecision;
use super::guard::ModerationSubmission;
use super::recorder::DecisionRecorder;
use super::service::ModerationService;
use crate::error::AppError;

/// Router builder exposing the listing moderation endpoint.
pub fn moderation_router<O>(service: Arc<ModerationService<O>>) -> Router
where
    O: DecisionRecorder + 'static,
{
    Router::new()
        .route("/moderations/listings", post(moderate_handler::<O>))
        .with_state(service)
}

pub(crate) async fn moderate_handler<O>(
    State(service): State<Arc<ModerationService<O>>>,
    payload: Result<Json<ModerationSubmission>, JsonRejection>,
) -> Result<Json<ModerationDecision>, AppError>
where
    O: DecisionRecorder + 'static,
{
    let Json(submission) = payload?;
    let decision = service.moderate(submission)?;
    Ok(Json(decision))
}
