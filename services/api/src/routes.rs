use crate::infra::{AppState, DecisionTally};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use listing_moderation::moderation::{moderation_router, ModerationService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_moderation_routes(
    service: Arc<ModerationService<DecisionTally>>,
) -> axum::Router {
    moderation_router(service)
        .route("/health", get(healthcheck))
        .route("/healthz", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/metrics/decisions", get(decision_counts_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn decision_counts_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    Json(state.tally.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use listing_moderation::config::ModerationSettings;
    use listing_moderation::moderation::ModerationEngine;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<DecisionTally>) {
        let tally = Arc::new(DecisionTally::default());
        let service = Arc::new(ModerationService::new(
            ModerationEngine::new(ModerationSettings::default()),
            tally.clone(),
        ));
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
            tally: tally.clone(),
        };
        (with_moderation_routes(service).layer(Extension(state)), tally)
    }

    async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.expect("route executes");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("json payload"))
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let (router, _) = app(true);

        let (status, payload) = send(
            router,
            Request::get("/healthz").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let (router, _) = app(false);

        let (status, payload) =
            send(router, Request::get("/ready").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload["status"], json!("initializing"));
    }

    #[tokio::test]
    async fn decision_counts_follow_moderation_calls() {
        let (router, tally) = app(true);

        let (status, decision) = send(
            router.clone(),
            Request::post("/moderations/listings")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "listingId": "listing-5",
                        "sellerId": "seller-5",
                        "reason": "listing_created",
                        "title": "Ivory chess set"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decision["status"], json!("rejected"));

        let (status, counts) = send(
            router,
            Request::get("/metrics/decisions")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            counts,
            json!({ "approved": 0, "flagged": 0, "rejected": 1, "total": 1 })
        );
        assert_eq!(tally.snapshot().rejected, 1);
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let (router, _) = app(true);

        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; version=0.0.4"
        );
    }
}
