use crate::cli::ServeArgs;
use crate::infra::{AppState, DecisionTally, DECISIONS_METRIC};
use crate::routes::with_moderation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use listing_moderation::config::AppConfig;
use listing_moderation::error::AppError;
use listing_moderation::moderation::{ModerationEngine, ModerationService};
use listing_moderation::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    metrics::describe_counter!(
        DECISIONS_METRIC,
        "Moderation decisions returned, labelled by status"
    );

    let tally = Arc::new(DecisionTally::default());
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        tally: tally.clone(),
    };

    let moderation = &config.moderation;
    info!(
        banned_keywords = moderation.banned_keywords().len(),
        flagged_keywords = moderation.flagged_keywords().len(),
        flagged_mime_prefixes = ?moderation.flagged_mime_prefixes(),
        max_image_size_bytes = moderation.max_image_size_bytes(),
        "moderation settings loaded"
    );

    let engine = ModerationEngine::new(config.moderation.clone());
    let moderation_service = Arc::new(ModerationService::new(engine, tally));

    let app = with_moderation_routes(moderation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, service = %config.service_name, "listing moderation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
