use crate::config::ConfigError;
use crate::moderation::ModerationServiceError;
use crate::telemetry::TelemetryError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Payload(JsonRejection),
    Decode(serde_json::Error),
    Moderation(ModerationServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Payload(err) => write!(f, "invalid request body: {}", err.body_text()),
            AppError::Decode(err) => write!(f, "invalid moderation request: {}", err),
            AppError::Moderation(err) => write!(f, "moderation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Payload(err) => Some(err),
            AppError::Decode(err) => Some(err),
            AppError::Moderation(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::Moderation(ModerationServiceError::Invalid(violation)) => json!({
                "error": violation.to_string(),
                "field": violation.field(),
            }),
            _ => json!({ "error": self.to_string() }),
        };

        let status = match &self {
            AppError::Payload(rejection) => rejection.status(),
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Moderation(ModerationServiceError::Invalid(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Moderation(ModerationServiceError::ScoreOutOfRange { .. })
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Payload(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<ModerationServiceError> for AppError {
    fn from(value: ModerationServiceError) -> Self {
        Self::Moderation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::RequestViolation;

    #[test]
    fn violations_map_to_unprocessable_entity() {
        let error = AppError::from(ModerationServiceError::Invalid(
            RequestViolation::MissingField {
                field: "title".to_string(),
            },
        ));

        assert_eq!(
            error.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn score_invariant_breaches_are_internal_errors() {
        let error = AppError::from(ModerationServiceError::ScoreOutOfRange {
            listing_id: "listing-1".to_string(),
            score: 1.5,
        });

        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn config_errors_render_context() {
        let error = AppError::from(ConfigError::InvalidPort);
        assert_eq!(
            error.to_string(),
            "configuration error: APP_PORT must be a valid u16"
        );
    }
}
