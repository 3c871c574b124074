use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Input that can never be stored or served, whatever the store holds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Failures raised by the team store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("team {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failures raised while talking to the Players service.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid players service base url '{0}'")]
    InvalidBaseUrl(String),

    #[error("players service did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("players service request failed: {0}")]
    Transport(String),

    #[error("players service answered with status {0}")]
    Status(u16),

    #[error("could not decode players service response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("team with id {0} was not found")]
    TeamNotFound(i64),

    #[error("players service unavailable: {0}")]
    UpstreamUnavailable(#[from] GatewayError),

    #[error("storage failure: {0}")]
    Database(sqlx::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::TeamNotFound(id),
            StoreError::Validation(e) => ServiceError::Validation(e.0),
            StoreError::Database(e) => ServiceError::Database(e),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err.0)
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::TeamNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::UpstreamUnavailable(GatewayError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::TeamNotFound(_) => "team_not_found",
            ServiceError::UpstreamUnavailable(_) => "upstream_unavailable",
            ServiceError::Database(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServiceError::Database(e) => {
                error!("DB query error: {}", e);
                "There was a database issue.".to_string()
            }
            ServiceError::UpstreamUnavailable(e) => {
                error!("Players service call failed: {}", e);
                self.to_string()
            }
            _ => {
                warn!("Rejected request: {}", self);
                self.to_string()
            }
        };

        let body = ErrorBody {
            error: self.kind(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn store_errors_map_to_domain_errors() {
        assert!(matches!(
            ServiceError::from(StoreError::NotFound(4)),
            ServiceError::TeamNotFound(4)
        ));
        assert!(matches!(
            ServiceError::from(StoreError::from(ValidationError("blank".into()))),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            ServiceError::from(StoreError::Database(sqlx::Error::RowNotFound)),
            ServiceError::Database(_)
        ));
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ServiceError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::TeamNotFound(1).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::from(GatewayError::Timeout(Duration::from_secs(5))).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(ServiceError::from(GatewayError::Status(500)).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ServiceError::from(GatewayError::Decode("eof".into())).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
