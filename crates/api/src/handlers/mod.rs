//! Handler modules plus the state and error types they share.

pub mod workouts;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use db::{DbError, DbPool};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

/// Errors a handler can surface to the client.
///
/// Storage failures keep their cause server-side: it is logged at error
/// level and the client only sees a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid workout ID")]
    InvalidWorkoutId,

    #[error("Invalid workout data")]
    InvalidWorkoutData,

    #[error("Workout not found")]
    WorkoutNotFound,

    #[error("Internal server error")]
    Storage(#[source] DbError),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => Self::WorkoutNotFound,
            other => Self::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidWorkoutId | Self::InvalidWorkoutData => StatusCode::BAD_REQUEST,
            Self::WorkoutNotFound => StatusCode::NOT_FOUND,
            Self::Storage(cause) => {
                error!("storage failure: {cause}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            Self::Storage(_) => json!({ "error": "Internal server error" }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Parse a `/workouts/{id}` path segment into a positive workout id.
pub(crate) fn parse_workout_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidWorkoutId),
    }
}
