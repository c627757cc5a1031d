use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

/// Bounds of the reservation a booking attempt collided with, carried
/// in `AppError::TimeConflict` so the caller can display the taken slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingInterval {
    pub reservation_id: Uuid,
    pub starts_at: String,
    pub ends_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid time \"{0}\", expected HH:MM")]
    InvalidTimeFormat(String),
    #[error("invalid date \"{0}\", expected YYYY-MM-DD")]
    InvalidDateFormat(String),
    #[error("{0}")]
    InvalidTimeRange(String),
    #[error("a reservation of {actual} minutes is shorter than the minimum of {min} minutes")]
    DurationTooShort { actual: u16, min: u16 },
    #[error("a reservation of {actual} minutes is longer than the maximum of {max} minutes")]
    DurationTooLong { actual: u16, max: u16 },
    #[error("{0} was not found")]
    EntityNotFound(String),
    #[error("the requested slot overlaps an existing reservation")]
    TimeConflict(Option<ConflictingInterval>),
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("reservation {0} is already cancelled")]
    AlreadyCancelled(Uuid),
    #[error("request is missing a user identity")]
    UnauthenticatedUser,
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("transaction failed")]
    TransactionError(#[source] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidTimeFormat(_)
            | AppError::InvalidDateFormat(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidTimeRange(_)
            | AppError::DurationTooShort { .. }
            | AppError::DurationTooLong { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::TimeConflict(_) | AppError::AlreadyCancelled(_) => StatusCode::CONFLICT,
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::UnauthenticatedUser => StatusCode::UNAUTHORIZED,
            AppError::ConversionEntityError(_)
            | AppError::SpecificOperationError(_)
            | AppError::TransactionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conflict: Option<ConflictingInterval>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "unexpected error happened"
            );
        }
        let conflict = match &self {
            AppError::TimeConflict(conflict) => conflict.clone(),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            conflict,
        };
        (status, Json(body)).into_response()
    }
}
