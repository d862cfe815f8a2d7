use crate::overlap::InvalidRange;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_valid::{ValidRejection, ValidationRejection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Name of the exclusion constraint that keeps bookings of a unit disjoint.
pub const BOOKING_OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{kind} {id} does not exist")]
    NotFound { kind: &'static str, id: Uuid },

    /// A concurrent writer committed an overlapping booking first.
    #[error("Booking was raced by a concurrent reservation")]
    RaceLost,

    #[error("Referenced record does not exist: {0}")]
    InvalidReference(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DieselError> for BackendError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
                BackendError::RaceLost
            }
            DieselError::DatabaseError(_, ref info)
                if info.constraint_name() == Some(BOOKING_OVERLAP_CONSTRAINT) =>
            {
                BackendError::RaceLost
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                BackendError::InvalidReference(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                BackendError::Unavailable(info.message().to_string())
            }
            err => BackendError::Database(err.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    #[error("Unit unavailable for these dates")]
    Conflict { conflicting_booking_ids: Vec<Uuid> },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{}", .0.body_text())]
    MalformedBody(JsonRejection),

    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl From<ValidRejection<JsonRejection>> for ApiError {
    fn from(rejection: ValidRejection<JsonRejection>) -> Self {
        match rejection {
            ValidationRejection::Valid(errors) => ApiError::InvalidRequest(errors.to_string()),
            ValidationRejection::Inner(rejection) => ApiError::MalformedBody(rejection),
        }
    }
}

impl From<InvalidRange> for ApiError {
    fn from(err: InvalidRange) -> Self {
        ApiError::Reservation(err.into())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conflicting_booking_ids: Option<Vec<Uuid>>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(rejection) => rejection.status(),
            ApiError::Reservation(ReservationError::InvalidRange(_)) => StatusCode::BAD_REQUEST,
            ApiError::Reservation(ReservationError::Conflict { .. }) => StatusCode::CONFLICT,
            ApiError::Reservation(ReservationError::Backend(err)) | ApiError::Backend(err) => {
                match err {
                    BackendError::NotFound { .. } => StatusCode::NOT_FOUND,
                    BackendError::RaceLost => StatusCode::CONFLICT,
                    BackendError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    BackendError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    BackendError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(err = %self, "Request failed");
        }

        let conflicting_booking_ids = match &self {
            ApiError::Reservation(ReservationError::Conflict {
                conflicting_booking_ids,
            }) => Some(conflicting_booking_ids.clone()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            conflicting_booking_ids,
        };

        (status, Json(body)).into_response()
    }
}
