//! Error types for MedTrack server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Machine-readable error codes returned to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidId,
    MissingRequiredField,
    InvalidFieldType,
    NotFound,
    EquipmentNotFound,
    ScheduleNotFound,
    DuplicateSerialNumber,
    ForeignKeyConstraint,
    NotAuthorized,
    DbFailure,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorCode::InvalidFieldType => "INVALID_FIELD_TYPE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::EquipmentNotFound => "EQUIPMENT_NOT_FOUND",
            ErrorCode::ScheduleNotFound => "SCHEDULE_NOT_FOUND",
            ErrorCode::DuplicateSerialNumber => "DUPLICATE_SERIAL_NUMBER",
            ErrorCode::ForeignKeyConstraint => "FOREIGN_KEY_CONSTRAINT",
            ErrorCode::NotAuthorized => "NOT_AUTHORIZED",
            ErrorCode::DbFailure => "DB_FAILURE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("{message}")]
    Validation { code: ErrorCode, message: String },

    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    ReferentialIntegrity(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// A required field is absent or empty after trimming
    pub fn missing_field(field: &str) -> Self {
        AppError::Validation {
            code: ErrorCode::MissingRequiredField,
            message: format!("{} is required", field),
        }
    }

    /// A supplied field has the wrong shape or an out-of-domain value
    pub fn invalid_field(field: &str, reason: &str) -> Self {
        AppError::Validation {
            code: ErrorCode::InvalidFieldType,
            message: format!("{} {}", field, reason),
        }
    }

    pub fn record_not_found(what: &str, id: i32) -> Self {
        AppError::NotFound {
            code: ErrorCode::NotFound,
            message: format!("{} {} not found", what, id),
        }
    }

    /// A referenced equipment row does not exist
    pub fn equipment_not_found(id: i32) -> Self {
        AppError::NotFound {
            code: ErrorCode::EquipmentNotFound,
            message: format!("Equipment {} not found", id),
        }
    }

    /// A referenced schedule row does not exist
    pub fn schedule_not_found(id: i32) -> Self {
        AppError::NotFound {
            code: ErrorCode::ScheduleNotFound,
            message: format!("Maintenance schedule {} not found", id),
        }
    }
}

// Extractor rejections surface with the same machine-readable codes as the
// validation layer (see the api module's Path/Query/Json wrappers).

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation {
            code: ErrorCode::InvalidId,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            code: ErrorCode::InvalidFieldType,
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            code: ErrorCode::InvalidFieldType,
            message: rejection.body_text(),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Validation { code, message } => {
                (StatusCode::BAD_REQUEST, *code, message.clone())
            }
            AppError::NotFound { code, message } => {
                (StatusCode::NOT_FOUND, *code, message.clone())
            }
            AppError::Duplicate(msg) => {
                (StatusCode::CONFLICT, ErrorCode::DuplicateSerialNumber, msg.clone())
            }
            AppError::ReferentialIntegrity(msg) => {
                (StatusCode::CONFLICT, ErrorCode::ForeignKeyConstraint, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.as_str().to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
