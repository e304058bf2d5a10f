//! Error types shared by the allocator and the repository backends.

use serde_json::{Value, json};

use crate::utils::alias_validator::AliasValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A caller-supplied custom alias was rejected.
    #[error(transparent)]
    InvalidAlias(#[from] AliasValidationError),

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// No free derived key was found within the attempt ceiling.
    #[error("{message}")]
    CollisionExhausted { message: String, details: Value },

    /// The age-gated backend refused to remove a record older than its lock age.
    #[error("{message}")]
    RemovalLocked { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn collision_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CollisionExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn removal_locked(message: impl Into<String>, details: Value) -> Self {
        Self::RemovalLocked {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable error code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidAlias(_) | AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::CollisionExhausted { .. } => "collision_exhausted",
            AppError::RemovalLocked { .. } => "removal_locked",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Structured details attached to the error, if any.
    pub fn details(&self) -> Value {
        match self {
            AppError::InvalidAlias(e) => json!({ "reason": e.reason() }),
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::CollisionExhausted { details, .. }
            | AppError::RemovalLocked { details, .. }
            | AppError::Internal { details, .. } => details.clone(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::PoolTimedOut => {
            AppError::internal("Storage backend unavailable", json!({ "reason": "pool timed out" }))
        }
        sqlx::Error::Io(io) => AppError::internal(
            "Storage backend unavailable",
            json!({ "reason": io.to_string() }),
        ),
        _ => {
            let constraint = e
                .as_database_error()
                .and_then(|db| db.constraint())
                .map(str::to_string);
            AppError::internal(
                "Database error",
                json!({ "reason": e.to_string(), "constraint": constraint }),
            )
        }
    }
}
