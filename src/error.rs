// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the entry model, session and sync layers.

/// Application error type.
///
/// Nothing here is fatal to the in-memory session: `NotFound` is a benign
/// no-op and `SyncFailure` only means the remote copy is stale.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Snapshot sync failed: {0}")]
    SyncFailure(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, used as a structured log field.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidDateKey(_) => "invalid_date_key",
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::SyncFailure(_) => "sync_failure",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether the error leaves local state untouched and can be ignored.
    pub fn is_benign(&self) -> bool {
        matches!(self, AppError::NotFound(_) | AppError::SyncFailure(_))
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
