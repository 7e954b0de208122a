//! Error types for the ZDAD core

use thiserror::Error;

use crate::models::PermissionStatus;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not a physical device")]
    NotPhysicalDevice,

    #[error("Notification permission not granted: {0}")]
    PermissionDenied(PermissionStatus),

    #[error("Push token fetch failed: {0}")]
    TokenFetch(String),

    #[error("Notification channel setup failed: {0}")]
    Channel(String),

    #[error("No push token available")]
    MissingToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
