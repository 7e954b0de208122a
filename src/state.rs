//! Application state management
//!
//! Uses Arc<RwLock<>> for thread-safe concurrent access to shared state.
//! The Rust core maintains the single source of truth (Headless Core
//! pattern); the push token is injected through this state, never read
//! from a hidden global.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::chat::ChatLog;
use crate::error::{AppError, AppResult};
use crate::models::PushToken;

/// Global application state
///
/// Holds the one datum shared between the registrar and the dispatcher
/// (the push token) plus the ephemeral chat log. Nothing here survives a
/// restart.
pub struct AppState {
    /// Push token for this launch (None until registration succeeds)
    pub push_token: Option<PushToken>,

    /// In-memory chat log, newest first
    pub chat: ChatLog,

    /// Push relay base URL
    pub relay_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create new application state with the production relay URL
    pub fn new() -> Self {
        Self {
            push_token: None,
            chat: ChatLog::new(),
            relay_url: "https://exp.host".to_string(),
        }
    }

    /// Create state pointed at a non-default relay (used by tests)
    pub fn with_relay_url(relay_url: impl Into<String>) -> Self {
        Self {
            relay_url: relay_url.into(),
            ..Self::new()
        }
    }

    /// Whether a push token is available for this launch
    pub fn has_push_token(&self) -> bool {
        self.push_token.is_some()
    }

    /// Store the token obtained by the registrar
    pub fn set_push_token(&mut self, token: PushToken) {
        tracing::info!("Push token stored: {}", token);
        self.push_token = Some(token);
    }

    /// Current push token, if any
    pub fn push_token(&self) -> Option<&PushToken> {
        self.push_token.as_ref()
    }

    /// Require a push token, returning an error if none is held
    pub fn require_push_token(&self) -> AppResult<&PushToken> {
        self.push_token.as_ref().ok_or(AppError::MissingToken)
    }
}

/// Thread-safe shared state type
pub type SharedState = Arc<RwLock<AppState>>;

/// Create a new shared state instance
pub fn create_shared_state() -> SharedState {
    Arc::new(RwLock::new(AppState::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_absent() {
        let state = AppState::new();
        assert!(!state.has_push_token());
        assert!(matches!(
            state.require_push_token(),
            Err(AppError::MissingToken)
        ));
    }

    #[test]
    fn test_set_and_read_token() {
        let mut state = AppState::new();
        state.set_push_token(PushToken::new("TOKEN_X").unwrap());
        assert!(state.has_push_token());
        assert_eq!(state.push_token().unwrap().as_str(), "TOKEN_X");
        assert_eq!(state.require_push_token().unwrap().as_str(), "TOKEN_X");
    }

    #[test]
    fn test_relay_url_defaults_to_production() {
        assert_eq!(AppState::new().relay_url, "https://exp.host");
        assert_eq!(
            AppState::with_relay_url("http://localhost:1").relay_url,
            "http://localhost:1"
        );
    }
}
