//! Chat session
//!
//! The chat log is ephemeral UI state: an in-memory, newest-first list of
//! bubbles, reset on every launch. The session also owns the one
//! user-initiated push action: send a fixed "new message" notification to
//! this device's own token, then simulate the peer's reply shortly after.

use std::sync::Arc;
use std::time::Duration;

use crate::api::PushClient;
use crate::error::{AppError, AppResult};
use crate::models::{ChatMessage, PushOutcome};
use crate::platform::AlertSink;
use crate::state::SharedState;

/// Title used for the self-addressed demo notification
pub const NOTIFICATION_TITLE: &str = "Nuevo Mensaje en ZDAD";
/// Body used for the self-addressed demo notification
pub const NOTIFICATION_BODY: &str = "¡Tienes un nuevo mensaje!";
/// Text of the simulated peer reply
pub const SIMULATED_REPLY: &str = "¡Hola! Recibí tu notificación";

const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// In-memory chat log, newest message first
#[derive(Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages, newest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message written by the local user
    pub fn push_mine(&mut self, text: impl Into<String>) {
        self.messages.insert(0, ChatMessage::now(text, true));
    }

    /// Append a message from the (simulated) peer
    pub fn push_theirs(&mut self, text: impl Into<String>) {
        self.messages.insert(0, ChatMessage::now(text, false));
    }
}

/// One user's view of the chat screen: compose messages, fire the demo
/// notification
pub struct ChatSession {
    state: SharedState,
    alerts: Arc<dyn AlertSink>,
    reply_delay: Duration,
}

impl ChatSession {
    pub fn new(state: SharedState, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            state,
            alerts,
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }

    /// Override the simulated-reply delay (used by tests)
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Add a message composed by the user; blank input is ignored
    pub async fn send_message(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.state.write().await.chat.push_mine(text);
    }

    /// Send the demo notification to this device's own push token
    ///
    /// With no token available this alerts the user and makes no network
    /// call. After a successful dispatch a simulated peer reply is appended
    /// to the log on a spawned task (fire-and-forget).
    pub async fn send_notification(&self) -> AppResult<PushOutcome> {
        let (token, relay_url) = {
            let state = self.state.read().await;
            (state.push_token().cloned(), state.relay_url.clone())
        };

        let Some(token) = token else {
            self.alerts.alert("Error", "No hay token disponible");
            return Err(AppError::MissingToken);
        };

        let client = PushClient::new(&relay_url);
        let outcome = client
            .send_notification(Some(&token), NOTIFICATION_TITLE, NOTIFICATION_BODY)
            .await?;

        // Simulate the peer noticing the notification and replying
        let state = Arc::clone(&self.state);
        let delay = self.reply_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.write().await.chat.push_theirs(SIMULATED_REPLY);
        });

        Ok(outcome)
    }
}
