//! Shared data types for the ZDAD core
//!
//! These types cross the platform seam, the push relay wire, and the
//! in-memory chat state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed payload attached to every outgoing push (`data.extraData` on the wire)
pub const EXTRA_DATA: &str = "Algún dato extra";

/// Sound key the relay understands for the default notification sound
pub const DEFAULT_SOUND: &str = "default";

// ============================================================================
// Permission Types
// ============================================================================

/// Notification permission status as reported by the OS
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionStatus::Granted => write!(f, "granted"),
            PermissionStatus::Denied => write!(f, "denied"),
            PermissionStatus::Undetermined => write!(f, "undetermined"),
        }
    }
}

// ============================================================================
// Push Token
// ============================================================================

/// Opaque push-delivery token issued by the push service
///
/// Non-empty by construction; "no token" is `Option::<PushToken>::None`,
/// never an empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    /// Wrap a raw token string, rejecting empty values
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PushToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Push Wire Types
// ============================================================================

/// Extra data carried inside the push envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PushData {
    #[serde(rename = "extraData")]
    pub extra_data: String,
}

/// JSON envelope POSTed to the push relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    pub to: String,
    pub sound: String,
    pub title: String,
    pub body: String,
    pub data: PushData,
}

impl PushMessage {
    /// Build the envelope for one notification
    pub fn new(token: &PushToken, title: &str, body: &str) -> Self {
        Self {
            to: token.as_str().to_string(),
            sound: DEFAULT_SOUND.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            data: PushData {
                extra_data: EXTRA_DATA.to_string(),
            },
        }
    }
}

/// Outcome of one delivery attempt
///
/// Relay rejections and transport faults are soft failures: logged,
/// reported here, never raised as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Relay accepted the request; holds its parsed JSON response
    Delivered(serde_json::Value),
    /// Relay answered with a non-success status
    Rejected { status: u16, body: String },
    /// Request never completed (connectivity loss, DNS failure, ...)
    TransportFailed(String),
}

// ============================================================================
// Delivery Channel (Android)
// ============================================================================

/// Channel importance levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
    Max,
}

/// Android delivery-channel configuration
///
/// Re-creating the same channel with the same parameters is idempotent on
/// the platform side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    pub name: String,
    pub importance: Importance,
    /// Vibration intervals in milliseconds
    pub vibration_pattern: Vec<u64>,
    pub light_color: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            importance: Importance::Max,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: "#FF231F7C".to_string(),
        }
    }
}

/// OS family of the host, for platform-specific provisioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Android,
    Ios,
    Other,
}

// ============================================================================
// Notification Presentation
// ============================================================================

/// How a notification arriving in the foreground is presented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForegroundBehavior {
    pub should_show_alert: bool,
    pub should_play_sound: bool,
    pub should_set_badge: bool,
}

impl Default for ForegroundBehavior {
    fn default() -> Self {
        Self {
            should_show_alert: true,
            should_play_sound: true,
            should_set_badge: false,
        }
    }
}

/// Notification content as delivered to the app by the OS
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncomingNotification {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// A user interaction with a delivered notification (a tap)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: IncomingNotification,
}

// ============================================================================
// Chat Types
// ============================================================================

/// One chat bubble in the in-memory log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_mine: bool,
    /// Display timestamp, `HH:MM`
    pub timestamp: String,
}

impl ChatMessage {
    /// Create a message stamped with the current local time
    pub fn now(text: impl Into<String>, is_mine: bool) -> Self {
        Self::at(text, is_mine, Utc::now())
    }

    pub(crate) fn at(text: impl Into<String>, is_mine: bool, when: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            is_mine,
            timestamp: when.format("%H:%M").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_message_wire_format() {
        let token = PushToken::new("TOKEN_X").unwrap();
        let msg = PushMessage::new(&token, "Hello", "World");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "to": "TOKEN_X",
                "sound": "default",
                "title": "Hello",
                "body": "World",
                "data": { "extraData": "Algún dato extra" }
            })
        );
    }

    #[test]
    fn test_push_token_rejects_empty() {
        assert!(PushToken::new("").is_none());
        assert_eq!(PushToken::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_default_channel_config() {
        let channel = ChannelConfig::default();
        assert_eq!(channel.name, "default");
        assert_eq!(channel.importance, Importance::Max);
        assert_eq!(channel.vibration_pattern, vec![0, 250, 250, 250]);
        assert_eq!(channel.light_color, "#FF231F7C");
    }

    #[test]
    fn test_foreground_behavior_defaults() {
        let behavior = ForegroundBehavior::default();
        assert!(behavior.should_show_alert);
        assert!(behavior.should_play_sound);
        assert!(!behavior.should_set_badge);
    }
}
