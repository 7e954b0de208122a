//! Platform seam
//!
//! The core never talks to the OS or the vendor push SDK directly. Hosts
//! implement [`PushPlatform`] over the real notification APIs and
//! [`AlertSink`] over native dialogs; tests supply in-memory doubles.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{ChannelConfig, OsFamily, PermissionStatus, PushToken};

/// Host-side notification surface: device capability, permissions, token
/// issuance, and delivery-channel provisioning.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// Whether the host is a real physical device (push is unavailable on
    /// emulators and simulators)
    fn is_physical_device(&self) -> bool;

    /// OS family of the host
    fn os_family(&self) -> OsFamily;

    /// Current notification-permission status
    async fn permission_status(&self) -> AppResult<PermissionStatus>;

    /// Prompt the user for notification permission; resolves with the final
    /// status once the user responds or the OS dismisses the prompt
    async fn request_permission(&self) -> AppResult<PermissionStatus>;

    /// Fetch the push-delivery token for this installation
    async fn fetch_push_token(&self) -> AppResult<PushToken>;

    /// Create or update a delivery channel (Android only); idempotent
    async fn ensure_channel(&self, config: &ChannelConfig) -> AppResult<()>;
}

/// Native alert dialogs shown to the user on early-exit paths
pub trait AlertSink: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory doubles shared by the module test suites

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::error::AppError;

    /// Scriptable [`PushPlatform`] that records every call
    pub(crate) struct MockPlatform {
        pub is_device: bool,
        pub os: OsFamily,
        pub initial_status: PermissionStatus,
        pub status_after_request: PermissionStatus,
        pub token: Result<&'static str, &'static str>,
        pub status_calls: AtomicUsize,
        pub request_calls: AtomicUsize,
        pub fetch_calls: AtomicUsize,
        pub channels: Mutex<Vec<ChannelConfig>>,
    }

    impl MockPlatform {
        pub(crate) fn physical_android_granted(token: &'static str) -> Self {
            Self {
                is_device: true,
                os: OsFamily::Android,
                initial_status: PermissionStatus::Granted,
                status_after_request: PermissionStatus::Granted,
                token: Ok(token),
                status_calls: AtomicUsize::new(0),
                request_calls: AtomicUsize::new(0),
                fetch_calls: AtomicUsize::new(0),
                channels: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PushPlatform for MockPlatform {
        fn is_physical_device(&self) -> bool {
            self.is_device
        }

        fn os_family(&self) -> OsFamily {
            self.os
        }

        async fn permission_status(&self) -> AppResult<PermissionStatus> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.initial_status)
        }

        async fn request_permission(&self) -> AppResult<PermissionStatus> {
            self.request_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.status_after_request)
        }

        async fn fetch_push_token(&self) -> AppResult<PushToken> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            match self.token {
                Ok(raw) => PushToken::new(raw)
                    .ok_or_else(|| AppError::TokenFetch("empty token".to_string())),
                Err(reason) => Err(AppError::TokenFetch(reason.to_string())),
            }
        }

        async fn ensure_channel(&self, config: &ChannelConfig) -> AppResult<()> {
            self.channels.lock().unwrap().push(config.clone());
            Ok(())
        }
    }

    /// [`AlertSink`] that records shown dialogs
    #[derive(Default)]
    pub(crate) struct RecordingAlerts {
        pub shown: Mutex<Vec<(String, String)>>,
    }

    impl RecordingAlerts {
        pub(crate) fn titles(&self) -> Vec<String> {
            self.shown
                .lock()
                .unwrap()
                .iter()
                .map(|(title, _)| title.clone())
                .collect()
        }
    }

    impl AlertSink for RecordingAlerts {
        fn alert(&self, title: &str, message: &str) {
            self.shown
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
        }
    }
}
