//! Token Registrar
//!
//! Runs once per launch: device check, permission query/prompt, token
//! fetch, and Android channel provisioning, strictly in that order. The
//! two terminal no-token outcomes (emulator host, permission refused)
//! surface a native alert and return `Ok(None)`; a token-fetch or channel
//! fault propagates as an error for the caller to handle.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{ChannelConfig, OsFamily, PermissionStatus, PushToken};
use crate::platform::{AlertSink, PushPlatform};

/// One-shot push-notification registration flow
pub struct PushRegistrar {
    platform: Arc<dyn PushPlatform>,
    alerts: Arc<dyn AlertSink>,
}

impl PushRegistrar {
    pub fn new(platform: Arc<dyn PushPlatform>, alerts: Arc<dyn AlertSink>) -> Self {
        Self { platform, alerts }
    }

    /// Register this installation for push notifications
    ///
    /// Returns `Ok(None)` when push delivery is unavailable on this host
    /// (emulator, or permission refused); both cases also show an alert.
    pub async fn register(&self) -> AppResult<Option<PushToken>> {
        tracing::info!("Starting push notification registration");

        if !self.platform.is_physical_device() {
            tracing::warn!("Emulator detected; push notifications unavailable");
            self.alerts.alert(
                "Notificaciones",
                "No es un dispositivo físico. No se pueden obtener notificaciones push.",
            );
            return Ok(None);
        }

        let existing = self.platform.permission_status().await?;
        tracing::info!("Current notification permission: {}", existing);

        let final_status = if existing == PermissionStatus::Granted {
            existing
        } else {
            tracing::info!("Requesting notification permission");
            let status = self.platform.request_permission().await?;
            tracing::info!("Notification permission after prompt: {}", status);
            status
        };

        if final_status != PermissionStatus::Granted {
            tracing::warn!("Permission not granted ({}); exiting without token", final_status);
            self.alerts
                .alert("Notificaciones", "Permisos de notificaciones denegados");
            return Ok(None);
        }

        tracing::info!("Permission granted; fetching push token");
        let token = self.platform.fetch_push_token().await?;
        tracing::info!("Push token obtained: {}", token);

        // Android requires an explicit delivery channel; other platforms
        // have no equivalent concept
        if self.platform.os_family() == OsFamily::Android {
            tracing::info!("Provisioning default notification channel");
            self.platform.ensure_channel(&ChannelConfig::default()).await?;
            tracing::info!("Notification channel provisioned");
        }

        Ok(Some(token))
    }
}
