//! ZDAD Core - Headless core for the ZDAD chat demo
//!
//! This crate provides the non-UI logic of the ZDAD chat demo: one-shot
//! push-notification registration, dispatch of self-addressed push
//! notifications through the relay, notification listener hooks with
//! scoped teardown, and the ephemeral in-memory chat log. The mobile shell
//! supplies the OS/vendor surface through the `platform` traits and renders
//! whatever lives in the shared state.

pub mod api;
pub mod chat;
pub mod error;
pub mod hooks;
pub mod models;
pub mod platform;
pub mod registrar;
pub mod state;

use std::sync::Arc;

use crate::hooks::{NotificationCenter, Subscription};
use crate::platform::{AlertSink, PushPlatform};
use crate::registrar::PushRegistrar;
use crate::state::{create_shared_state, SharedState};

/// Initialize logging
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zdad_core=info".into()),
        )
        .init();
}

/// A bootstrapped app: shared state plus the live notification listeners
///
/// The subscription guards live as long as this struct; dropping it tears
/// the listeners down.
pub struct App {
    pub state: SharedState,
    pub hooks: NotificationCenter,
    _received: Subscription,
    _response: Subscription,
}

/// Bootstrap the core once at app start
///
/// Runs push registration (storing any obtained token in the shared state)
/// and installs the two notification listeners: a log-only observer for
/// foreground arrivals, and a tap handler that surfaces the notification's
/// attached data in an alert. A registration fault is logged and leaves the
/// launch tokenless; it never aborts startup.
pub async fn bootstrap(platform: Arc<dyn PushPlatform>, alerts: Arc<dyn AlertSink>) -> App {
    tracing::info!("Starting ZDAD core");

    let state = create_shared_state();
    let hooks = NotificationCenter::new();

    let registrar = PushRegistrar::new(platform, Arc::clone(&alerts));
    match registrar.register().await {
        Ok(Some(token)) => state.write().await.set_push_token(token),
        Ok(None) => tracing::warn!("No push token obtained for this launch"),
        Err(e) => tracing::error!("Push registration failed: {}", e),
    }

    let received = hooks.on_received(|notification| {
        tracing::info!(
            "Notification received in foreground: {}",
            notification.title
        );
    });

    let alerts_on_tap = Arc::clone(&alerts);
    let response = hooks.on_response(move |response| {
        tracing::info!("User tapped notification: {}", response.notification.title);
        alerts_on_tap.alert(
            "Tocaste la notificación!",
            &response.notification.data.to_string(),
        );
    });

    App {
        state,
        hooks,
        _received: received,
        _response: response,
    }
}
