//! Notification listener hooks
//!
//! The host shell forwards OS notification events into a
//! [`NotificationCenter`]; the app observes them through scoped
//! subscriptions. A [`Subscription`] deregisters its handler when dropped,
//! so teardown is guaranteed on every exit path and repeated mount/unmount
//! cycles cannot leak handlers.

use std::sync::{Arc, Mutex, Weak};

use crate::models::{ForegroundBehavior, IncomingNotification, NotificationResponse};

type ReceivedHandler = Box<dyn Fn(&IncomingNotification) + Send + Sync>;
type ResponseHandler = Box<dyn Fn(&NotificationResponse) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    received: Vec<(u64, ReceivedHandler)>,
    responses: Vec<(u64, ResponseHandler)>,
    behavior: Option<ForegroundBehavior>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum HookKind {
    Received,
    Response,
}

/// Registry for notification-received and notification-tapped listeners
#[derive(Clone, Default)]
pub struct NotificationCenter {
    inner: Arc<Mutex<Registry>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for notifications arriving while the app is
    /// foregrounded
    pub fn on_received<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&IncomingNotification) + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock().expect("hook registry poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.received.push((id, Box::new(handler)));
        Subscription {
            registry: Arc::downgrade(&self.inner),
            id,
            kind: HookKind::Received,
        }
    }

    /// Register a listener for the user tapping a delivered notification
    pub fn on_response<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&NotificationResponse) + Send + Sync + 'static,
    {
        let mut registry = self.inner.lock().expect("hook registry poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.responses.push((id, Box::new(handler)));
        Subscription {
            registry: Arc::downgrade(&self.inner),
            id,
            kind: HookKind::Response,
        }
    }

    /// Deliver a foreground notification to all registered listeners
    ///
    /// Handlers run synchronously in registration order, under the registry
    /// lock; handlers must not subscribe or unsubscribe from inside.
    pub fn emit_received(&self, notification: &IncomingNotification) {
        let registry = self.inner.lock().expect("hook registry poisoned");
        for (_, handler) in &registry.received {
            handler(notification);
        }
    }

    /// Deliver a notification tap to all registered listeners
    pub fn emit_response(&self, response: &NotificationResponse) {
        let registry = self.inner.lock().expect("hook registry poisoned");
        for (_, handler) in &registry.responses {
            handler(response);
        }
    }

    /// Set the presentation policy for foreground notifications
    pub fn set_foreground_behavior(&self, behavior: ForegroundBehavior) {
        self.inner.lock().expect("hook registry poisoned").behavior = Some(behavior);
    }

    /// Presentation policy queried by the host shell when a notification
    /// arrives in the foreground
    pub fn foreground_behavior(&self) -> ForegroundBehavior {
        self.inner
            .lock()
            .expect("hook registry poisoned")
            .behavior
            .unwrap_or_default()
    }

    /// Number of live listeners of both kinds
    pub fn listener_count(&self) -> usize {
        let registry = self.inner.lock().expect("hook registry poisoned");
        registry.received.len() + registry.responses.len()
    }
}

/// Scoped listener registration; dropping it deregisters the handler
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
    kind: HookKind,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = match registry.lock() {
                Ok(registry) => registry,
                Err(_) => return,
            };
            match self.kind {
                HookKind::Received => registry.received.retain(|(id, _)| *id != self.id),
                HookKind::Response => registry.responses.retain(|(id, _)| *id != self.id),
            }
            tracing::debug!("Notification listener {} removed", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn notification(title: &str) -> IncomingNotification {
        IncomingNotification {
            title: title.to_string(),
            body: "cuerpo".to_string(),
            data: serde_json::json!({ "extraData": "Algún dato extra" }),
        }
    }

    #[test]
    fn test_received_listener_observes_notification() {
        let center = NotificationCenter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_by_handler = Arc::clone(&seen);
        let _sub = center.on_received(move |n| {
            seen_by_handler.lock().unwrap().push(n.title.clone());
        });

        center.emit_received(&notification("hola"));
        assert_eq!(*seen.lock().unwrap(), vec!["hola"]);
    }

    #[test]
    fn test_response_listener_sees_attached_data() {
        let center = NotificationCenter::new();
        let seen = Arc::new(Mutex::new(None));

        let seen_by_handler = Arc::clone(&seen);
        let _sub = center.on_response(move |r| {
            *seen_by_handler.lock().unwrap() = Some(r.notification.data.clone());
        });

        center.emit_response(&NotificationResponse {
            notification: notification("hola"),
        });
        assert_eq!(
            seen.lock().unwrap().take().unwrap(),
            serde_json::json!({ "extraData": "Algún dato extra" })
        );
    }

    #[test]
    fn test_drop_deregisters_listener() {
        let center = NotificationCenter::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_by_handler = Arc::clone(&calls);
        let sub = center.on_received(move |_| {
            calls_by_handler.fetch_add(1, Ordering::SeqCst);
        });

        center.emit_received(&notification("uno"));
        drop(sub);
        center.emit_received(&notification("dos"));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(center.listener_count(), 0);
    }

    #[test]
    fn test_repeated_mount_unmount_cycles_do_not_leak() {
        let center = NotificationCenter::new();
        for _ in 0..10 {
            let received = center.on_received(|_| {});
            let response = center.on_response(|_| {});
            assert_eq!(center.listener_count(), 2);
            drop(received);
            drop(response);
        }
        assert_eq!(center.listener_count(), 0);
    }

    #[test]
    fn test_foreground_behavior_defaults_and_overrides() {
        let center = NotificationCenter::new();
        assert_eq!(center.foreground_behavior(), ForegroundBehavior::default());

        center.set_foreground_behavior(ForegroundBehavior {
            should_show_alert: false,
            should_play_sound: false,
            should_set_badge: true,
        });
        assert!(!center.foreground_behavior().should_show_alert);
        assert!(center.foreground_behavior().should_set_badge);
    }
}
