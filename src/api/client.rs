//! HTTP client for the push relay
//!
//! The dispatcher is a single request/response shot: serialize the push
//! envelope, POST it once, log the outcome. No retries, no backoff, no
//! shared mutable state between invocations.

use reqwest::Client;

use crate::error::{AppError, AppResult};
use crate::models::{PushMessage, PushOutcome, PushToken};

/// Relay endpoint for sending a push notification
const SEND_PATH: &str = "/--/api/v2/push/send";

/// Client for the push relay
#[derive(Debug, Clone)]
pub struct PushClient {
    client: Client,
    base_url: String,
}

impl PushClient {
    /// Create a new push client against the given relay base URL
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Build URL for endpoint
    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send one push notification to the device holding `token`
    ///
    /// An absent token is a caller error and performs no network call.
    /// Relay rejections and transport faults are soft failures: they are
    /// logged and reported in the returned [`PushOutcome`], never as `Err`.
    pub async fn send_notification(
        &self,
        token: Option<&PushToken>,
        title: &str,
        body: &str,
    ) -> AppResult<PushOutcome> {
        let Some(token) = token else {
            tracing::warn!("Send requested without a push token; skipping");
            return Err(AppError::MissingToken);
        };

        let message = PushMessage::new(token, title, body);
        tracing::info!("Sending push notification to {}: {}", token, title);

        let result = self
            .client
            .post(self.url(SEND_PATH))
            .header("Accept", "application/json")
            .header("Accept-Encoding", "gzip, deflate")
            .header("Content-Type", "application/json")
            .json(&message)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to reach push relay: {}", e);
                return Ok(PushOutcome::TransportFailed(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Push relay rejected the notification ({}): {}", status, text);
            return Ok(PushOutcome::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        match response.json::<serde_json::Value>().await {
            Ok(json) => {
                tracing::info!("Push relay accepted the notification: {}", json);
                Ok(PushOutcome::Delivered(json))
            }
            Err(e) => {
                tracing::error!("Push relay response was not valid JSON: {}", e);
                Ok(PushOutcome::TransportFailed(e.to_string()))
            }
        }
    }
}
