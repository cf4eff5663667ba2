//! Fire-and-forget webhook notifier for reclamation transitions.
//!
//! Downstream systems (dispatch boards, customer messaging) learn about
//! reclamation movement through a JSON webhook POST per committed
//! transition. Delivery is best-effort: the POST runs on a spawned task
//! after the transaction has committed, retries with exponential backoff,
//! and failures are logged without ever affecting the HTTP response or
//! rolling anything back.

use std::sync::Arc;
use std::time::Duration;

use helios_db::models::reclamation::Reclamation;
use serde_json::json;

use crate::config::ServerConfig;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for a single webhook delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

/// Webhook notifier handle, cheap to clone into `AppState`.
///
/// Constructed once at startup. When `NOTIFY_WEBHOOK_URL` is unset the
/// notifier exists but every call is a no-op.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<Arc<String>>,
}

impl Notifier {
    pub fn from_config(config: &ServerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build webhook HTTP client");

        Self {
            client,
            webhook_url: config.notify_webhook_url.clone().map(Arc::new),
        }
    }

    /// Announce a committed reclamation transition.
    ///
    /// Returns immediately; delivery happens on a spawned task. The payload
    /// carries the event name (`reclamation.accepted`, `reclamation.rejected`,
    /// ...) and the full post-transition row.
    pub fn reclamation_changed(&self, reclamation: &Reclamation, action: &'static str) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };

        let reclamation_id = reclamation.id;
        let payload = json!({
            "event": format!("reclamation.{action}"),
            "reclamation": reclamation,
        });
        let client = self.client.clone();

        tokio::spawn(async move {
            if deliver(&client, &url, &payload).await.is_err() {
                tracing::warn!(
                    reclamation_id,
                    action,
                    "Reclamation webhook delivery failed after all retries"
                );
            }
        });
    }
}

/// Deliver a payload to the webhook URL with retry.
///
/// Retries up to 3 times with exponential backoff before giving up.
/// Returns `Ok(())` on the first successful attempt.
async fn deliver(
    client: &reqwest::Client,
    url: &str,
    payload: &serde_json::Value,
) -> Result<(), NotifyError> {
    for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
        match try_send(client, url, payload).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::warn!(
                    attempt = attempt + 1,
                    url,
                    error = %e,
                    "Webhook delivery attempt failed, retrying"
                );
                tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
            }
        }
    }

    // Final attempt after the last backoff.
    try_send(client, url, payload).await
}

/// Execute a single POST request and check the response status.
async fn try_send(
    client: &reqwest::Client,
    url: &str,
    payload: &serde_json::Value,
) -> Result<(), NotifyError> {
    let response = client.post(url).json(payload).send().await?;
    if !response.status().is_success() {
        return Err(NotifyError::HttpStatus(response.status().as_u16()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
