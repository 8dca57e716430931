//! Bounded-concurrency stream liveness checking
//!
//! Each channel URL gets one GET probe with a fixed timeout, redirects
//! followed. A counting semaphore caps the number of in-flight probes so a
//! large playlist cannot overwhelm remote hosts or the local network stack.
//! Probes never fail the batch: every URL yields an outcome, and the outcome
//! sequence is index-aligned with the input channels regardless of completion
//! order.

use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::LivenessConfig;
use crate::models::{Channel, ProbeFailure, ProbeOutcome};

pub struct LivenessChecker {
    client: Client,
    semaphore: Arc<Semaphore>,
}

impl LivenessChecker {
    pub fn new(config: &LivenessConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("m3u-sweeper/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            semaphore: Arc::new(Semaphore::new(config.concurrency)),
        }
    }

    /// Probe every channel URL, returning one outcome per channel in input
    /// order
    pub async fn check_all(&self, channels: &[Channel]) -> Vec<ProbeOutcome> {
        let probes = channels.iter().map(|channel| {
            let client = self.client.clone();
            let semaphore = Arc::clone(&self.semaphore);
            let url = channel.url.clone();
            let name = channel.name.clone();

            async move {
                // The semaphore is never closed while probes are running
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("liveness semaphore closed");

                let outcome = probe(&client, &url).await;
                if let ProbeOutcome::Dead(ref failure) = outcome {
                    warn!("Dead stream '{}' ({}): {}", name, url, failure);
                } else {
                    debug!("Stream alive: {}", url);
                }
                outcome
            }
        });

        // join_all keeps result order aligned with the input ordering
        join_all(probes).await
    }
}

/// One probe; any error becomes a Dead outcome rather than propagating
async fn probe(client: &Client, url: &str) -> ProbeOutcome {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_client_error() || status.is_server_error() {
                ProbeOutcome::Dead(ProbeFailure::Status(status.as_u16()))
            } else {
                ProbeOutcome::Alive
            }
        }
        Err(e) if e.is_timeout() => ProbeOutcome::Dead(ProbeFailure::Timeout),
        Err(e) => ProbeOutcome::Dead(ProbeFailure::Network(e.to_string())),
    }
}
