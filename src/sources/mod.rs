//! Remote playlist source fetching
//!
//! Sources are few and fetched sequentially; a failing source contributes
//! zero channels and never aborts the run.

use reqwest::Client;
use std::time::Duration;
use tracing::info;

use crate::errors::SourceError;

pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("m3u-sweeper/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Download one playlist source, returning its body text
    pub async fn fetch(&self, url: &str) -> Result<String, SourceError> {
        info!("Fetching playlist source: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(url, e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::from_reqwest(url, e))?;

        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
