//! Fetches raw source text from HTTP(S) URLs or the local filesystem.

use std::time::Duration;

use infldb_core::sources::is_remote_location;
use infldb_core::AppConfig;
use reqwest::Client;

use crate::error::IngestError;
use crate::retry::retry_with_backoff;

/// Reads CSV exports wherever a source says they live.
///
/// Remote locations go through a shared `reqwest::Client` with a timeout,
/// `User-Agent`, and retry policy. Local paths are read with `tokio::fs`
/// and never retried.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SourceClient {
    /// Creates a client. `max_retries` counts additional attempts after the
    /// first failure; `0` disables retries.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a client from the `INFLDB_FETCH_*` settings.
    ///
    /// # Errors
    ///
    /// Same as [`SourceClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, IngestError> {
        Self::new(
            config.fetch_timeout_secs,
            &config.fetch_user_agent,
            config.fetch_max_retries,
            config.fetch_backoff_base_ms,
        )
    }

    /// Returns the full text at `location`.
    ///
    /// # Errors
    ///
    /// - [`IngestError::NotFound`] for HTTP 404.
    /// - [`IngestError::RateLimited`] for HTTP 429 once retries run out.
    /// - [`IngestError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`IngestError::Http`] for network or TLS failures.
    /// - [`IngestError::Io`] when a local file cannot be read.
    pub async fn fetch_text(&self, location: &str) -> Result<String, IngestError> {
        if is_remote_location(location) {
            self.fetch_remote(location.trim()).await
        } else {
            tokio::fs::read_to_string(location)
                .await
                .map_err(|source| IngestError::Io {
                    path: location.to_owned(),
                    source,
                })
        }
    }

    async fn fetch_remote(&self, url: &str) -> Result<String, IngestError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(reqwest::header::ACCEPT, "text/csv, text/plain;q=0.9, */*;q=0.5")
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(1);
                return Err(IngestError::RateLimited {
                    url: url.to_owned(),
                    retry_after_secs,
                });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(IngestError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(IngestError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}
