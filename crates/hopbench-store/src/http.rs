//! HTTP endpoint store.
//!
//! POSTs each result record as JSON to a collector endpoint.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::instrument;

use hopbench_core::model::ResultRecord;
use hopbench_core::traits::ResultStore;

use crate::error::StoreError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sends result records to a remote collector.
pub struct HttpStore {
    endpoint: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(endpoint: &str, token: Option<String>) -> anyhow::Result<Self> {
        Self::with_timeout(endpoint, token, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(
        endpoint: &str,
        token: Option<String>,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            timeout_secs,
            client,
        })
    }
}

#[async_trait]
impl ResultStore for HttpStore {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, record), fields(session = %record.session_id))]
    async fn append(&self, record: &ResultRecord) -> anyhow::Result<()> {
        let mut request = self.client.post(&self.endpoint).json(record);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                StoreError::Unreachable(format!("no collector at {}", self.endpoint))
            } else {
                StoreError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        tracing::debug!("collector accepted result (HTTP {})", status.as_u16());
        Ok(())
    }
}
