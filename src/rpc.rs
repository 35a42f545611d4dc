use crate::dispatch::TransactionSubmitter;
use crate::error::{LifecycleError, LifecycleResult};
use crate::types::RpcEnvelope;
use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

#[derive(Clone, Debug)]
pub struct RpcClient {
    pub url: Url,
    pub http: Client,
}

impl RpcClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { url, http })
    }

    /// Append `path` to the node url, keeping any base path it carries.
    pub fn endpoint(&self, path: &str) -> LifecycleResult<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                LifecycleError::Transport(format!("node url {} cannot carry a path", self.url))
            })?
            .pop_if_empty()
            .extend(path.trim_start_matches('/').split('/'));
        Ok(url)
    }
}

impl TransactionSubmitter for RpcClient {
    async fn submit(&self, envelope: RpcEnvelope) -> LifecycleResult<String> {
        let endpoint = self.endpoint(envelope.path)?;
        let response = self
            .http
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(envelope.payload)
            .send()
            .await
            .map_err(|err| LifecycleError::Transport(format!("rpc request failed: {err}")))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| LifecycleError::Transport(format!("rpc decode failed: {err}")))?;
        tracing::info!(%endpoint, %status, "rpc response received");
        if !status.is_success() {
            return Err(LifecycleError::Transport(format!(
                "rpc error status {status}: {body}"
            )));
        }
        Ok(body)
    }
}
