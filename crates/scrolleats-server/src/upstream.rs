//! Keyed HTTP client for the upstream places API.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, Url};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure or non-2xx status. The URL is stripped because it
    /// carries the API key.
    #[error("{0}")]
    Http(reqwest::Error),

    #[error("invalid upstream URL '{0}'")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.without_url())
    }
}

/// Raw upstream response body plus its content type.
#[derive(Debug)]
pub struct UpstreamBytes {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Forwards requests to the upstream API, appending the API key.
///
/// Responses are passed through untouched; the upstream `status` envelope is
/// not interpreted here.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

impl UpstreamClient {
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`UpstreamError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("scrolleats-proxy/0.1")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| UpstreamError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    #[must_use]
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// GETs `path` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, or non-JSON body.
    pub async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, UpstreamError> {
        let url = self.build_url(path, params)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// GETs `path` and returns the raw body, following redirects.
    ///
    /// # Errors
    ///
    /// Any transport failure or non-2xx status.
    pub async fn get_bytes(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<UpstreamBytes, UpstreamError> {
        let url = self.build_url(path, params)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let body = response.bytes().await?;
        Ok(UpstreamBytes { content_type, body })
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, UpstreamError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{path}: {e}")))?;
        if params.is_empty() && self.api_key.is_none() {
            return Ok(url);
        }
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        Ok(url)
    }
}
