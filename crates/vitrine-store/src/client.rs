//! HTTP client for the storefront's PostgREST-style REST surface.
//!
//! Wraps `reqwest` with the store's credential headers, error-body decoding
//! and retry policy. Tables live under `rest/v1/{table}` and remote
//! procedures under `rest/v1/rpc/{function}`.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use vitrine_core::{AppConfig, ProductUpsert};

use crate::error::StoreError;
use crate::retry::retry_with_backoff;

const PRODUCTS_TABLE: &str = "products";
const UPSERT_CONFLICT_TARGET: &str = "tenant_id,code";

/// Client for the hosted store.
///
/// Use [`StoreClient::from_config`] in binaries or [`StoreClient::new`] to
/// point at a mock server in tests. Retries are off unless enabled with
/// [`StoreClient::with_retry`].
pub struct StoreClient {
    client: Client,
    base_url: Url,
    api_key: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl StoreClient {
    /// Creates a client for `base_url` authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| StoreError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            api_key: api_key.to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Creates a client from the resolved application config, including its
    /// retry policy.
    ///
    /// # Errors
    ///
    /// See [`StoreClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        Ok(Self::new(
            &config.store_url,
            &config.store_key,
            config.store_request_timeout_secs,
            &config.store_user_agent,
        )?
        .with_retry(config.store_max_retries, config.store_retry_backoff_base_ms))
    }

    /// Enables up to `max_retries` extra attempts on transient failures.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Upserts one batch into `products`, keyed on `(tenant_id, code)`.
    ///
    /// Returns the number of rows the store reports as inserted or updated.
    /// When the store answers without a body, the batch length is assumed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Api`] if the store rejects the batch.
    /// - [`StoreError::Http`] on network failure after all retries.
    /// - [`StoreError::Deserialize`] if the returned rows are not a JSON array.
    pub async fn upsert_products(&self, batch: &[ProductUpsert]) -> Result<usize, StoreError> {
        let mut url = self.endpoint(&format!("rest/v1/{PRODUCTS_TABLE}"))?;
        url.query_pairs_mut()
            .append_pair("on_conflict", UPSERT_CONFLICT_TARGET)
            .append_pair("select", "id");

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .post(url)
                    .header("apikey", &self.api_key)
                    .bearer_auth(&self.api_key)
                    .header("Prefer", "resolution=merge-duplicates,return=representation")
                    .json(batch)
                    .send()
                    .await?;
                let body = Self::read_success_body(response).await?;

                if body.trim().is_empty() {
                    return Ok(batch.len());
                }
                let rows: Vec<serde_json::Value> =
                    serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
                        context: format!("upsert {PRODUCTS_TABLE}"),
                        source: e,
                    })?;
                Ok(rows.len())
            }
        })
        .await
    }

    /// Calls a remote procedure with a JSON argument object.
    ///
    /// A JSON `null` result is returned as `None`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Api`] if the store rejects the call.
    /// - [`StoreError::Http`] on network failure after all retries.
    /// - [`StoreError::Deserialize`] if the result does not match `T`.
    pub async fn call_rpc<T: DeserializeOwned>(
        &self,
        function: &str,
        args: &serde_json::Value,
    ) -> Result<Option<T>, StoreError> {
        let url = self.endpoint(&format!("rest/v1/rpc/{function}"))?;

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .post(url)
                    .header("apikey", &self.api_key)
                    .bearer_auth(&self.api_key)
                    .json(args)
                    .send()
                    .await?;
                let body = Self::read_success_body(response).await?;

                if body.trim().is_empty() {
                    return Ok(None);
                }
                serde_json::from_str::<Option<T>>(&body).map_err(|e| StoreError::Deserialize {
                    context: format!("rpc {function}"),
                    source: e,
                })
            }
        })
        .await
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns the body of a 2xx response, or [`StoreError::Api`] carrying the
    /// store's `message` (falling back to the raw body) for anything else.
    async fn read_success_body(response: Response) -> Result<String, StoreError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        Err(StoreError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Extracts the store's `message` field from an error body, if it has one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_owned()
            } else {
                trimmed.to_owned()
            }
        })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
