//! Thin PocketBase client over `reqwest`.
//!
//! Covers exactly the surface the node needs: superuser password
//! authentication and the record CRUD endpoints of a single collection.
//! Pagination semantics, filter syntax and auth protocol are the remote
//! service's contract; nothing is validated locally.

mod auth;
mod models;
mod records;

use std::time::Duration;

use reqwest::{Method, header::AUTHORIZATION};
use serde_json::Value;

use crate::{ClientConfig, PocketBaseError, Result};

pub use auth::AuthStore;
pub use models::{ListResult, RecordListOptions};
pub use records::RecordService;

/// A PocketBase client handle bound to one base URL.
///
/// Owned by a single node invocation; authenticate once with
/// [`PocketBase::auth_with_password`], then issue record calls through
/// [`PocketBase::collection`].
pub struct PocketBase {
    base_url: String,
    http: reqwest::Client,
    auth_store: AuthStore,
    config: ClientConfig,
}

impl PocketBase {
    pub fn new(
        base_url: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            auth_store: AuthStore::default(),
            config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_store(&self) -> &AuthStore {
        &self.auth_store
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the record service for the collection with the given name or ID.
    pub fn collection(
        &self,
        id_or_name: &str,
    ) -> RecordService<'_> {
        RecordService::new(self, id_or_name)
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// Non-2xx responses become [`PocketBaseError::Remote`] carrying the
    /// response payload; bodyless responses (204) decode to `Value::Null`.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method, &url).query(query);
        if let Some(token) = self.auth_store.token() {
            request = request.header(AUTHORIZATION, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        // error payloads are not always JSON, keep whatever decodes
        let payload = serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(PocketBaseError::Remote {
                status: status.as_u16(),
                payload,
            });
        }

        Ok(payload)
    }
}
