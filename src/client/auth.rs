use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::{Value, json};

use crate::{DataObject, PocketBaseError, Result, client::PocketBase};

const SUPERUSER_AUTH_PATH: &str = "/api/collections/_superusers/auth-with-password";

/// Holds the auth token and record of the authenticated superuser.
///
/// Lifetime is one node invocation; the store is never persisted.
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    token: Option<String>,
    record: Option<DataObject>,
}

impl AuthStore {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn record(&self) -> Option<&DataObject> {
        self.record.as_ref()
    }

    pub(crate) fn save(
        &mut self,
        token: String,
        record: Option<DataObject>,
    ) {
        self.token = Some(token);
        self.record = record;
    }

    /// Whether the stored token exists and its `exp` claim is in the future.
    ///
    /// Malformed tokens are treated as invalid.
    pub fn is_valid(&self) -> bool {
        match self.token.as_deref().and_then(token_expiry) {
            Some(expiry) => expiry > Utc::now(),
            None => false,
        }
    }
}

/// Decodes the `exp` claim from a JWT payload segment.
fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims = serde_json::from_slice::<Value>(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;

    DateTime::from_timestamp(exp, 0)
}

impl PocketBase {
    /// Authenticates as a superuser and saves the token into the auth store.
    pub async fn auth_with_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<()> {
        let body = json!({
            "identity": email,
            "password": password,
        });

        let data = self
            .send(Method::POST, SUPERUSER_AUTH_PATH, &[], Some(&body))
            .await
            .map_err(|err| match err {
                PocketBaseError::Remote { status, payload } => {
                    PocketBaseError::Auth(format!("authentication failed (status {}): {}", status, payload))
                }
                other => other,
            })?;

        let token = data
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| PocketBaseError::Auth("auth response did not contain a token".to_string()))?;
        let record = data.get("record").and_then(Value::as_object).cloned();

        self.auth_store.save(token.to_string(), record);
        tracing::debug!("authenticated as superuser against {}", self.base_url);

        Ok(())
    }
}
