use std::{fs, path::Path};

use serde::Deserialize;

use crate::Result;

/// Tuning knobs for the wrapped HTTP client.
///
/// Hosts that embed the node can load this from a TOML file; the defaults
/// match the wrapped PocketBase SDK.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// http request timeout in milliseconds, defaults to 30000
    pub timeout_ms: u64,
    /// page size used while draining a full list, defaults to 500
    pub full_list_batch: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            full_list_batch: 500,
        }
    }
}

impl ClientConfig {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())
            .map_err(|err| crate::PocketBaseError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), err)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<ClientConfig>(toml_str)?;
        Ok(config)
    }
}
