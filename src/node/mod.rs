//! The connector node: declarative surfaces, per-item execution, dispatch.

mod action;
mod credentials;
mod dispatcher;
mod executor;
mod host;
mod properties;

use serde_json::Value;

use crate::{ClientConfig, DataObject, PocketBase, PocketBaseError, Result};

pub use action::{ActionKind, BodyParameter, Pagination, RecordAction, prepare_request_body};
pub use credentials::{CREDENTIAL_NAME, Credentials, credential_descriptor};
pub use dispatcher::Dispatch;
pub use host::{ExecutionHost, ExecutionItem, NodeConfig, StaticExecution};

/// The PocketBase admin connector node.
///
/// Wires credential retrieval, one-time superuser authentication and the
/// per-item executor into the shape the host runtime expects.
#[derive(Debug, Clone, Default)]
pub struct PocketBaseNode {
    config: ClientConfig,
}

impl PocketBaseNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// The declarative parameter surface the host UI renders.
    pub fn description() -> Value {
        properties::node_description()
    }

    /// Executes the node against the host-supplied input batch.
    ///
    /// Authenticates exactly once before the item loop; an invalid auth
    /// state is a fatal precondition error and no item is processed.
    pub async fn execute<H>(
        &self,
        host: &H,
    ) -> Result<Vec<DataObject>>
    where
        H: ExecutionHost + ?Sized,
    {
        let credentials = host.credentials()?;
        let node_config = host.node_config()?;

        let mut client = PocketBase::new(&credentials.url, self.config.clone())?;
        client
            .auth_with_password(&credentials.email, &credentials.password)
            .await?;
        if !client.auth_store().is_valid() {
            return Err(PocketBaseError::Auth("Authentication failed!".to_string()));
        }

        executor::run_items(&client, &node_config, host).await
    }
}
