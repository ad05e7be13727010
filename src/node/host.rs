use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    DataObject, PocketBaseError, Result,
    node::{ActionKind, Credentials},
};

/// One unit of the host-supplied input batch.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExecutionItem {
    #[serde(default)]
    pub json: DataObject,
}

impl ExecutionItem {
    pub fn new(json: DataObject) -> Self {
        Self { json }
    }
}

/// Node-level parameters, fixed for the whole invocation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// ID or name of the records' collection
    pub collection: String,
    /// the record operation applied to every input item
    pub action: ActionKind,
}

impl NodeConfig {
    pub fn new(
        collection: &str,
        action: ActionKind,
    ) -> Result<Self> {
        if collection.is_empty() {
            return Err(PocketBaseError::Params("'collection' must not be empty".to_string()));
        }

        Ok(Self {
            collection: collection.to_string(),
            action,
        })
    }
}

/// The surface a workflow host exposes to the node.
///
/// The host adapter owns all dynamic parameter reading (expression
/// resolution, typed retrieval by name); the node only sees plain values.
pub trait ExecutionHost: Send + Sync {
    /// The input batch, fixed for the whole invocation.
    fn input_items(&self) -> &[ExecutionItem];

    /// Credentials from the host's vault, by the declared credential name.
    fn credentials(&self) -> Result<Credentials>;

    /// Collection and action, resolved once per invocation.
    fn node_config(&self) -> Result<NodeConfig>;

    /// Whether per-item failures are collected instead of aborting the run.
    fn continue_on_fail(&self) -> bool {
        false
    }

    /// The raw parameter object for one item, with host expressions already
    /// resolved against that item.
    fn item_params(
        &self,
        item_index: usize,
    ) -> Result<Value>;
}

/// An [`ExecutionHost`] over fixed values.
///
/// Suitable for embedders without an expression engine, and for tests.
#[derive(Debug, Clone)]
pub struct StaticExecution {
    credentials: Credentials,
    config: NodeConfig,
    items: Vec<ExecutionItem>,
    params: Vec<Value>,
    continue_on_fail: bool,
}

impl StaticExecution {
    pub fn new(
        credentials: Credentials,
        config: NodeConfig,
        items: Vec<ExecutionItem>,
    ) -> Self {
        Self {
            credentials,
            config,
            items,
            params: Vec::new(),
            continue_on_fail: false,
        }
    }

    /// Sets one parameter object per item, positionally; items without an
    /// entry fall back to an empty object.
    pub fn with_params(
        mut self,
        params: Vec<Value>,
    ) -> Self {
        self.params = params;
        self
    }

    pub fn with_continue_on_fail(
        mut self,
        continue_on_fail: bool,
    ) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }
}

impl ExecutionHost for StaticExecution {
    fn input_items(&self) -> &[ExecutionItem] {
        &self.items
    }

    fn credentials(&self) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }

    fn node_config(&self) -> Result<NodeConfig> {
        Ok(self.config.clone())
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    fn item_params(
        &self,
        item_index: usize,
    ) -> Result<Value> {
        Ok(self.params.get(item_index).cloned().unwrap_or_else(|| json!({})))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_node_config_rejects_empty_collection() {
        let result = NodeConfig::new("", ActionKind::Create);
        assert!(matches!(result, Err(PocketBaseError::Params(_))));
    }

    #[test]
    fn test_static_execution_defaults_missing_params() {
        let host = StaticExecution::new(
            Credentials {
                url: "http://localhost:8090".to_string(),
                email: "admin@example.com".to_string(),
                password: "hunter22".to_string(),
            },
            NodeConfig::new("posts", ActionKind::GetFullList).unwrap(),
            vec![ExecutionItem::default()],
        );
        assert_eq!(host.item_params(0).unwrap(), json!({}));
        assert!(!host.continue_on_fail());
    }
}
