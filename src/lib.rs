//! # PocketBase Node
//!
//! A PocketBase admin connector node for workflow-automation hosts, written in Rust.
//! It authenticates once per execution with superuser credentials, then dispatches
//! one record operation per input item against a PocketBase backend.
//!
//! ## Core Features
//!
//! - **Seven Record Operations**: create, delete, getFirstListItem, getFullList,
//!   getList, getOne and update, dispatched over a closed action enum
//! - **Async Execution**: Powered by `reqwest`, strictly sequential per item,
//!   runtime-agnostic
//! - **Declarative Surfaces**: credential and node parameter descriptors for the
//!   host UI, expressed as JSON schema documents
//! - **Host Agnostic**: the embedding platform implements [`ExecutionHost`] to
//!   supply items, credentials and per-item parameters
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pocketbase_node::{PocketBaseNode, StaticExecution};
//!
//! let host = StaticExecution::new(credentials, node_config, items);
//! let node = PocketBaseNode::new();
//! let output = node.execute(&host).await?;
//! ```

mod client;
mod config;
mod error;
mod node;

pub use client::{AuthStore, ListResult, PocketBase, RecordListOptions, RecordService};
pub use config::ClientConfig;
pub use error::PocketBaseError;
pub use node::{
    ActionKind, BodyParameter, CREDENTIAL_NAME, Credentials, Dispatch, ExecutionHost,
    ExecutionItem, NodeConfig, Pagination, PocketBaseNode, RecordAction, StaticExecution,
    credential_descriptor, prepare_request_body,
};

/// Result type alias for node operations.
pub type Result<T> = std::result::Result<T, PocketBaseError>;

/// JSON object shape exchanged with the host and the remote backend.
pub type DataObject = serde_json::Map<String, serde_json::Value>;
