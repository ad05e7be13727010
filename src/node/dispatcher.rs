use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    DataObject, PocketBaseError, Result,
    client::PocketBase,
    node::RecordAction,
};

/// Target of a dispatched record action.
///
/// Implemented for [`PocketBase`]; the executor only depends on this trait,
/// so fakes can stand in for the remote backend in tests.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Runs one validated action against the given collection and returns
    /// the reshaped response object.
    async fn dispatch(
        &self,
        collection: &str,
        action: &RecordAction,
    ) -> Result<DataObject>;
}

#[async_trait]
impl Dispatch for PocketBase {
    async fn dispatch(
        &self,
        collection: &str,
        action: &RecordAction,
    ) -> Result<DataObject> {
        tracing::trace!("dispatching {} on collection '{}'", action.kind().as_ref(), collection);
        let records = self.collection(collection);

        match action {
            RecordAction::Create { body } => records.create(body).await,
            RecordAction::Delete { record_id } => {
                let success = records.delete(record_id).await?;
                into_object(json!({ "success": success }))
            }
            RecordAction::GetFirstListItem { filter, options } => {
                records.get_first_list_item(filter, options).await
            }
            RecordAction::GetFullList { options } => {
                let items = records.get_full_list(options).await?;
                into_object(json!({ "items": items }))
            }
            RecordAction::GetList { page, per_page, options } => {
                let result = records.get_list(*page, *per_page, options).await?;
                into_object(serde_json::to_value(result)?)
            }
            RecordAction::GetOne { record_id } => records.get_one(record_id).await,
            RecordAction::Update { record_id, body } => records.update(record_id, body).await,
        }
    }
}

fn into_object(value: Value) -> Result<DataObject> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(PocketBaseError::Convert(format!("expected an object, got: {}", other))),
    }
}
