use serde_json::Value;

use crate::{
    DataObject, PocketBaseError, Result,
    node::{Dispatch, ExecutionHost, ExecutionItem, NodeConfig, RecordAction},
};

/// Runs the selected action once per input item, strictly in order.
///
/// Each item is attempted exactly once. A failure either aborts the run
/// with the failing item's index, or, when the host's continue-on-fail
/// flag is set, is collected as an error-augmented entry in the results.
/// The input batch is never mutated; the output length always matches it.
pub(crate) async fn run_items<D, H>(
    target: &D,
    config: &NodeConfig,
    host: &H,
) -> Result<Vec<DataObject>>
where
    D: Dispatch,
    H: ExecutionHost + ?Sized,
{
    let items = host.input_items();
    let mut return_data = Vec::with_capacity(items.len());

    for (item_index, item) in items.iter().enumerate() {
        match run_item(target, config, host, item_index).await {
            Ok(data) => return_data.push(data),
            Err(err) => {
                if host.continue_on_fail() {
                    tracing::debug!("item {} failed, continuing: {}", item_index, err);
                    return_data.push(error_entry(item, &err, item_index));
                } else {
                    return Err(abort_error(err, item_index));
                }
            }
        }
    }

    Ok(return_data)
}

async fn run_item<D, H>(
    target: &D,
    config: &NodeConfig,
    host: &H,
    item_index: usize,
) -> Result<DataObject>
where
    D: Dispatch,
    H: ExecutionHost + ?Sized,
{
    let params = host.item_params(item_index)?;
    let action = RecordAction::create(config.action, params)?;

    target.dispatch(&config.collection, &action).await
}

/// Preserves the item's original payload alongside the error and its
/// paired input index, for downstream inspection.
fn error_entry(
    item: &ExecutionItem,
    err: &PocketBaseError,
    item_index: usize,
) -> DataObject {
    let mut entry = DataObject::new();
    entry.insert("json".to_string(), Value::Object(item.json.clone()));
    entry.insert("error".to_string(), Value::String(err.to_string()));
    entry.insert("pairedItem".to_string(), Value::from(item_index));

    entry
}

/// Embeds the remote response payload and the failing item's index.
fn abort_error(
    err: PocketBaseError,
    item_index: usize,
) -> PocketBaseError {
    let payload = match err {
        PocketBaseError::Remote { payload, .. } => payload,
        other => Value::String(other.to_string()),
    };

    PocketBaseError::Item { item_index, payload }
}

#[cfg(test)]
mod test {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::{
        ActionKind, Credentials, StaticExecution,
        node::{BodyParameter, prepare_request_body},
    };

    /// Echoes the created body back; fails when the body's "n" field is "boom".
    struct FakeBackend;

    #[async_trait]
    impl Dispatch for FakeBackend {
        async fn dispatch(
            &self,
            collection: &str,
            action: &RecordAction,
        ) -> Result<DataObject> {
            let RecordAction::Create { body } = action else {
                panic!("fake backend only handles create");
            };
            if body.get("n") == Some(&json!("boom")) {
                return Err(PocketBaseError::Remote {
                    status: 400,
                    payload: json!({ "code": 400, "message": "Failed to create record." }),
                });
            }

            let mut record = body.clone();
            record.insert("collectionName".to_string(), json!(collection));
            Ok(record)
        }
    }

    fn create_params(value: &str) -> serde_json::Value {
        json!({
            "bodyParameters": {
                "parameters": [{ "name": "n", "value": value }],
            },
        })
    }

    fn test_host(continue_on_fail: bool) -> StaticExecution {
        let credentials = Credentials {
            url: "http://localhost:8090".to_string(),
            email: "admin@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        let config = NodeConfig::new("posts", ActionKind::Create).unwrap();
        let items = vec![
            ExecutionItem::new(prepare_request_body(&[BodyParameter {
                name: "source".to_string(),
                value: "one".to_string(),
            }])),
            ExecutionItem::new(prepare_request_body(&[BodyParameter {
                name: "source".to_string(),
                value: "two".to_string(),
            }])),
            ExecutionItem::default(),
        ];

        StaticExecution::new(credentials, config, items)
            .with_params(vec![create_params("1"), create_params("boom"), create_params("3")])
            .with_continue_on_fail(continue_on_fail)
    }

    #[tokio::test]
    async fn test_first_failure_aborts_without_partial_results() {
        let host = test_host(false);
        let config = host.node_config().unwrap();

        let result = run_items(&FakeBackend, &config, &host).await;
        let Err(PocketBaseError::Item { item_index, payload }) = result else {
            panic!("expected an item abort error");
        };
        assert_eq!(item_index, 1);
        assert_eq!(payload["message"], "Failed to create record.");
    }

    #[tokio::test]
    async fn test_continue_on_fail_collects_error_entry() {
        let host = test_host(true);
        let config = host.node_config().unwrap();

        let output = run_items(&FakeBackend, &config, &host).await.unwrap();
        assert_eq!(output.len(), 3);

        assert_eq!(output[0].get("n"), Some(&json!("1")));
        assert_eq!(output[2].get("n"), Some(&json!("3")));

        let failed = &output[1];
        assert_eq!(failed["json"], json!({ "source": "two" }));
        assert_eq!(failed["pairedItem"], json!(1));
        assert!(failed["error"].as_str().unwrap().contains("Failed to create record."));
    }

    #[tokio::test]
    async fn test_invalid_params_follow_the_error_policy() {
        // getOne without a recordId fails validation per item, not fatally
        let credentials = Credentials {
            url: "http://localhost:8090".to_string(),
            email: "admin@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        let config = NodeConfig::new("posts", ActionKind::GetOne).unwrap();
        let host = StaticExecution::new(credentials, config.clone(), vec![ExecutionItem::default()])
            .with_continue_on_fail(true);

        let output = run_items(&FakeBackend, &config, &host).await.unwrap();
        assert_eq!(output.len(), 1);
        assert!(output[0].contains_key("error"));
    }
}
