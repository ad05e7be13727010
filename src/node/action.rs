use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{DataObject, Result, client::RecordListOptions};

/// The record operation selected for a node invocation.
///
/// Wire names match the host's action parameter values.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ActionKind {
    Create,
    Delete,
    GetFirstListItem,
    GetFullList,
    GetList,
    GetOne,
    Update,
}

/// A single name/value body field as supplied by the host's expression engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BodyParameter {
    pub name: String,
    pub value: String,
}

/// Folds an ordered body parameter list into a request body mapping.
///
/// Later entries with duplicate names overwrite earlier ones; values stay
/// strings as supplied.
pub fn prepare_request_body(parameters: &[BodyParameter]) -> DataObject {
    parameters.iter().fold(DataObject::new(), |mut acc, entry| {
        acc.insert(entry.name.clone(), Value::String(entry.value.clone()));
        acc
    })
}

/// Pagination settings for the `getList` action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    #[serde(rename = "elementsPerPage")]
    pub elements_per_page: u32,
    #[serde(rename = "skipTotal")]
    pub skip_total: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            elements_per_page: 30,
            skip_total: false,
        }
    }
}

/// Raw per-item parameter bundle read from the host.
#[derive(Deserialize, Debug, Clone, Default)]
struct ItemParams {
    #[serde(default, rename = "recordId")]
    record_id: String,
    #[serde(default)]
    pagination: Pagination,
    #[serde(default)]
    parameters: RecordListOptions,
    #[serde(default, rename = "bodyParameters")]
    body_parameters: BodyParameters,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct BodyParameters {
    #[serde(default)]
    parameters: Vec<BodyParameter>,
}

/// A fully validated record operation, one variant per [`ActionKind`].
///
/// Built per item from the host's raw parameter object; carries everything
/// the dispatcher needs, so dispatching stays free of dynamic lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordAction {
    Create {
        body: DataObject,
    },
    Delete {
        record_id: String,
    },
    GetFirstListItem {
        filter: String,
        options: RecordListOptions,
    },
    GetFullList {
        options: RecordListOptions,
    },
    GetList {
        page: u32,
        per_page: u32,
        options: RecordListOptions,
    },
    GetOne {
        record_id: String,
    },
    Update {
        record_id: String,
        body: DataObject,
    },
}

impl RecordAction {
    /// Creates a validated action from the raw per-item parameter object.
    pub fn create(
        kind: ActionKind,
        params: Value,
    ) -> Result<Self> {
        jsonschema::validate(&Self::schema(kind), &params)?;
        let params = serde_json::from_value::<ItemParams>(params)?;

        let action = match kind {
            ActionKind::Create => Self::Create {
                body: prepare_request_body(&params.body_parameters.parameters),
            },
            ActionKind::Delete => Self::Delete {
                record_id: params.record_id,
            },
            ActionKind::GetFirstListItem => {
                let mut options = params.parameters;
                let filter = std::mem::take(&mut options.filter);
                Self::GetFirstListItem { filter, options }
            }
            ActionKind::GetFullList => Self::GetFullList {
                options: params.parameters,
            },
            ActionKind::GetList => {
                let mut options = params.parameters;
                // only merged when explicitly true, the remote distinguishes
                // "unset" from "false"
                if params.pagination.skip_total {
                    options.skip_total = true;
                }
                Self::GetList {
                    page: params.pagination.page,
                    per_page: params.pagination.elements_per_page,
                    options,
                }
            }
            ActionKind::GetOne => Self::GetOne {
                record_id: params.record_id,
            },
            ActionKind::Update => Self::Update {
                record_id: params.record_id,
                body: prepare_request_body(&params.body_parameters.parameters),
            },
        };

        Ok(action)
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Create { .. } => ActionKind::Create,
            Self::Delete { .. } => ActionKind::Delete,
            Self::GetFirstListItem { .. } => ActionKind::GetFirstListItem,
            Self::GetFullList { .. } => ActionKind::GetFullList,
            Self::GetList { .. } => ActionKind::GetList,
            Self::GetOne { .. } => ActionKind::GetOne,
            Self::Update { .. } => ActionKind::Update,
        }
    }

    /// Returns the parameter schema the raw per-item object must satisfy
    /// for the given action kind.
    pub fn schema(kind: ActionKind) -> Value {
        let record_id = json!({ "type": "string", "minLength": 1 });
        let list_parameters = json!({
            "type": "object",
            "properties": {
                "sort": { "type": "string" },
                "filter": { "type": "string" },
                "expand": { "type": "string" },
                "fields": { "type": "string" },
            },
        });
        let body_parameters = json!({
            "type": "object",
            "properties": {
                "parameters": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["name", "value"],
                        "properties": {
                            "name": { "type": "string" },
                            "value": { "type": "string" },
                        },
                    },
                },
            },
        });

        match kind {
            ActionKind::Create => json!({
                "type": "object",
                "properties": {
                    "bodyParameters": body_parameters,
                },
            }),
            ActionKind::Delete | ActionKind::GetOne => json!({
                "type": "object",
                "required": ["recordId"],
                "properties": {
                    "recordId": record_id,
                },
            }),
            ActionKind::Update => json!({
                "type": "object",
                "required": ["recordId"],
                "properties": {
                    "recordId": record_id,
                    "bodyParameters": body_parameters,
                },
            }),
            ActionKind::GetFirstListItem | ActionKind::GetFullList => json!({
                "type": "object",
                "properties": {
                    "parameters": list_parameters,
                },
            }),
            ActionKind::GetList => json!({
                "type": "object",
                "properties": {
                    "pagination": {
                        "type": "object",
                        "properties": {
                            "page": { "type": "integer", "minimum": 1 },
                            "elementsPerPage": { "type": "integer", "minimum": 1 },
                            "skipTotal": { "type": "boolean" },
                        },
                    },
                    "parameters": list_parameters,
                },
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_prepare_request_body_last_write_wins() {
        let parameters = vec![
            BodyParameter {
                name: "a".to_string(),
                value: "1".to_string(),
            },
            BodyParameter {
                name: "b".to_string(),
                value: "x".to_string(),
            },
            BodyParameter {
                name: "a".to_string(),
                value: "2".to_string(),
            },
        ];

        let body = prepare_request_body(&parameters);
        assert_eq!(body.len(), 2);
        assert_eq!(body.get("a"), Some(&json!("2")));
        assert_eq!(body.get("b"), Some(&json!("x")));
    }

    #[test]
    fn test_get_list_defaults() {
        let action = RecordAction::create(ActionKind::GetList, json!({})).unwrap();
        assert_eq!(
            action,
            RecordAction::GetList {
                page: 1,
                per_page: 30,
                options: RecordListOptions::default(),
            }
        );
    }

    #[test]
    fn test_get_list_merges_skip_total_only_when_true() {
        let params = json!({
            "pagination": { "page": 2, "elementsPerPage": 5, "skipTotal": false },
        });
        let action = RecordAction::create(ActionKind::GetList, params).unwrap();
        let RecordAction::GetList { page, per_page, options } = action else {
            panic!("expected a getList action");
        };
        assert_eq!((page, per_page), (2, 5));
        assert!(!options.skip_total);

        let params = json!({
            "pagination": { "skipTotal": true },
        });
        let action = RecordAction::create(ActionKind::GetList, params).unwrap();
        let RecordAction::GetList { options, .. } = action else {
            panic!("expected a getList action");
        };
        assert!(options.skip_total);
    }

    #[test]
    fn test_get_list_rejects_zero_page() {
        let params = json!({
            "pagination": { "page": 0 },
        });
        let result = RecordAction::create(ActionKind::GetList, params);
        assert!(matches!(result, Err(crate::PocketBaseError::Params(_))));
    }

    #[test]
    fn test_get_one_requires_record_id() {
        let result = RecordAction::create(ActionKind::GetOne, json!({}));
        assert!(matches!(result, Err(crate::PocketBaseError::Params(_))));

        let result = RecordAction::create(ActionKind::GetOne, json!({ "recordId": "" }));
        assert!(matches!(result, Err(crate::PocketBaseError::Params(_))));

        let action = RecordAction::create(ActionKind::GetOne, json!({ "recordId": "abc123" })).unwrap();
        assert_eq!(
            action,
            RecordAction::GetOne {
                record_id: "abc123".to_string(),
            }
        );
    }

    #[test]
    fn test_update_requires_record_id() {
        let params = json!({
            "bodyParameters": {
                "parameters": [{ "name": "title", "value": "final" }],
            },
        });
        let result = RecordAction::create(ActionKind::Update, params);
        assert!(matches!(result, Err(crate::PocketBaseError::Params(_))));
    }

    #[test]
    fn test_get_first_list_item_extracts_filter() {
        let params = json!({
            "parameters": { "filter": "status = true", "sort": "-created" },
        });
        let action = RecordAction::create(ActionKind::GetFirstListItem, params).unwrap();
        let RecordAction::GetFirstListItem { filter, options } = action else {
            panic!("expected a getFirstListItem action");
        };
        assert_eq!(filter, "status = true");
        assert!(options.filter.is_empty());
        assert_eq!(options.sort, "-created");
    }

    #[test]
    fn test_action_kind_wire_names() {
        assert_eq!(ActionKind::GetFirstListItem.as_ref(), "getFirstListItem");
        assert_eq!(
            serde_json::from_value::<ActionKind>(json!("getFullList")).unwrap(),
            ActionKind::GetFullList
        );
    }
}
