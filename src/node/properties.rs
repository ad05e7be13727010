//! Declarative node parameter surface for the host UI.
//!
//! Mirrors the property schema the host renders: which fields exist, their
//! defaults, and which selected action makes them visible. The host performs
//! required-field validation from this document; the node re-validates the
//! resulting per-item parameter objects in [`crate::RecordAction::create`].

use serde_json::{Value, json};

use crate::node::credentials::CREDENTIAL_NAME;

pub(crate) fn node_description() -> Value {
    json!({
        "displayName": "PocketBase Admin",
        "name": "pocketBaseAdmin",
        "group": ["transform"],
        "version": 1,
        "subtitle": "={{$parameter[\"action\"] + \" \" + $parameter[\"collection\"]}}",
        "description": "Consume PocketBase API",
        "defaults": {
            "name": "PocketBase",
        },
        "inputs": ["main"],
        "outputs": ["main"],
        "credentials": [
            {
                "name": CREDENTIAL_NAME,
                "required": true,
            },
        ],
        "properties": [
            {
                "displayName": "Collection",
                "name": "collection",
                "type": "string",
                "default": "",
                "required": true,
                "description": "ID or name of the records' collection",
            },
            {
                "displayName": "Actions",
                "name": "action",
                "type": "options",
                "options": [
                    {
                        "name": "Create",
                        "value": "create",
                        "action": "Create a new record",
                    },
                    {
                        "name": "Delete",
                        "value": "delete",
                        "action": "Deletes a single record by its ID",
                    },
                    {
                        "name": "Get First List Item",
                        "value": "getFirstListItem",
                        "action": "Returns the first record that matches the specified filter",
                    },
                    {
                        "name": "Get Full List",
                        "value": "getFullList",
                        "action": "Returns full list of records matching the specified filter",
                    },
                    {
                        "name": "Get List",
                        "value": "getList",
                        "action": "Returns a paginated records list matching the specified filter",
                    },
                    {
                        "name": "Get One",
                        "value": "getOne",
                        "action": "Returns a single record by its ID",
                    },
                    {
                        "name": "Update",
                        "value": "update",
                        "action": "Update an existing record by its ID",
                    },
                ],
                "default": "create",
                "required": true,
                "noDataExpression": true,
            },
            {
                "displayName": "Record ID",
                "name": "recordId",
                "type": "string",
                "default": "",
                "displayOptions": {
                    "show": {
                        "action": ["getOne", "update", "delete"],
                    },
                },
            },
            {
                "displayName": "Pagination",
                "name": "pagination",
                "type": "collection",
                "default": {},
                "displayOptions": {
                    "show": {
                        "action": ["getList"],
                    },
                },
                "options": [
                    {
                        "displayName": "Page",
                        "name": "page",
                        "type": "number",
                        "typeOptions": {
                            "minValue": 1,
                        },
                        "default": 1,
                    },
                    {
                        "displayName": "Elements Per Page",
                        "name": "elementsPerPage",
                        "type": "number",
                        "typeOptions": {
                            "minValue": 1,
                        },
                        "default": 30,
                    },
                    {
                        "displayName": "Skip Total",
                        "name": "skipTotal",
                        "type": "boolean",
                        "default": false,
                    },
                ],
            },
            {
                "displayName": "Parameters",
                "name": "parameters",
                "type": "collection",
                "default": {},
                "displayOptions": {
                    "show": {
                        "action": ["getList", "getFirstListItem", "getFullList"],
                    },
                },
                "options": [
                    {
                        "displayName": "Sort",
                        "name": "sort",
                        "type": "string",
                        "default": "",
                    },
                    {
                        "displayName": "Filter",
                        "name": "filter",
                        "type": "string",
                        "default": "",
                    },
                    {
                        "displayName": "Expand",
                        "name": "expand",
                        "type": "string",
                        "default": "",
                    },
                    {
                        "displayName": "Fields",
                        "name": "fields",
                        "type": "string",
                        "default": "",
                    },
                ],
            },
            {
                "displayName": "Body Parameters",
                "name": "bodyParameters",
                "type": "fixedCollection",
                "displayOptions": {
                    "show": {
                        "action": ["create", "update"],
                    },
                },
                "typeOptions": {
                    "multipleValues": true,
                },
                "placeholder": "Add Parameter",
                "default": {
                    "parameters": [
                        {
                            "name": "",
                            "value": "",
                        },
                    ],
                },
                "options": [
                    {
                        "name": "parameters",
                        "displayName": "Parameter",
                        "values": [
                            {
                                "displayName": "Name",
                                "name": "name",
                                "type": "string",
                                "default": "",
                                "description": "ID of the field to set",
                            },
                            {
                                "displayName": "Value",
                                "name": "value",
                                "type": "string",
                                "default": "",
                                "description": "Value of the field to set",
                            },
                        ],
                    },
                ],
            },
        ],
    })
}

#[cfg(test)]
mod test {
    use super::node_description;

    #[test]
    fn test_description_lists_all_actions() {
        let description = node_description();
        let options = description["properties"][1]["options"].as_array().unwrap();
        let values: Vec<&str> = options.iter().map(|o| o["value"].as_str().unwrap()).collect();
        assert_eq!(
            values,
            vec![
                "create",
                "delete",
                "getFirstListItem",
                "getFullList",
                "getList",
                "getOne",
                "update"
            ]
        );
    }

    #[test]
    fn test_record_id_shown_for_id_actions() {
        let description = node_description();
        let record_id = &description["properties"][2];
        assert_eq!(record_id["name"], "recordId");
        assert_eq!(
            record_id["displayOptions"]["show"]["action"],
            serde_json::json!(["getOne", "update", "delete"])
        );
    }
}
