use serde::{Deserialize, Serialize};

use crate::DataObject;

/// Query options passed through verbatim to the record list endpoints.
///
/// Empty strings are never sent, and `skip_total` is only sent when
/// explicitly true since the remote distinguishes "unset" from "false".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordListOptions {
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub expand: String,
    #[serde(default)]
    pub fields: String,
    #[serde(default, rename = "skipTotal")]
    pub skip_total: bool,
}

impl RecordListOptions {
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        for (key, value) in [
            ("sort", &self.sort),
            ("filter", &self.filter),
            ("expand", &self.expand),
            ("fields", &self.fields),
        ] {
            if !value.is_empty() {
                query.push((key.to_string(), value.clone()));
            }
        }
        if self.skip_total {
            query.push(("skipTotal".to_string(), "1".to_string()));
        }

        query
    }
}

/// Paginated list envelope returned by the records list endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListResult {
    pub page: u32,
    pub per_page: u32,
    /// -1 when the query skipped the total count
    #[serde(default = "unknown_total")]
    pub total_items: i64,
    #[serde(default = "unknown_total")]
    pub total_pages: i64,
    pub items: Vec<DataObject>,
}

fn unknown_total() -> i64 {
    -1
}

#[cfg(test)]
mod test {
    use super::RecordListOptions;

    #[test]
    fn test_empty_options_send_nothing() {
        assert!(RecordListOptions::default().to_query().is_empty());
    }

    #[test]
    fn test_false_skip_total_is_omitted() {
        let options = RecordListOptions {
            sort: "-created".to_string(),
            ..Default::default()
        };
        let query = options.to_query();
        assert_eq!(query, vec![("sort".to_string(), "-created".to_string())]);
    }

    #[test]
    fn test_true_skip_total_is_sent() {
        let options = RecordListOptions {
            filter: "status = true".to_string(),
            skip_total: true,
            ..Default::default()
        };
        let query = options.to_query();
        assert_eq!(
            query,
            vec![
                ("filter".to_string(), "status = true".to_string()),
                ("skipTotal".to_string(), "1".to_string()),
            ]
        );
    }
}
