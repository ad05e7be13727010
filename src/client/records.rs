use reqwest::Method;
use serde_json::{Value, json};

use crate::{
    DataObject, PocketBaseError, Result,
    client::{ListResult, PocketBase, RecordListOptions},
};

/// Record CRUD operations scoped to a single collection.
///
/// Borrowed from an authenticated [`PocketBase`] handle; the collection
/// identifier (name or ID) is fixed for the service's lifetime.
pub struct RecordService<'a> {
    client: &'a PocketBase,
    collection: String,
}

impl<'a> RecordService<'a> {
    pub(crate) fn new(
        client: &'a PocketBase,
        collection: &str,
    ) -> Self {
        Self {
            client,
            collection: collection.to_string(),
        }
    }

    fn base_path(&self) -> String {
        format!("/api/collections/{}/records", self.collection)
    }

    /// An empty record id would hit the list endpoint instead, reject it
    /// locally the way the wrapped SDK does.
    fn record_path(
        &self,
        record_id: &str,
    ) -> Result<String> {
        if record_id.is_empty() {
            return Err(PocketBaseError::Remote {
                status: 404,
                payload: json!({
                    "code": 404,
                    "message": "Missing required record id.",
                    "data": {},
                }),
            });
        }

        Ok(format!("{}/{}", self.base_path(), record_id))
    }

    /// Fetches a single record by its ID; not-found surfaces as a remote error.
    pub async fn get_one(
        &self,
        record_id: &str,
    ) -> Result<DataObject> {
        let path = self.record_path(record_id)?;
        let data = self.client.send(Method::GET, &path, &[], None).await?;

        into_object(data)
    }

    /// Fetches one page of records matching the given options.
    pub async fn get_list(
        &self,
        page: u32,
        per_page: u32,
        options: &RecordListOptions,
    ) -> Result<ListResult> {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("perPage".to_string(), per_page.to_string()),
        ];
        query.extend(options.to_query());

        let data = self
            .client
            .send(Method::GET, &self.base_path(), &query, None)
            .await?;
        let result = serde_json::from_value::<ListResult>(data)?;

        Ok(result)
    }

    /// Drains all matching records across pages into a flat list.
    pub async fn get_full_list(
        &self,
        options: &RecordListOptions,
    ) -> Result<Vec<DataObject>> {
        let batch = self.client.config().full_list_batch;
        let mut options = options.clone();
        options.skip_total = true;

        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let result = self.get_list(page, batch, &options).await?;
            let fetched = result.items.len();
            items.extend(result.items);
            if (fetched as u32) < batch {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// Returns the first record matching `filter`, or the first record in
    /// default collection order when the filter is empty.
    pub async fn get_first_list_item(
        &self,
        filter: &str,
        options: &RecordListOptions,
    ) -> Result<DataObject> {
        let mut options = options.clone();
        options.filter = filter.to_string();
        options.skip_total = true;

        let result = self.get_list(1, 1, &options).await?;

        result.items.into_iter().next().ok_or_else(|| PocketBaseError::Remote {
            status: 404,
            payload: json!({
                "code": 404,
                "message": "The requested resource wasn't found.",
                "data": {},
            }),
        })
    }

    /// Creates a new record and returns it.
    pub async fn create(
        &self,
        body: &DataObject,
    ) -> Result<DataObject> {
        let body = Value::Object(body.clone());
        let data = self
            .client
            .send(Method::POST, &self.base_path(), &[], Some(&body))
            .await?;

        into_object(data)
    }

    /// Partially updates an existing record and returns the updated record.
    pub async fn update(
        &self,
        record_id: &str,
        body: &DataObject,
    ) -> Result<DataObject> {
        let path = self.record_path(record_id)?;
        let body = Value::Object(body.clone());
        let data = self
            .client
            .send(Method::PATCH, &path, &[], Some(&body))
            .await?;

        into_object(data)
    }

    /// Deletes a record by its ID.
    pub async fn delete(
        &self,
        record_id: &str,
    ) -> Result<bool> {
        let path = self.record_path(record_id)?;
        self.client.send(Method::DELETE, &path, &[], None).await?;

        Ok(true)
    }
}

fn into_object(data: Value) -> Result<DataObject> {
    match data {
        Value::Object(object) => Ok(object),
        other => Err(PocketBaseError::Convert(format!("expected a record object, got: {}", other))),
    }
}
