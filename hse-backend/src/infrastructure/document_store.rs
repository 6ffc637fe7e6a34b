// src/infrastructure/document_store.rs

use super::store_adapter::{RestorePlatform, StoreAdapter, StoreError};
use crate::config::FirestoreConfig;
use serde_json::{json, Map, Value};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Fixed table -> collection map for the document-store restore target.
pub fn collection_for_table(table: &str) -> Option<&'static str> {
    match table {
        "profiles" => Some("users"),
        "objectives" => Some("objectives"),
        "objective_updates" => Some("updates"),
        "daily_work" => Some("dailyWork"),
        "action_items" => Some("actionItems"),
        "action_item_closures" => Some("actionItemClosures"),
        "action_item_verifications" => Some("actionItemVerifications"),
        "system_settings" => Some("systemSettings"),
        "component_permissions" => Some("permissions"),
        _ => None,
    }
}

/// Firestore REST adapter. Documents are keyed by the row's original
/// `id`; writes and deletes go through `:batchWrite`, which caps at 500
/// operations per call.
pub struct FirestoreAdapter {
    client: reqwest::Client,
    config: FirestoreConfig,
}

impl FirestoreAdapter {
    pub fn new(config: FirestoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn documents_path(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.config.project_id
        )
    }

    fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_path(), collection, id)
    }

    fn collection(&self, table: &str) -> Result<&'static str, StoreError> {
        collection_for_table(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }

    async fn list_page(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> Result<(Vec<Value>, Option<String>), StoreError> {
        let mut url = format!(
            "{}/{}/{}?pageSize=500",
            FIRESTORE_BASE_URL,
            self.documents_path(),
            collection
        );
        if let Some(token) = page_token {
            url.push_str("&pageToken=");
            url.push_str(token);
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| StoreError::DocumentStore(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::DocumentStore(format!(
                "list failed for collection '{}': HTTP {}",
                collection,
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::DocumentStore(e.to_string()))?;

        let documents = body
            .get("documents")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let next_page_token = body
            .get("nextPageToken")
            .and_then(Value::as_str)
            .map(String::from);

        Ok((documents, next_page_token))
    }

    async fn batch_write(&self, writes: Vec<Value>) -> Result<(), StoreError> {
        let url = format!(
            "{}/projects/{}/databases/(default)/documents:batchWrite",
            FIRESTORE_BASE_URL, self.config.project_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&json!({ "writes": writes }))
            .send()
            .await
            .map_err(|e| StoreError::DocumentStore(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::DocumentStore(format!(
                "batchWrite failed: HTTP {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::DocumentStore(e.to_string()))?;

        // Per-write status entries; code 0 (or absent) means OK
        if let Some(statuses) = body.get("status").and_then(Value::as_array) {
            for status in statuses {
                let code = status.get("code").and_then(Value::as_i64).unwrap_or(0);
                if code != 0 {
                    let message = status
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error");
                    return Err(StoreError::DocumentStore(format!(
                        "batchWrite entry failed with code {}: {}",
                        code, message
                    )));
                }
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl StoreAdapter for FirestoreAdapter {
    fn platform(&self) -> RestorePlatform {
        RestorePlatform::Firebase
    }

    fn target_name(&self, table: &str) -> Option<String> {
        collection_for_table(table).map(String::from)
    }

    async fn fetch_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        let collection = self.collection(table)?;

        let mut rows = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let (documents, next) = self.list_page(collection, page_token.as_deref()).await?;
            for document in &documents {
                rows.push(document_to_row(document));
            }
            match next {
                Some(token) if !documents.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(rows)
    }

    async fn delete_all(&self, table: &str) -> Result<(), StoreError> {
        let collection = self.collection(table)?;

        // Deletion is paginated: list a page, delete it, repeat until the
        // collection is empty.
        loop {
            let (documents, _) = self.list_page(collection, None).await?;
            if documents.is_empty() {
                return Ok(());
            }

            let deletes: Vec<Value> = documents
                .iter()
                .filter_map(|d| d.get("name").and_then(Value::as_str))
                .map(|name| json!({ "delete": name }))
                .collect();

            for chunk in deletes.chunks(super::store_adapter::BATCH_SIZE) {
                self.batch_write(chunk.to_vec()).await?;
            }
        }
    }

    async fn insert_many(
        &self,
        table: &str,
        rows: &[Value],
        batch_size: usize,
    ) -> Result<u64, StoreError> {
        let collection = self.collection(table)?;

        let mut written = 0u64;
        for chunk in rows.chunks(batch_size.max(1)) {
            let mut writes = Vec::with_capacity(chunk.len());
            for row in chunk {
                let id = row_identifier(row).ok_or_else(|| {
                    StoreError::MalformedRow(format!(
                        "row in table '{}' has no usable 'id' field",
                        table
                    ))
                })?;

                writes.push(json!({
                    "update": {
                        "name": self.document_name(collection, &id),
                        "fields": json_to_fields(row),
                    }
                }));
            }

            self.batch_write(writes).await?;
            written += chunk.len() as u64;
        }

        Ok(written)
    }
}

/// Original identifier of a backed-up row, used as the document key.
fn row_identifier(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Maps a JSON row object onto Firestore's typed `fields` map.
fn json_to_fields(row: &Value) -> Value {
    let mut fields = Map::new();
    if let Some(object) = row.as_object() {
        for (key, value) in object {
            fields.insert(key.clone(), json_to_firestore_value(value));
        }
    }
    Value::Object(fields)
}

fn json_to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Firestore carries integers as strings
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(json_to_firestore_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let mut fields = Map::new();
            for (key, value) in map {
                fields.insert(key.clone(), json_to_firestore_value(value));
            }
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Inverse mapping for reads: a listed document back into a plain row.
fn document_to_row(document: &Value) -> Value {
    let mut row = Map::new();

    if let Some(fields) = document.get("fields").and_then(Value::as_object) {
        for (key, value) in fields {
            row.insert(key.clone(), firestore_value_to_json(value));
        }
    }

    // Restore the document key as `id` when the fields do not carry one
    if !row.contains_key("id") {
        if let Some(id) = document
            .get("name")
            .and_then(Value::as_str)
            .and_then(|name| name.rsplit('/').next())
        {
            row.insert("id".to_string(), Value::String(id.to_string()));
        }
    }

    Value::Object(row)
}

fn firestore_value_to_json(value: &Value) -> Value {
    let Some(object) = value.as_object() else {
        return Value::Null;
    };

    if let Some((kind, inner)) = object.iter().next() {
        match kind.as_str() {
            "nullValue" => Value::Null,
            "booleanValue" => inner.clone(),
            "integerValue" => inner
                .as_str()
                .and_then(|s| s.parse::<i64>().ok())
                .map(|i| json!(i))
                .unwrap_or_else(|| inner.clone()),
            "doubleValue" => inner.clone(),
            "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
            "arrayValue" => {
                let items = inner
                    .get("values")
                    .and_then(Value::as_array)
                    .map(|values| values.iter().map(firestore_value_to_json).collect())
                    .unwrap_or_default();
                Value::Array(items)
            }
            "mapValue" => {
                let mut row = Map::new();
                if let Some(fields) = inner.get("fields").and_then(Value::as_object) {
                    for (key, value) in fields {
                        row.insert(key.clone(), firestore_value_to_json(value));
                    }
                }
                Value::Object(row)
            }
            _ => Value::Null,
        }
    } else {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_map() {
        assert_eq!(collection_for_table("profiles"), Some("users"));
        assert_eq!(collection_for_table("objective_updates"), Some("updates"));
        assert_eq!(collection_for_table("daily_work"), Some("dailyWork"));
        assert_eq!(
            collection_for_table("component_permissions"),
            Some("permissions")
        );
        assert_eq!(collection_for_table("unknown_table"), None);
    }

    #[test]
    fn test_json_to_firestore_value_scalars() {
        assert_eq!(
            json_to_firestore_value(&json!(null)),
            json!({ "nullValue": null })
        );
        assert_eq!(
            json_to_firestore_value(&json!(true)),
            json!({ "booleanValue": true })
        );
        assert_eq!(
            json_to_firestore_value(&json!(42)),
            json!({ "integerValue": "42" })
        );
        assert_eq!(
            json_to_firestore_value(&json!(2.5)),
            json!({ "doubleValue": 2.5 })
        );
        assert_eq!(
            json_to_firestore_value(&json!("safety")),
            json!({ "stringValue": "safety" })
        );
    }

    #[test]
    fn test_json_to_firestore_value_nested() {
        let value = json_to_firestore_value(&json!({ "urls": ["a", "b"] }));
        assert_eq!(
            value,
            json!({
                "mapValue": {
                    "fields": {
                        "urls": {
                            "arrayValue": {
                                "values": [
                                    { "stringValue": "a" },
                                    { "stringValue": "b" }
                                ]
                            }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_value_mapping_round_trip() {
        let row = json!({
            "id": "b2f7a9e4-0000-4000-8000-000000000001",
            "achieved_count": 5,
            "efficiency": 100,
            "photos": ["https://example.com/p.jpg"],
            "comments": null,
            "nested": { "flag": true }
        });

        let fields = json_to_fields(&row);
        let document = json!({
            "name": "projects/p/databases/(default)/documents/updates/b2f7a9e4-0000-4000-8000-000000000001",
            "fields": fields
        });

        assert_eq!(document_to_row(&document), row);
    }

    #[test]
    fn test_document_to_row_recovers_id_from_name() {
        let document = json!({
            "name": "projects/p/databases/(default)/documents/users/abc123",
            "fields": { "email": { "stringValue": "worker@example.com" } }
        });

        let row = document_to_row(&document);
        assert_eq!(row["id"], json!("abc123"));
        assert_eq!(row["email"], json!("worker@example.com"));
    }

    #[test]
    fn test_row_identifier() {
        assert_eq!(
            row_identifier(&json!({ "id": "abc" })),
            Some("abc".to_string())
        );
        assert_eq!(row_identifier(&json!({ "id": 7 })), Some("7".to_string()));
        assert_eq!(row_identifier(&json!({ "id": "" })), None);
        assert_eq!(row_identifier(&json!({ "name": "x" })), None);
    }
}
