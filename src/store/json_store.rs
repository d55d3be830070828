use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::error::StoreError;

/// Keyed-collection document store with whole-record replace semantics.
///
/// Records are JSON objects identified by a string `"id"` field, grouped into
/// named collections. When opened with a file path, the entire store is a
/// single JSON document (collection name -> array of records) that is
/// rewritten after every mutation; without a path it is memory-only.
pub struct JsonStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
    path: Option<PathBuf>,
}

impl JsonStore {
    pub fn in_memory() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            path: None,
        }
    }

    /// Opens a file-backed store, loading existing collections if the file
    /// is already present.
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let collections = if tokio::fs::try_exists(&path).await? {
            let raw = tokio::fs::read(&path).await?;
            serde_json::from_slice::<HashMap<String, Vec<Value>>>(&raw)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            collections: RwLock::new(collections),
            path: Some(path),
        })
    }

    pub async fn list(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard.get(collection).cloned().unwrap_or_default())
    }

    pub async fn find(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|records| records.iter().find(|r| has_id(r, id)).cloned()))
    }

    /// Inserts a new record. Fails if a record with the same id already exists.
    pub async fn create(&self, collection: &str, record: Value) -> Result<Value, StoreError> {
        let id = record_id(&record)?.to_string();
        let mut guard = self.collections.write().await;
        let records = guard.entry(collection.to_string()).or_default();
        if records.iter().any(|r| has_id(r, &id)) {
            return Err(StoreError::Duplicate);
        }
        records.push(record.clone());
        self.persist(&guard).await?;
        Ok(record)
    }

    /// Replaces an existing record wholesale, matching on the `"id"` field.
    pub async fn replace(&self, collection: &str, record: Value) -> Result<Value, StoreError> {
        let id = record_id(&record)?.to_string();
        let mut guard = self.collections.write().await;
        let slot = guard
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| has_id(r, &id)))
            .ok_or(StoreError::NotFound)?;
        *slot = record.clone();
        self.persist(&guard).await?;
        Ok(record)
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut guard = self.collections.write().await;
        let records = guard.get_mut(collection).ok_or(StoreError::NotFound)?;
        let before = records.len();
        records.retain(|r| !has_id(r, id));
        if records.len() == before {
            return Err(StoreError::NotFound);
        }
        self.persist(&guard).await?;
        Ok(())
    }

    async fn persist(&self, collections: &HashMap<String, Vec<Value>>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let document: Map<String, Value> = collections
            .iter()
            .map(|(name, records)| (name.clone(), Value::Array(records.clone())))
            .collect();
        let body = serde_json::to_vec_pretty(&Value::Object(document))?;
        tokio::fs::write(path, body).await?;
        Ok(())
    }
}

fn record_id(record: &Value) -> Result<&str, StoreError> {
    record
        .get("id")
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingId)
}

fn has_id(record: &Value, id: &str) -> bool {
    record_id(record).map_or(false, |rid| rid == id)
}
