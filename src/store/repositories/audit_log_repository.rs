use crate::store::models::AuditLogEntry;
use crate::store::{collections, JsonStore, StoreError};

pub struct AuditLogRepository;

impl AuditLogRepository {
    /// Appends an entry to the audit trail. Entries are never updated or
    /// deleted afterwards.
    pub async fn append(store: &JsonStore, entry: &AuditLogEntry) -> Result<(), StoreError> {
        store
            .create(collections::AUDIT_LOGS, serde_json::to_value(entry)?)
            .await?;
        Ok(())
    }

    /// All entries, newest first.
    pub async fn list(store: &JsonStore) -> Result<Vec<AuditLogEntry>, StoreError> {
        let mut entries: Vec<AuditLogEntry> = store
            .list(collections::AUDIT_LOGS)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .collect::<Result<_, _>>()?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}
