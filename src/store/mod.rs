mod error;
mod json_store;
pub mod models;
pub mod repositories;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config;

pub use error::StoreError;
pub use json_store::JsonStore;

/// Collection names used by the record store.
pub mod collections {
    pub const TRAININGS: &str = "trainings";
    pub const TRAINERS: &str = "trainers";
    pub const CLIENTS: &str = "clients";
    pub const USERS: &str = "users";
    pub const AUDIT_LOGS: &str = "auditLogs";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Initialize the record store, file-backed when `STORE_PATH` is configured.
pub async fn init() -> Result<Arc<JsonStore>> {
    let config = config::get();
    let store = match &config.store.path {
        Some(path) => JsonStore::open(PathBuf::from(path)).await?,
        None => JsonStore::in_memory(),
    };
    Ok(Arc::new(store))
}
