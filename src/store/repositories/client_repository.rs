use crate::store::models::Client;
use crate::store::{collections, JsonStore, StoreError};

pub struct ClientRepository;

impl ClientRepository {
    pub async fn find(store: &JsonStore, id: &str) -> Result<Option<Client>, StoreError> {
        store
            .find(collections::CLIENTS, id)
            .await?
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .transpose()
    }
}
