use crate::store::models::Trainer;
use crate::store::{collections, JsonStore, StoreError};

pub struct TrainerRepository;

impl TrainerRepository {
    pub async fn list(store: &JsonStore) -> Result<Vec<Trainer>, StoreError> {
        store
            .list(collections::TRAINERS)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .collect()
    }

    pub async fn find(store: &JsonStore, id: &str) -> Result<Option<Trainer>, StoreError> {
        store
            .find(collections::TRAINERS, id)
            .await?
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .transpose()
    }
}
