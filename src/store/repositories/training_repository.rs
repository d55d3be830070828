use crate::store::models::Training;
use crate::store::{collections, JsonStore, StoreError};

pub struct TrainingRepository;

impl TrainingRepository {
    pub async fn list(store: &JsonStore) -> Result<Vec<Training>, StoreError> {
        store
            .list(collections::TRAININGS)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .collect()
    }

    pub async fn find(store: &JsonStore, id: &str) -> Result<Option<Training>, StoreError> {
        store
            .find(collections::TRAININGS, id)
            .await?
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .transpose()
    }

    pub async fn create(store: &JsonStore, training: &Training) -> Result<(), StoreError> {
        store
            .create(collections::TRAININGS, serde_json::to_value(training)?)
            .await?;
        Ok(())
    }

    pub async fn replace(store: &JsonStore, training: &Training) -> Result<(), StoreError> {
        store
            .replace(collections::TRAININGS, serde_json::to_value(training)?)
            .await?;
        Ok(())
    }

    pub async fn delete(store: &JsonStore, id: &str) -> Result<(), StoreError> {
        store.delete(collections::TRAININGS, id).await
    }

    pub async fn list_for_client(
        store: &JsonStore,
        client_id: &str,
    ) -> Result<Vec<Training>, StoreError> {
        Ok(Self::list(store)
            .await?
            .into_iter()
            .filter(|t| t.client_id == client_id)
            .collect())
    }

    pub async fn list_for_trainer(
        store: &JsonStore,
        trainer_id: &str,
    ) -> Result<Vec<Training>, StoreError> {
        Ok(Self::list(store)
            .await?
            .into_iter()
            .filter(|t| t.trainer_id.as_deref() == Some(trainer_id))
            .collect())
    }
}
