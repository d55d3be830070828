use crate::store::models::User;
use crate::store::{collections, JsonStore, StoreError};

pub struct UserRepository;

impl UserRepository {
    pub async fn find(store: &JsonStore, id: &str) -> Result<Option<User>, StoreError> {
        store
            .find(collections::USERS, id)
            .await?
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .transpose()
    }
}
