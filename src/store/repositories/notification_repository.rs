use crate::store::models::Notification;
use crate::store::{collections, JsonStore, StoreError};

pub struct NotificationRepository;

impl NotificationRepository {
    pub async fn create(store: &JsonStore, notification: &Notification) -> Result<(), StoreError> {
        store
            .create(collections::NOTIFICATIONS, serde_json::to_value(notification)?)
            .await?;
        Ok(())
    }

    pub async fn find(store: &JsonStore, id: &str) -> Result<Option<Notification>, StoreError> {
        store
            .find(collections::NOTIFICATIONS, id)
            .await?
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .transpose()
    }

    /// Notifications addressed to `user_id`, newest first.
    pub async fn list_for_user(
        store: &JsonStore,
        user_id: &str,
    ) -> Result<Vec<Notification>, StoreError> {
        let mut notifications: Vec<Notification> = store
            .list(collections::NOTIFICATIONS)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(StoreError::from))
            .collect::<Result<Vec<Notification>, _>>()?
            .into_iter()
            .filter(|n| n.user_id == user_id)
            .collect();
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(notifications)
    }

    pub async fn mark_read(
        store: &JsonStore,
        notification: &Notification,
    ) -> Result<(), StoreError> {
        let mut updated = notification.clone();
        updated.read = true;
        store
            .replace(collections::NOTIFICATIONS, serde_json::to_value(&updated)?)
            .await?;
        Ok(())
    }
}
