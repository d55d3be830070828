use axum::{
    extract::{Path, State},
    Json,
};

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::identity::CurrentActor;
use crate::store::models::{Notification, Role, User};
use crate::store::repositories::NotificationRepository;

/// The acting user's notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications =
        NotificationRepository::list_for_user(&state.store, recipient_id(&actor)).await?;
    Ok(Json(notifications))
}

pub async fn mark_read(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepository::find(&state.store, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("notification {id}")))?;
    if notification.user_id != recipient_id(&actor) {
        return Err(AppError::Authorization(format!(
            "notification {id} does not belong to user {}",
            actor.id
        )));
    }

    NotificationRepository::mark_read(&state.store, &notification).await?;
    Ok(Json(Notification {
        read: true,
        ..notification
    }))
}

/// Assignment notifications are addressed to the training's clientId, so a
/// client actor reads under their company scope; everyone else under their
/// own user id.
fn recipient_id(actor: &User) -> &str {
    match actor.role {
        Role::Client => actor.client_scope(),
        _ => &actor.id,
    }
}
