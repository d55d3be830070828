use axum::{
    extract::{Path, State},
    Json,
};

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::lifecycle::LifecycleEngine;
use crate::middleware::identity::CurrentActor;
use crate::store::models::{Role, Training, User};
use crate::store::repositories::TrainingRepository;

/// Trainings assigned to the acting trainer.
pub async fn list_assignments(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<Training>>> {
    actor.require_role(Role::Trainer)?;
    let trainings = TrainingRepository::list_for_trainer(&state.store, &actor.id).await?;
    Ok(Json(trainings))
}

pub async fn accept_assignment(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Training>> {
    actor.require_role(Role::Trainer)?;
    require_own_assignment(&state, &actor, &id).await?;
    let training = LifecycleEngine::new(&state.store)
        .accept_assignment(&actor, &id)
        .await?;
    Ok(Json(training))
}

pub async fn complete_training(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Training>> {
    actor.require_role(Role::Trainer)?;
    require_own_assignment(&state, &actor, &id).await?;
    let training = LifecycleEngine::new(&state.store)
        .mark_completed(&actor, &id)
        .await?;
    Ok(Json(training))
}

pub async fn upload_invoice(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Training>> {
    actor.require_role(Role::Trainer)?;
    require_own_assignment(&state, &actor, &id).await?;
    let training = LifecycleEngine::new(&state.store)
        .upload_trainer_invoice(&actor, &id)
        .await?;
    Ok(Json(training))
}

/// Trainers may only act on trainings assigned to them.
async fn require_own_assignment(state: &AppState, actor: &User, id: &str) -> AppResult<()> {
    let training = TrainingRepository::find(&state.store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("training {id}")))?;
    if training.trainer_id.as_deref() != Some(actor.id.as_str()) {
        return Err(AppError::Authorization(format!(
            "training {id} is not assigned to trainer {}",
            actor.id
        )));
    }
    Ok(())
}
