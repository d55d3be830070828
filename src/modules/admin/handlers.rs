use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::lifecycle::LifecycleEngine;
use crate::middleware::identity::CurrentActor;
use crate::store::models::{AuditLogEntry, Role, Trainer, Training};
use crate::store::repositories::{AuditLogRepository, TrainingRepository};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTrainerRequest {
    pub trainer_id: String,
}

/// Deleting a training is gated on an explicit confirmation, mirroring the
/// blocking yes/no dialog in the administration screen.
#[derive(Debug, Deserialize)]
pub struct DeleteTrainingRequest {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn list_trainings(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<Training>>> {
    actor.require_role(Role::Admin)?;
    Ok(Json(TrainingRepository::list(&state.store).await?))
}

pub async fn get_training(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Training>> {
    actor.require_role(Role::Admin)?;
    let training = TrainingRepository::find(&state.store, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("training {id}")))?;
    Ok(Json(training))
}

pub async fn assign_trainer(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<AssignTrainerRequest>,
) -> AppResult<Json<Training>> {
    actor.require_role(Role::Admin)?;
    let training = LifecycleEngine::new(&state.store)
        .assign_trainer(&actor, &id, &payload.trainer_id)
        .await?;
    Ok(Json(training))
}

pub async fn generate_invoice(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Training>> {
    actor.require_role(Role::Admin)?;
    let training = LifecycleEngine::new(&state.store)
        .generate_client_invoice(&actor, &id)
        .await?;
    Ok(Json(training))
}

pub async fn delete_training(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<DeleteTrainingRequest>,
) -> AppResult<Json<serde_json::Value>> {
    actor.require_role(Role::Admin)?;
    LifecycleEngine::new(&state.store)
        .delete_request(&actor, &id, payload.confirm)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

pub async fn eligible_trainers(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Trainer>>> {
    actor.require_role(Role::Admin)?;
    let trainers = LifecycleEngine::new(&state.store)
        .eligible_trainers(&id)
        .await?;
    Ok(Json(trainers))
}

pub async fn audit_logs(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<AuditLogEntry>>> {
    actor.require_role(Role::Admin)?;
    Ok(Json(AuditLogRepository::list(&state.store).await?))
}
