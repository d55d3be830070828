use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::lifecycle::LifecycleEngine;
use crate::middleware::identity::CurrentActor;
use crate::store::models::{NewTrainingRequest, Role, Training};
use crate::store::repositories::TrainingRepository;

/// Raise a new training request on behalf of the acting client.
pub async fn raise_request(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<NewTrainingRequest>,
) -> AppResult<impl IntoResponse> {
    actor.require_role(Role::Client)?;

    let training = LifecycleEngine::new(&state.store)
        .create_request(&actor, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(training)))
}

/// The acting client's own requests.
pub async fn list_requests(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<Training>>> {
    actor.require_role(Role::Client)?;

    let trainings = TrainingRepository::list_for_client(&state.store, actor.client_scope()).await?;
    Ok(Json(trainings))
}
