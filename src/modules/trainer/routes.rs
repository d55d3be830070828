use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{accept_assignment, complete_training, list_assignments, upload_invoice};
use crate::app_state::AppState;

pub fn trainer_routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(list_assignments))
        .route("/assignments/:id/accept", post(accept_assignment))
        .route("/assignments/:id/complete", post(complete_training))
        .route("/assignments/:id/invoice", post(upload_invoice))
}
