use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    assign_trainer, audit_logs, delete_training, eligible_trainers, generate_invoice,
    get_training, list_trainings,
};
use crate::app_state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/trainings", get(list_trainings))
        .route("/trainings/:id", get(get_training).delete(delete_training))
        .route("/trainings/:id/assign", post(assign_trainer))
        .route("/trainings/:id/invoice", post(generate_invoice))
        .route("/trainings/:id/eligible-trainers", get(eligible_trainers))
        .route("/audit-logs", get(audit_logs))
}
