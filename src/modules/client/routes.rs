use axum::{routing::get, Router};

use super::handlers::{list_requests, raise_request};
use crate::app_state::AppState;

pub fn client_routes() -> Router<AppState> {
    Router::new().route("/requests", get(list_requests).post(raise_request))
}
