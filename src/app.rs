use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::{
    app_state::AppState,
    middleware::tracing::request_tracing_middleware,
    modules::{
        admin::routes::admin_routes, client::routes::client_routes,
        notifications::routes::notification_routes, trainer::routes::trainer_routes,
    },
    store::collections,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/client", client_routes())
        .nest("/admin", admin_routes())
        .nest("/trainer", trainer_routes())
        .nest("/notifications", notification_routes())
        .layer(middleware::from_fn(request_tracing_middleware))
        .with_state(state)
}

async fn hello() -> &'static str {
    "EdTech backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let store_status = match state.store.list(collections::TRAININGS).await {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Store health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "store": store_status
        }
    }))
}
