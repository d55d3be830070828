use std::sync::Arc;

use crate::config;
use crate::store::JsonStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub env: config::Config,
}

impl AppState {
    pub fn new(store: Arc<JsonStore>, env: config::Config) -> Self {
        Self { store, env }
    }
}
