use std::sync::Arc;

use crate::services::engine::HealthEngine;

// App state
pub struct AppState {
    pub engine: Arc<HealthEngine>,
}

impl AppState {
    pub fn new(engine: Arc<HealthEngine>) -> Self {
        Self { engine }
    }
}
