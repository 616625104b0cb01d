use std::sync::Arc;

use steady_core::persona::SessionRegistry;

/// Shared handler state, constructed once at startup
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
}
