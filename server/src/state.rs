use std::sync::Arc;

use crate::config::Config;
use crate::db::sessions::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionStore::new(config.session_ttl);
        AppState {
            config: Arc::new(config),
            sessions,
        }
    }
}
