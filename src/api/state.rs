use std::sync::Arc;

use outlay_config::Config;
use outlay_core::{AuthService, Clock, StorageBackend, SystemClock};

use crate::api::session::SessionStore;

/// Shared handles cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageBackend>,
    pub sessions: Arc<SessionStore>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(storage: Arc<dyn StorageBackend>, config: Config) -> Self {
        Self {
            storage,
            sessions: Arc::new(SessionStore::new()),
            clock: Arc::new(SystemClock),
            config: Arc::new(config),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn auth(&self) -> AuthService<dyn StorageBackend> {
        AuthService::new(Arc::clone(&self.storage))
    }
}
