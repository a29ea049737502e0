use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::repository::EventRepository;

/// Service state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub events: EventRepository,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            events: EventRepository::new(store),
            config: Arc::new(config),
        }
    }
}
