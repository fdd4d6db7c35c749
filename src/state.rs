// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::relay::ChatRelay;
use crate::services::runner::CommandRunner;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            relay: ChatRelay::from_config(config),
        }
    }

    pub fn with_runner(runner: Arc<dyn CommandRunner>, config: &RelayConfig) -> Self {
        Self {
            relay: ChatRelay::new(runner, config),
        }
    }
}
