//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! only shared mutable pieces are the task queue and a count of connected
//! executors; each socket task owns everything else.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ServerConfig;
use crate::services::dispatch::Dispatcher;

/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub executors: Arc<AtomicUsize>,
    pub client_channel_capacity: usize,
}

impl AppState {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(config.task_queue_capacity),
            executors: Arc::new(AtomicUsize::new(0)),
            client_channel_capacity: config.client_channel_capacity,
        }
    }

    /// Record a new executor connection and return the number online.
    pub fn executor_joined(&self) -> usize {
        self.executors.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record an executor leaving and return the number still online.
    pub fn executor_left(&self) -> usize {
        self.executors.fetch_sub(1, Ordering::SeqCst).saturating_sub(1)
    }

    #[must_use]
    pub fn executors_online(&self) -> usize {
        self.executors.load(Ordering::SeqCst)
    }
}
