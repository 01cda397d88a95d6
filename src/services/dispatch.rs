//! Shared FIFO of executions waiting for an executor.
//!
//! Browsers push with [`Dispatcher::submit`], which never waits; each executor connection pulls
//! one task at a time with [`Dispatcher::next_task`]. The receiver sits
//! behind a mutex so idle executors queue up on it in arrival order.

use std::sync::Arc;

use events::{Execution, Request, ServerEvent};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, mpsc};

use super::relay::RelayError;

/// One execution plus the route back to the browser that asked for it.
#[derive(Debug)]
pub struct Task {
    pub execution: Execution,
    pub messages: Vec<Request>,
    pub user_tx: mpsc::Sender<ServerEvent>,
}

#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<Task>,
    rx: Arc<Mutex<mpsc::Receiver<Task>>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self { tx, rx: Arc::new(Mutex::new(rx)) }
    }

    /// Enqueue a task without waiting. Callers run inside a socket loop
    /// that must keep draining its own channel, so a full queue is an error
    /// rather than back-pressure.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::QueueFull`] or [`RelayError::QueueClosed`]; the
    /// task is dropped.
    pub fn submit(&self, task: Task) -> Result<(), RelayError> {
        self.tx.try_send(task).map_err(|e| match e {
            TrySendError::Full(_) => RelayError::QueueFull,
            TrySendError::Closed(_) => RelayError::QueueClosed,
        })
    }

    /// Wait for the next task. Cancel-safe: dropping the future loses nothing.
    pub async fn next_task(&self) -> Option<Task> {
        self.rx.lock().await.recv().await
    }

    /// Tasks currently waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
