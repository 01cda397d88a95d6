//! Relay services: the task queue and the executor-event translation.

pub mod dispatch;
pub mod relay;
