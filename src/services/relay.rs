//! Execution lifecycle and executor → browser translation.
//!
//! DESIGN
//! ======
//! Pure functions over an `Execution`: each takes the execution by mutable
//! reference, advances it, and returns the browser events to emit in order.
//! The socket handlers own all I/O, so every status transition is testable
//! without a socket.
//!
//! LIFECYCLE
//! =========
//! `requested` (created on `execute`) → `scheduled` (picked up by an
//! executor) → `started` (first content from the executor) → `completed`
//! (`finalize`, or the executor went away).

use events::asset::{self, AssetKind};
use events::{ExecuteRequest, Execution, ExecutionStatus, ExecutorEvent, ServerEvent, TokenEvent};
use uuid::Uuid;

/// Payload of the error marker sent when an executor disappears mid-task.
pub const EXECUTOR_LOST: &str = "executor disconnected";

/// Payload of the error marker sent when no execution can be queued.
pub const QUEUE_FULL: &str = "too many requests queued, try again shortly";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("execute request carries no messages")]
    EmptyTranscript,
    #[error("task queue is full")]
    QueueFull,
    #[error("task queue is closed")]
    QueueClosed,
}

/// Browser events produced by one executor event.
#[derive(Debug, Default, PartialEq)]
pub struct Step {
    pub events: Vec<ServerEvent>,
    /// The executor finished this task and is idle again.
    pub finished: bool,
}

/// Create the execution for a browser `execute` request.
///
/// # Errors
///
/// Returns [`RelayError::EmptyTranscript`] when there is nothing to answer.
pub fn create_execution(request: &ExecuteRequest) -> Result<Execution, RelayError> {
    let last = request.last().ok_or(RelayError::EmptyTranscript)?;
    Ok(Execution::new(Uuid::new_v4().to_string(), last.clone()))
}

/// Mark the execution as picked up by an executor.
pub fn schedule(execution: &mut Execution) -> ServerEvent {
    execution.status = ExecutionStatus::Scheduled;
    ServerEvent::ExecutionUpdated(execution.clone())
}

/// Translate one executor event into browser events.
pub fn apply_executor_event(execution: &mut Execution, event: ExecutorEvent) -> Step {
    let mut step = Step::default();
    match event {
        ExecutorEvent::SendText(text) => push_text(execution, &mut step, text),
        ExecutorEvent::SendImage(url) => push_text(execution, &mut step, asset::marker(AssetKind::Image, &url)),
        ExecutorEvent::SendHtml(url) => push_text(execution, &mut step, asset::marker(AssetKind::Html, &url)),
        ExecutorEvent::SendError(message) => {
            push_text(execution, &mut step, asset::marker(AssetKind::Error, &message));
        }
        ExecutorEvent::SendDebugThoughts(thought) => {
            start(execution, &mut step);
            step.events.push(ServerEvent::DebugThoughtReceived(TokenEvent::new(execution.id.clone(), thought)));
        }
        ExecutorEvent::UpdateStatusMessage(message) => {
            // The newest update wins: a named status replaces any free-form text.
            match ExecutionStatus::parse(&message) {
                Some(status) => {
                    execution.status = status;
                    execution.status_message = None;
                }
                None => execution.status_message = Some(message),
            }
            step.events.push(ServerEvent::ExecutionUpdated(execution.clone()));
        }
        ExecutorEvent::UpdateStatusProgress(progress) => {
            execution.progress = progress;
            step.events.push(ServerEvent::ExecutionUpdated(execution.clone()));
        }
        ExecutorEvent::Finalize => {
            step.events = complete(execution);
            step.finished = true;
        }
    }
    step
}

/// Close out an execution that will never be answered, so the browser is
/// not left waiting. `reason` becomes the payload of the error marker.
pub fn abort(execution: &mut Execution, reason: &str) -> Vec<ServerEvent> {
    let marker = asset::marker(AssetKind::Error, reason);
    let mut events = vec![ServerEvent::TextReceived(TokenEvent::new(execution.id.clone(), marker))];
    events.extend(complete(execution));
    events
}

fn push_text(execution: &mut Execution, step: &mut Step, text: String) {
    start(execution, step);
    step.events.push(ServerEvent::TextReceived(TokenEvent::new(execution.id.clone(), text)));
}

/// First content on a scheduled execution moves it to `started`.
fn start(execution: &mut Execution, step: &mut Step) {
    if matches!(execution.status, ExecutionStatus::Requested | ExecutionStatus::Scheduled) {
        execution.status = ExecutionStatus::Started;
        step.events.push(ServerEvent::ExecutionUpdated(execution.clone()));
    }
}

fn complete(execution: &mut Execution) -> Vec<ServerEvent> {
    execution.status = ExecutionStatus::Completed;
    execution.progress = None;
    vec![ServerEvent::ExecutionUpdated(execution.clone()), ServerEvent::Finalize(Some(execution.clone()))]
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
