//! Executor socket.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → executor counted as online, idle
//! 2. Idle: wait for the next queued task (or the socket closing)
//! 3. Busy: send `execute{id, messages}`, then translate executor events to
//!    the task's browser until `finalize`
//! 4. Socket lost while busy → the browser gets an error marker and
//!    `finalize`, so it never waits on a dead executor

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use events::{ExecuteOrder, ExecutorCommand, ExecutorEvent, ServerEvent, WireEvent};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::dispatch::Task;
use crate::services::relay;
use crate::state::AppState;

/// How a busy executor left its task.
enum TaskEnd {
    Finished,
    Disconnected,
}

pub async fn handle_executor_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_executor_ws(socket, state))
}

async fn run_executor_ws(mut socket: WebSocket, state: AppState) {
    let executor_id = Uuid::new_v4();
    let online = state.executor_joined();
    info!(%executor_id, online, "executor ws: connected");

    loop {
        let task = tokio::select! {
            task = state.dispatcher.next_task() => {
                let Some(task) = task else { break };
                task
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        warn!(%executor_id, frame = %text.as_str(), "executor ws: event while idle ignored");
                        continue;
                    }
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => continue,
                }
            }
        };

        match run_task(&mut socket, executor_id, task).await {
            TaskEnd::Finished => {}
            TaskEnd::Disconnected => break,
        }
    }

    let online = state.executor_left();
    info!(%executor_id, online, "executor ws: disconnected");
}

/// Drive one task to completion on this executor.
async fn run_task(socket: &mut WebSocket, executor_id: Uuid, mut task: Task) -> TaskEnd {
    if task.user_tx.is_closed() {
        info!(%executor_id, execution_id = %task.execution.id, "executor ws: browser gone, task skipped");
        return TaskEnd::Finished;
    }

    let scheduled = relay::schedule(&mut task.execution);
    let order = ExecutorCommand::Execute(ExecuteOrder {
        id: task.execution.id.clone(),
        messages: std::mem::take(&mut task.messages),
    });
    if send_command(socket, executor_id, &order).await.is_err() {
        forward(&task.user_tx, relay::abort(&mut task.execution, relay::EXECUTOR_LOST)).await;
        return TaskEnd::Disconnected;
    }
    forward(&task.user_tx, vec![scheduled]).await;
    info!(%executor_id, execution_id = %task.execution.id, "executor ws: task started");

    loop {
        let Some(Ok(msg)) = socket.recv().await else {
            warn!(%executor_id, execution_id = %task.execution.id, "executor ws: lost mid-task");
            forward(&task.user_tx, relay::abort(&mut task.execution, relay::EXECUTOR_LOST)).await;
            return TaskEnd::Disconnected;
        };
        match msg {
            Message::Text(text) => {
                let event = match ExecutorEvent::decode(&text) {
                    Ok(event) => event,
                    Err(e) => {
                        warn!(%executor_id, error = %e, "executor ws: invalid inbound frame");
                        continue;
                    }
                };
                let step = relay::apply_executor_event(&mut task.execution, event);
                forward(&task.user_tx, step.events).await;
                if step.finished {
                    info!(%executor_id, execution_id = %task.execution.id, "executor ws: task finished");
                    return TaskEnd::Finished;
                }
            }
            Message::Close(_) => {
                warn!(%executor_id, execution_id = %task.execution.id, "executor ws: closed mid-task");
                forward(&task.user_tx, relay::abort(&mut task.execution, relay::EXECUTOR_LOST)).await;
                return TaskEnd::Disconnected;
            }
            _ => {}
        }
    }
}

/// Push events to the task's browser. A closed channel means the browser
/// left; the rest of the output is dropped.
async fn forward(user_tx: &mpsc::Sender<ServerEvent>, events: Vec<ServerEvent>) {
    for event in events {
        if user_tx.send(event).await.is_err() {
            return;
        }
    }
}

async fn send_command(socket: &mut WebSocket, executor_id: Uuid, command: &ExecutorCommand) -> Result<(), ()> {
    let text = command.encode().map_err(|e| {
        warn!(%executor_id, error = %e, "executor ws: encode failed");
    })?;
    socket.send(Message::Text(text.into())).await.map_err(|e| {
        warn!(%executor_id, error = %e, "executor ws: send failed");
    })
}
