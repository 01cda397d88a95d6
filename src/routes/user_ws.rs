//! Browser socket.
//!
//! DESIGN
//! ======
//! One `select!` loop per browser:
//! - inbound `execute` → create an execution, reply `execution_created`,
//!   enqueue the task for an executor (or, when the queue is full, close
//!   the execution at once with an error marker and `finalize`)
//! - events from whichever executor runs this browser's tasks arrive on the
//!   per-connection channel and are forwarded in order
//!
//! When the browser goes away the channel receiver is dropped, so executor
//! output for its tasks is discarded at the send site.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use events::{ClientEvent, ServerEvent, WireEvent};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::dispatch::Task;
use crate::services::relay;
use crate::state::AppState;

pub async fn handle_user_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_user_ws(socket, state))
}

async fn run_user_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    let (user_tx, mut user_rx) = mpsc::channel::<ServerEvent>(state.client_channel_capacity);

    info!(%client_id, "user ws: connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        let replies = process_inbound_text(&state, client_id, &user_tx, &text);
                        if send_events(&mut socket, client_id, &replies).await.is_err() {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(event) = user_rx.recv() => {
                if send_event(&mut socket, client_id, &event).await.is_err() {
                    break;
                }
            }
        }
    }

    info!(%client_id, "user ws: disconnected");
}

/// Handle one inbound text frame and return events for the sender.
///
/// Never waits: the caller's loop must keep draining `user_rx`, since the
/// executor serving this browser blocks on it.
fn process_inbound_text(
    state: &AppState,
    client_id: Uuid,
    user_tx: &mpsc::Sender<ServerEvent>,
    text: &str,
) -> Vec<ServerEvent> {
    let event = match ClientEvent::decode(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(%client_id, error = %e, "user ws: invalid inbound frame");
            return Vec::new();
        }
    };

    match event {
        ClientEvent::Execute(request) => {
            let execution = match relay::create_execution(&request) {
                Ok(execution) => execution,
                Err(e) => {
                    info!(%client_id, error = %e, "user ws: execute ignored");
                    return Vec::new();
                }
            };
            let execution_id = execution.id.clone();
            let created = execution.clone();
            let task = Task { execution, messages: request.messages, user_tx: user_tx.clone() };

            if let Err(e) = state.dispatcher.submit(task) {
                warn!(%client_id, %execution_id, error = %e, "user ws: enqueue failed");
                let mut rejected = created.clone();
                let mut replies = vec![ServerEvent::ExecutionCreated(created)];
                replies.extend(relay::abort(&mut rejected, relay::QUEUE_FULL));
                return replies;
            }
            info!(%client_id, %execution_id, queued = state.dispatcher.pending(), "user ws: execution requested");
            vec![ServerEvent::ExecutionCreated(created)]
        }
    }
}

async fn send_events(socket: &mut WebSocket, client_id: Uuid, events: &[ServerEvent]) -> Result<(), ()> {
    for event in events {
        send_event(socket, client_id, event).await?;
    }
    Ok(())
}

async fn send_event(socket: &mut WebSocket, client_id: Uuid, event: &ServerEvent) -> Result<(), ()> {
    let text = match event.encode() {
        Ok(text) => text,
        Err(e) => {
            warn!(%client_id, event = event.name(), error = %e, "user ws: encode failed");
            return Ok(());
        }
    };
    socket.send(Message::Text(text.into())).await.map_err(|e| {
        warn!(%client_id, event = event.name(), error = %e, "user ws: send failed");
    })
}
