//! Socket client for the relay's browser endpoint.
//!
//! Opens one websocket at startup, forwards queued outbound events, and
//! folds every inbound event into `ChatState`. There is no reconnect: when
//! the socket closes the state shows `Disconnected`, a reply in flight is
//! closed with an error notice, and later sends fail into an error bubble.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

#[cfg(feature = "hydrate")]
use crate::state::chat::{ChatState, ConnectionStatus};
#[cfg(feature = "hydrate")]
use leptos::prelude::Update;

/// Path of the browser socket on the relay.
pub const SOCKET_PATH: &str = "/socket";

#[cfg(feature = "hydrate")]
const FALLBACK_HOST: &str = "localhost:5000";

/// Socket URL for a page loaded from `href`, served by `host`.
#[must_use]
pub fn socket_url(href: &str, host: &str) -> String {
    let scheme = if href.starts_with("https") { "wss" } else { "ws" };
    format!("{scheme}://{host}{SOCKET_PATH}")
}

/// Spawn the socket lifecycle as a local async task and return the sender
/// used to publish outbound text frames.
#[cfg(feature = "hydrate")]
pub fn spawn_socket_client(
    chat: leptos::prelude::RwSignal<ChatState>,
) -> futures::channel::mpsc::UnboundedSender<String> {
    let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
    leptos::task::spawn_local(socket_client_task(chat, rx));
    tx
}

#[cfg(feature = "hydrate")]
async fn socket_client_task(
    chat: leptos::prelude::RwSignal<ChatState>,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    let href = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default();
    let host = web_sys::window()
        .and_then(|w| w.location().host().ok())
        .unwrap_or_else(|| FALLBACK_HOST.to_owned());
    let url = socket_url(&href, &host);

    chat.update(|c| c.connection = ConnectionStatus::Connecting);
    match connect_and_run(&url, chat, rx).await {
        Ok(()) => leptos::logging::log!("socket closed"),
        Err(e) => leptos::logging::warn!("socket error: {e}"),
    }
    chat.update(|c| {
        if c.connection_lost() {
            leptos::logging::warn!("socket closed mid-generation; reply cut short");
        }
    });
}

/// Connect and pump frames both ways until either side stops.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    chat: leptos::prelude::RwSignal<ChatState>,
    mut rx: futures::channel::mpsc::UnboundedReceiver<String>,
) -> Result<(), String> {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    chat.update(|c| c.connection = ConnectionStatus::Connected);

    let send_task = async {
        while let Some(text) = rx.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => dispatch_text(chat, &text),
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("socket recv error: {e}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;
    Ok(())
}

/// Decode one inbound frame and apply it. Undecodable frames are dropped.
#[cfg(feature = "hydrate")]
fn dispatch_text(chat: leptos::prelude::RwSignal<ChatState>, text: &str) {
    use events::{ServerEvent, WireEvent};

    match ServerEvent::decode(text) {
        Ok(event) => chat.update(|c| c.apply(event)),
        Err(e) => leptos::logging::warn!("dropping socket frame: {e}"),
    }
}
