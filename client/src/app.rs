//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use events::ClientEvent;
#[cfg(feature = "hydrate")]
use events::WireEvent;

use crate::pages::chat::ChatPage;
use crate::state::chat::ChatState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Handle for publishing events on the socket.
///
/// Empty during SSR and until the socket task has been spawned; `send`
/// reports `false` in that case.
#[derive(Clone, Default)]
pub struct EventSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl EventSender {
    #[cfg(feature = "hydrate")]
    pub fn new(tx: futures::channel::mpsc::UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Queue an event for the socket. Returns `false` if there is no open
    /// connection to queue it on.
    pub fn send(&self, event: &ClientEvent) -> bool {
        #[cfg(feature = "hydrate")]
        {
            let Some(tx) = &self.tx else {
                return false;
            };
            match event.encode() {
                Ok(text) => tx.unbounded_send(text).is_ok(),
                Err(e) => {
                    leptos::logging::warn!("failed to encode {}: {e}", event.name());
                    false
                }
            }
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = event;
            false
        }
    }
}

/// Root application component.
///
/// Provides the conversation state and the socket sender, opens the single
/// socket connection once in the browser, and routes to the chat page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let chat = RwSignal::new(ChatState::default());
    let sender = RwSignal::new(EventSender::default());

    provide_context(chat);
    provide_context(sender);

    // Effects only run in the browser, and this one reads no signals, so the
    // socket is opened exactly once.
    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        {
            let tx = crate::net::socket::spawn_socket_client(chat);
            sender.set(EventSender::new(tx));
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/ecogen.css"/>
        <Title text="EcoGen"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=ChatPage/>
            </Routes>
        </Router>
    }
}
