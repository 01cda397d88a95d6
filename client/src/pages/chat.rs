//! The single chat page: history, streaming bubble and composer.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use events::ClientEvent;
use leptos::prelude::*;

use crate::app::EventSender;
use crate::components::demo_discussions::DemoDiscussions;
use crate::components::in_progress::InProgress;
use crate::components::message_container::MessageContainer;
use crate::state::chat::{ChatState, ConnectionStatus};

pub(crate) fn connection_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connecting => "Connecting",
        ConnectionStatus::Connected => "Connected",
        ConnectionStatus::Disconnected => "Disconnected",
    }
}

pub(crate) fn connection_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connecting => "chat-page__status chat-page__status--connecting",
        ConnectionStatus::Connected => "chat-page__status chat-page__status--connected",
        ConnectionStatus::Disconnected => "chat-page__status chat-page__status--disconnected",
    }
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let sender = expect_context::<RwSignal<EventSender>>();
    let input = RwSignal::new(String::new());
    let history_ref = NodeRef::<leptos::html::Div>::new();

    let can_send = move || chat.with(|c| c.can_send(&input.get()));

    let do_send = move || {
        let text = input.get_untracked();
        if !chat.with_untracked(|c| c.can_send(&text)) {
            return;
        }
        let Some(request) = chat.try_update(|c| c.push_user_message(&text)) else {
            return;
        };
        if !sender.with_untracked(|s| s.send(&ClientEvent::Execute(request))) {
            leptos::logging::warn!("socket unavailable; request not sent");
            chat.update(ChatState::record_send_failure);
        }
        input.set(String::new());
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let on_pick = Callback::new(move |prompt: String| input.set(prompt));

    // Keep the newest content in view as history grows or tokens stream in.
    Effect::new(move || {
        chat.track();
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = history_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <div class="chat-page">
            <header class="chat-page__header">
                <h1 class="chat-page__title">"EcoGen"</h1>
                <span class=move || chat.with(|c| connection_class(c.connection))>
                    {move || chat.with(|c| connection_label(c.connection))}
                </span>
            </header>

            <div class="chat-page__history" node_ref=history_ref>
                {move || {
                    chat.with(|c| c.history.is_empty() && !c.is_generating())
                        .then(|| view! { <DemoDiscussions on_pick/> })
                }}
                <For
                    each=move || chat.with(|c| c.history.clone().into_iter().enumerate().collect::<Vec<_>>())
                    key=|(index, _)| *index
                    children=|(_, message)| view! { <MessageContainer message/> }
                />
                <Show when=move || chat.with(ChatState::is_generating)>
                    <InProgress/>
                </Show>
            </div>

            <div class="chat-page__composer">
                <input
                    class="chat-page__input"
                    type="text"
                    placeholder="Ask about energy or steel prices..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button class="chat-page__send" disabled=move || !can_send() on:click=move |_| do_send()>
                    "Send"
                </button>
            </div>
        </div>
    }
}
