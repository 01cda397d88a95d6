//! Picks the bubble layout for a message by sender role.

use events::Role;
use leptos::prelude::*;

use crate::components::system_message::SystemMessage;
use crate::components::user_message::UserMessage;
use crate::state::message::Message;

#[component]
pub fn MessageContainer(message: Message, #[prop(optional)] hide_decision: bool) -> impl IntoView {
    match message.sender_role {
        Role::System => view! { <SystemMessage message hide_decision/> }.into_any(),
        Role::User => view! { <UserMessage message/> }.into_any(),
    }
}
