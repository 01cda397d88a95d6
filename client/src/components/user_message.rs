//! Right-aligned bubble for messages the user typed.

use leptos::prelude::*;

use crate::state::message::{Fragment, Message};

/// User bubble. Only text fragments are shown, verbatim.
#[component]
pub fn UserMessage(message: Message) -> impl IntoView {
    let lines = message
        .fragments
        .into_iter()
        .filter_map(|fragment| match fragment {
            Fragment::Text(text) => Some(view! { <div class="message__text">{text}</div> }),
            _ => None,
        })
        .collect_view();

    view! {
        <div class="message message--user">
            <div class="message__bubble message__bubble--user">{lines}</div>
        </div>
    }
}
