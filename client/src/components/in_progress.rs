//! Bubble for the answer that is still streaming.

#[cfg(test)]
#[path = "in_progress_test.rs"]
mod in_progress_test;

use events::{Execution, ExecutionStatus};
use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::components::system_message::SystemMessage;
use crate::state::chat::ChatState;
use crate::state::message::{Fragment, Message};

/// Status line for an execution. Completed executions show nothing; an
/// executor-supplied message wins over the generic label otherwise.
#[must_use]
pub fn status_label(execution: &Execution) -> Option<String> {
    if execution.is_completed() {
        return None;
    }
    if let Some(message) = execution.status_message.as_deref().filter(|m| !m.trim().is_empty()) {
        return Some(message.to_owned());
    }
    let label = match execution.status {
        ExecutionStatus::Requested => "Generation requested...",
        ExecutionStatus::Scheduled => "Starting response generation...",
        ExecutionStatus::Started => "Generating response...",
        ExecutionStatus::Completed => return None,
    };
    Some(label.to_owned())
}

/// Fragments to show while streaming; a placeholder until the first token.
#[must_use]
pub fn visible_fragments(pending: &[Fragment]) -> Vec<Fragment> {
    if pending.is_empty() {
        vec![Fragment::Text("...".to_owned())]
    } else {
        pending.to_vec()
    }
}

#[component]
pub fn InProgress() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();

    move || {
        let (fragments, execution) = chat.with(|c| (visible_fragments(&c.pending), c.execution.clone()));
        let progress = execution.as_ref().and_then(Execution::known_progress);
        let label = execution.as_ref().and_then(status_label);
        let message = Message::system(fragments, Vec::new());

        view! {
            <SystemMessage message hide_decision=true>
                {progress.map(|percent| view! { <Spinner percent/> })}
                {label.map(|label| view! { <div class="message__status">{label}</div> })}
            </SystemMessage>
        }
    }
}
