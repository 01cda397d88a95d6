//! Greeting bubbles and sample questions shown before the first message.

use leptos::prelude::*;

use crate::components::system_message::SystemMessage;
use crate::state::message::{Fragment, Message};

const GREETING: &[&str] = &[
    "Hello there!",
    "Welcome to the EcoGen chatbot service! How can I help you today?",
    "You might send your own questions or use one of our sample questions below.",
    "Please keep in mind that for this demo I am only capable of answering questions regarding energy prices or steel price predictions.",
];

/// Suggested questions. Picking one pre-fills the input.
pub const DEMO_PROMPTS: &[&str] = &[
    "What will the electricity price in Germany be next week?",
    "How did natural gas prices develop over the last month?",
    "Can you predict the price of hot-rolled steel coil for the next quarter?",
    "What is the forecast for scrap steel prices in Europe?",
];

#[component]
pub fn DemoDiscussions(on_pick: Callback<String>) -> impl IntoView {
    let greeting = GREETING
        .iter()
        .map(|line| {
            let message = Message::system(vec![Fragment::Text((*line).to_owned())], Vec::new());
            view! { <SystemMessage message hide_decision=true/> }
        })
        .collect_view();

    let prompts = DEMO_PROMPTS
        .iter()
        .map(|prompt| {
            let prompt = *prompt;
            view! {
                <button class="demo-prompts__item" on:click=move |_| on_pick.run(prompt.to_owned())>
                    {prompt}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="demo-discussions">
            {greeting}
            <div class="demo-prompts">{prompts}</div>
        </div>
    }
}
