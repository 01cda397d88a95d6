//! Left-aligned bubble for assistant output.
//!
//! Renders each fragment by tag and owns the only local UI state in the
//! message list: which image is zoomed and whether the thought-process
//! modal is open.

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::components::overlay::ImageOverlay;
use crate::state::message::{Fragment, Message};
use crate::util::markdown::render_markdown_html;

pub const ERROR_NOTICE: &str = "An error occurred while generating this response.";

/// Assistant bubble. `children` are appended inside the bubble after the
/// fragments (used by the in-progress view for its spinner).
#[component]
pub fn SystemMessage(
    message: Message,
    #[prop(optional)] hide_decision: bool,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let zoomed = RwSignal::new(None::<String>);
    let show_decision = RwSignal::new(false);
    let decision = message.decision;

    let fragments = message
        .fragments
        .into_iter()
        .map(|fragment| render_fragment(fragment, zoomed))
        .collect_view();

    view! {
        <div class="message message--system">
            <div class="avatar" aria-hidden="true">"E"</div>
            <div class="message__bubble message__bubble--system">
                {fragments}
                {children.map(|children| children())}
                {(!hide_decision)
                    .then(|| {
                        view! {
                            <button class="message__decision-button" on:click=move |_| show_decision.set(true)>
                                "Show thought process"
                            </button>
                        }
                    })}
            </div>
            {move || {
                show_decision
                    .get()
                    .then(|| {
                        let entries = decision.clone();
                        view! {
                            <Modal on_close=Callback::new(move |()| show_decision.set(false))>
                                {if entries.is_empty() {
                                    view! { <div class="modal__empty">"No thoughts were recorded."</div> }.into_any()
                                } else {
                                    entries
                                        .into_iter()
                                        .map(|entry| view! { <div class="modal__entry">{entry}</div> })
                                        .collect_view()
                                        .into_any()
                                }}
                            </Modal>
                        }
                    })
            }}
            {move || {
                zoomed
                    .get()
                    .map(|src| view! { <ImageOverlay src on_close=Callback::new(move |()| zoomed.set(None))/> })
            }}
        </div>
    }
}

fn render_fragment(fragment: Fragment, zoomed: RwSignal<Option<String>>) -> AnyView {
    match fragment {
        Fragment::Text(text) => {
            let rendered = render_markdown_html(&text);
            view! { <div class="message__text" inner_html=rendered></div> }.into_any()
        }
        Fragment::Image(src) => {
            let on_click_src = src.clone();
            view! {
                <div class="message__image" on:click=move |_| zoomed.set(Some(on_click_src.clone()))>
                    <img src=src.clone() alt=src/>
                </div>
            }
            .into_any()
        }
        Fragment::Html(src) => view! {
            <div class="message__html">
                <iframe src=src></iframe>
            </div>
        }
        .into_any(),
        Fragment::Error => view! { <div class="message__error">{ERROR_NOTICE}</div> }.into_any(),
    }
}
