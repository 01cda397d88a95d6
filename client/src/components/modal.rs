//! Centered dialog over a dimmed backdrop.

use leptos::prelude::*;

/// Closes on backdrop click, the close button, or Escape.
#[component]
pub fn Modal(on_close: Callback<()>, children: Children) -> impl IntoView {
    let on_backdrop = move |_| on_close.run(());
    let on_close_click = move |_| on_close.run(());
    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });

    view! {
        <div class="modal__backdrop" on:click=on_backdrop>
            <div class="modal" on:click=move |ev| ev.stop_propagation() on:keydown=move |ev| on_keydown.run(ev) tabindex="0">
                <div class="modal__header">
                    <h2>"Thought process"</h2>
                    <button class="modal__close" on:click=on_close_click title="Close">
                        "✕"
                    </button>
                </div>
                <div class="modal__body">{children()}</div>
            </div>
        </div>
    }
}
