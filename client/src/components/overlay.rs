//! Fullscreen image preview.

use leptos::prelude::*;

#[component]
pub fn ImageOverlay(src: String, on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="overlay" on:click=move |_| on_close.run(())>
            <img class="overlay__image" src=src.clone() alt=src/>
        </div>
    }
}
