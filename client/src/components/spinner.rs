//! Circular progress indicator with a percentage label.

use leptos::prelude::*;

#[cfg(test)]
#[path = "spinner_test.rs"]
mod spinner_test;

/// Text shown inside the spinner.
#[must_use]
pub fn spinner_label(percent: u8) -> String {
    format!("{percent}%")
}

/// Stroke length of the progress arc on a circle of radius 18.
#[must_use]
pub fn arc_length(percent: u8) -> f64 {
    let circumference = 2.0 * std::f64::consts::PI * 18.0;
    circumference * f64::from(percent.min(100)) / 100.0
}

#[component]
pub fn Spinner(percent: u8) -> impl IntoView {
    let dash = format!("{:.2} 200", arc_length(percent));
    view! {
        <div class="spinner" role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow=percent.to_string()>
            <svg class="spinner__ring" viewBox="0 0 40 40">
                <circle class="spinner__track" cx="20" cy="20" r="18"></circle>
                <circle class="spinner__arc" cx="20" cy="20" r="18" stroke-dasharray=dash></circle>
            </svg>
            <span class="spinner__label">{spinner_label(percent)}</span>
        </div>
    }
}
