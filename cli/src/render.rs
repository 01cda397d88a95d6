//! Plain-text rendering of browser events for the console client.

use events::asset::{self, AssetKind, Segment};
use events::{Execution, ExecutionStatus};

/// Token text with asset markers replaced by bracketed placeholders.
#[must_use]
pub fn render_token(token: &str) -> String {
    asset::segments(token)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.to_owned(),
            Segment::Asset { kind: AssetKind::Image, payload } => format!("[image: {payload}]"),
            Segment::Asset { kind: AssetKind::Html, payload } => format!("[html: {payload}]"),
            Segment::Asset { kind: AssetKind::Error, payload } => format!("[error: {payload}]"),
        })
        .collect()
}

/// One-line execution summary for stderr.
#[must_use]
pub fn render_status(execution: &Execution) -> String {
    let mut line = execution.status.as_str().to_owned();
    if execution.status != ExecutionStatus::Completed {
        if let Some(message) = &execution.status_message {
            line.push_str(": ");
            line.push_str(message);
        }
    }
    if let Some(percent) = execution.known_progress() {
        line.push_str(&format!(" ({percent}%)"));
    }
    line
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
