//! Conversation and execution payloads.
//!
//! The server side of this protocol was written by several hands over time,
//! so decoding is lenient about field names (`message`/`sender` vs
//! `content`/`role`) and a few legacy spellings. Encoding always uses the
//! canonical names.

use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    #[serde(alias = "bot", alias = "assistant")]
    System,
}

/// One transcript entry sent to the assistant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(alias = "message")]
    pub content: String,
    #[serde(alias = "sender")]
    pub role: Role,
}

impl Request {
    pub fn new(content: impl Into<String>, role: Role) -> Self {
        Self { content: content.into(), role }
    }
}

/// Payload of the browser's `execute` event: the whole conversation so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub messages: Vec<Request>,
}

impl ExecuteRequest {
    /// The newest transcript entry, which becomes `Execution::request`.
    #[must_use]
    pub fn last(&self) -> Option<&Request> {
        self.messages.last()
    }
}

/// Payload of the relay's `execute` command to an executor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteOrder {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<Request>,
}

/// Lifecycle of one generation request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    #[default]
    Requested,
    #[serde(alias = "sceduled")]
    Scheduled,
    Started,
    Completed,
}

impl ExecutionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Scheduled => "scheduled",
            Self::Started => "started",
            Self::Completed => "completed",
        }
    }

    /// Parse a status name, accepting the legacy `sceduled` spelling.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "requested" => Some(Self::Requested),
            "scheduled" | "sceduled" => Some(Self::Scheduled),
            "started" => Some(Self::Started),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Backend-reported progress snapshot for the current generation request.
///
/// Always replaced wholesale; nothing merges two executions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub id: String,
    #[serde(default)]
    pub request: Request,
    #[serde(default)]
    pub status: ExecutionStatus,
    /// Percentage complete. `None` (or a negative value) means unknown.
    #[serde(default)]
    pub progress: Option<f64>,
    /// Free-form status pushed by the executor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl Execution {
    pub fn new(id: impl Into<String>, request: Request) -> Self {
        Self { id: id.into(), request, ..Self::default() }
    }

    /// Progress as a whole percentage, if known.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn known_progress(&self) -> Option<u8> {
        let progress = self.progress?;
        if !progress.is_finite() || progress < 0.0 {
            return None;
        }
        // Clamped to 0..=100 first, so the cast cannot truncate.
        Some(progress.min(100.0).round() as u8)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ExecutionStatus::Completed
    }
}

/// Payload of `text_received` and `debug_thought_received`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEvent {
    #[serde(default)]
    pub id: String,
    pub text: String,
}

impl TokenEvent {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
