//! Events exchanged between the relay and an executor process.
//!
//! Executor events carry bare values (`"text"`, `42`, `null`) rather than
//! objects; the relay knows which execution they belong to because an
//! executor works on one task at a time.

use serde_json::Value;

use crate::model::ExecuteOrder;
use crate::{Envelope, EventError, WireEvent};

pub const EXECUTE: &str = "execute";
pub const SEND_TEXT: &str = "send_text";
pub const SEND_IMAGE: &str = "send_image";
pub const SEND_HTML: &str = "send_html";
pub const SEND_ERROR: &str = "send_error";
pub const SEND_DEBUG_THOUGHTS: &str = "send_debug_thoughts";
pub const UPDATE_STATUS_MESSAGE: &str = "update_status_message";
pub const UPDATE_STATUS_PROGRESS: &str = "update_status_progress";
pub const FINALIZE: &str = "finalize";

/// Relay → executor.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecutorCommand {
    Execute(ExecuteOrder),
}

impl WireEvent for ExecutorCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::Execute(_) => EXECUTE,
        }
    }

    fn to_envelope(&self) -> Result<Envelope, EventError> {
        match self {
            Self::Execute(order) => Envelope::with_payload(EXECUTE, order),
        }
    }

    fn from_envelope(envelope: &Envelope) -> Result<Self, EventError> {
        match envelope.event.as_str() {
            EXECUTE => Ok(Self::Execute(envelope.payload()?)),
            other => Err(EventError::UnknownEvent(other.to_owned())),
        }
    }
}

/// Executor → relay.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecutorEvent {
    SendText(String),
    SendImage(String),
    SendHtml(String),
    SendError(String),
    SendDebugThoughts(String),
    UpdateStatusMessage(String),
    UpdateStatusProgress(Option<f64>),
    Finalize,
}

impl WireEvent for ExecutorEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::SendText(_) => SEND_TEXT,
            Self::SendImage(_) => SEND_IMAGE,
            Self::SendHtml(_) => SEND_HTML,
            Self::SendError(_) => SEND_ERROR,
            Self::SendDebugThoughts(_) => SEND_DEBUG_THOUGHTS,
            Self::UpdateStatusMessage(_) => UPDATE_STATUS_MESSAGE,
            Self::UpdateStatusProgress(_) => UPDATE_STATUS_PROGRESS,
            Self::Finalize => FINALIZE,
        }
    }

    fn to_envelope(&self) -> Result<Envelope, EventError> {
        let name = self.name();
        match self {
            Self::SendText(value)
            | Self::SendImage(value)
            | Self::SendHtml(value)
            | Self::SendError(value)
            | Self::SendDebugThoughts(value)
            | Self::UpdateStatusMessage(value) => Ok(Envelope::new(name, Value::String(value.clone()))),
            Self::UpdateStatusProgress(progress) => Envelope::with_payload(name, progress),
            Self::Finalize => Ok(Envelope::new(name, Value::Null)),
        }
    }

    fn from_envelope(envelope: &Envelope) -> Result<Self, EventError> {
        match envelope.event.as_str() {
            SEND_TEXT => Ok(Self::SendText(envelope.payload()?)),
            SEND_IMAGE => Ok(Self::SendImage(envelope.payload()?)),
            SEND_HTML => Ok(Self::SendHtml(envelope.payload()?)),
            SEND_ERROR => Ok(Self::SendError(envelope.payload()?)),
            SEND_DEBUG_THOUGHTS => Ok(Self::SendDebugThoughts(envelope.payload()?)),
            UPDATE_STATUS_MESSAGE => Ok(Self::UpdateStatusMessage(envelope.payload()?)),
            UPDATE_STATUS_PROGRESS => Ok(Self::UpdateStatusProgress(envelope.payload()?)),
            FINALIZE => Ok(Self::Finalize),
            other => Err(EventError::UnknownEvent(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
