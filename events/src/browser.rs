//! Events exchanged between the browser and the relay.

use crate::model::{ExecuteRequest, Execution, TokenEvent};
use crate::{Envelope, EventError, WireEvent};

pub const EXECUTION_CREATED: &str = "execution_created";
pub const EXECUTION_UPDATED: &str = "execution_updated";
pub const TEXT_RECEIVED: &str = "text_received";
pub const DEBUG_THOUGHT_RECEIVED: &str = "debug_thought_received";
pub const FINALIZE: &str = "finalize";
pub const EXECUTE: &str = "execute";

/// Legacy spelling still emitted by older relays.
const TEXT_RECEIVED_LEGACY: &str = "text_recieved";

/// Relay → browser.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerEvent {
    ExecutionCreated(Execution),
    ExecutionUpdated(Execution),
    TextReceived(TokenEvent),
    DebugThoughtReceived(TokenEvent),
    /// The generation finished. Carries the completed execution when the
    /// relay has one.
    Finalize(Option<Execution>),
}

impl WireEvent for ServerEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ExecutionCreated(_) => EXECUTION_CREATED,
            Self::ExecutionUpdated(_) => EXECUTION_UPDATED,
            Self::TextReceived(_) => TEXT_RECEIVED,
            Self::DebugThoughtReceived(_) => DEBUG_THOUGHT_RECEIVED,
            Self::Finalize(_) => FINALIZE,
        }
    }

    fn to_envelope(&self) -> Result<Envelope, EventError> {
        let name = self.name();
        match self {
            Self::ExecutionCreated(execution) | Self::ExecutionUpdated(execution) => {
                Envelope::with_payload(name, execution)
            }
            Self::TextReceived(token) | Self::DebugThoughtReceived(token) => Envelope::with_payload(name, token),
            Self::Finalize(execution) => Envelope::with_payload(name, execution),
        }
    }

    fn from_envelope(envelope: &Envelope) -> Result<Self, EventError> {
        match envelope.event.as_str() {
            EXECUTION_CREATED => Ok(Self::ExecutionCreated(envelope.payload()?)),
            EXECUTION_UPDATED => Ok(Self::ExecutionUpdated(envelope.payload()?)),
            TEXT_RECEIVED | TEXT_RECEIVED_LEGACY => Ok(Self::TextReceived(envelope.payload()?)),
            DEBUG_THOUGHT_RECEIVED => Ok(Self::DebugThoughtReceived(envelope.payload()?)),
            // Older relays send the raw execution dict or nothing at all; only
            // the event itself matters to the client.
            FINALIZE => Ok(Self::Finalize(envelope.payload().ok().flatten())),
            other => Err(EventError::UnknownEvent(other.to_owned())),
        }
    }
}

/// Browser → relay.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    /// Run the assistant over the full transcript.
    Execute(ExecuteRequest),
}

impl WireEvent for ClientEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Execute(_) => EXECUTE,
        }
    }

    fn to_envelope(&self) -> Result<Envelope, EventError> {
        match self {
            Self::Execute(request) => Envelope::with_payload(EXECUTE, request),
        }
    }

    fn from_envelope(envelope: &Envelope) -> Result<Self, EventError> {
        match envelope.event.as_str() {
            EXECUTE => Ok(Self::Execute(envelope.payload()?)),
            other => Err(EventError::UnknownEvent(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "browser_test.rs"]
mod tests;
