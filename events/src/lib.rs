//! Shared event model and JSON envelope codec for the chat sockets.
//!
//! This crate owns the wire representation used by the relay server, the
//! browser client and the CLI. Every socket message is a single JSON text
//! frame `{"event": NAME, "data": VALUE}`; the typed enums in this crate map
//! event names to payload types in both directions.
//!
//! Three conversations share the envelope:
//! - browser → relay: [`ClientEvent`]
//! - relay → browser: [`ServerEvent`]
//! - relay ↔ executor: [`ExecutorCommand`] / [`ExecutorEvent`]

pub mod asset;
pub mod model;

mod browser;
mod executor;

pub use browser::{ClientEvent, ServerEvent};
pub use executor::{ExecutorCommand, ExecutorEvent};
pub use model::{ExecuteOrder, ExecuteRequest, Execution, ExecutionStatus, Request, Role, TokenEvent};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned while encoding or decoding events.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The text frame is not a JSON envelope.
    #[error("failed to decode envelope: {0}")]
    Decode(#[source] serde_json::Error),
    /// A payload could not be serialized.
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),
    /// The envelope names an event this side of the protocol does not accept.
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    /// The envelope's `data` does not match the payload type of its event.
    #[error("invalid payload for {event}: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A single message on a socket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Event name, e.g. `"text_received"`.
    pub event: String,
    /// Event payload. Absent on the wire means `null`.
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self { event: event.into(), data }
    }

    /// Build an envelope by serializing `payload` into `data`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Encode`] if the payload cannot be represented as JSON.
    pub fn with_payload<T: Serialize>(event: &str, payload: &T) -> Result<Self, EventError> {
        let data = serde_json::to_value(payload).map_err(EventError::Encode)?;
        Ok(Self::new(event, data))
    }

    /// Deserialize `data` into the payload type of this event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Payload`] when `data` has the wrong shape.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, EventError> {
        serde_json::from_value(self.data.clone())
            .map_err(|source| EventError::Payload { event: self.event.clone(), source })
    }

    /// Serialize the envelope into a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Encode`] if serialization fails.
    pub fn encode(&self) -> Result<String, EventError> {
        serde_json::to_string(self).map_err(EventError::Encode)
    }

    /// Parse a text frame into an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Decode`] for malformed JSON or a missing `event`.
    pub fn decode(text: &str) -> Result<Self, EventError> {
        serde_json::from_str(text).map_err(EventError::Decode)
    }
}

/// A typed event that travels inside an [`Envelope`].
pub trait WireEvent: Sized {
    /// Wire name of this event.
    fn name(&self) -> &'static str;

    /// Convert into an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Encode`] if the payload cannot be serialized.
    fn to_envelope(&self) -> Result<Envelope, EventError>;

    /// Convert from an envelope, dispatching on its event name.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] or [`EventError::Payload`].
    fn from_envelope(envelope: &Envelope) -> Result<Self, EventError>;

    /// Encode straight to a text frame.
    ///
    /// # Errors
    ///
    /// See [`WireEvent::to_envelope`] and [`Envelope::encode`].
    fn encode(&self) -> Result<String, EventError> {
        self.to_envelope()?.encode()
    }

    /// Decode straight from a text frame.
    ///
    /// # Errors
    ///
    /// See [`Envelope::decode`] and [`WireEvent::from_envelope`].
    fn decode(text: &str) -> Result<Self, EventError> {
        Self::from_envelope(&Envelope::decode(text)?)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
