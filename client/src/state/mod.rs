//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `message` holds the immutable display model (messages and fragments);
//! `chat` owns the conversation and the streaming buffers and is the only
//! place socket events mutate anything.

pub mod chat;
pub mod message;
