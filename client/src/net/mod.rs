//! Networking: the socket bridge between the relay and the UI state.

pub mod socket;
