//! Conversation state and the socket-event fold.
//!
//! DESIGN
//! ======
//! `ChatState` is a plain struct held in one `RwSignal` and provided via
//! context. Socket events are applied with [`ChatState::apply`]; every
//! transition lives here so it can be tested without a browser.
//!
//! A generation is "in flight" from the moment a request is sent (or the
//! first unsolicited token arrives) until `finalize` commits the pending
//! message. Send stays disabled for that whole window.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use events::{ExecuteRequest, Execution, ServerEvent};

use super::message::{Fragment, Message, push_token};

/// State of the one socket connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

/// Conversation state for the chat page.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    /// Committed messages, oldest first. Append-only.
    pub history: Vec<Message>,
    /// Latest execution snapshot reported by the relay.
    pub execution: Option<Execution>,
    /// Fragments streamed so far for the message being generated.
    pub pending: Vec<Fragment>,
    /// Thought process streamed so far for the message being generated.
    pub decision: Vec<String>,
    /// A request was sent and its `finalize` has not arrived yet.
    pub awaiting_reply: bool,
    pub connection: ConnectionStatus,
}

impl ChatState {
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.awaiting_reply || !self.pending.is_empty() || !self.decision.is_empty()
    }

    /// Send is allowed for non-blank input while nothing is in flight.
    #[must_use]
    pub fn can_send(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.is_generating()
    }

    /// Append the user's message and return the full transcript to emit.
    pub fn push_user_message(&mut self, text: &str) -> ExecuteRequest {
        self.history.push(Message::user(text.trim()));
        self.awaiting_reply = true;
        self.transcript()
    }

    /// Every message in history as an ordered `{content, role}` list.
    #[must_use]
    pub fn transcript(&self) -> ExecuteRequest {
        ExecuteRequest { messages: self.history.iter().map(Message::to_request).collect() }
    }

    /// The request never left the browser: show an error bubble instead of
    /// waiting for a reply that cannot come.
    pub fn record_send_failure(&mut self) {
        self.awaiting_reply = false;
        self.history.push(Message::error());
    }

    /// Fold one relay event into the state.
    pub fn apply(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::ExecutionCreated(execution) | ServerEvent::ExecutionUpdated(execution) => {
                self.execution = Some(execution);
            }
            ServerEvent::TextReceived(token) => push_token(&mut self.pending, &token.text),
            ServerEvent::DebugThoughtReceived(thought) => self.decision.push(thought.text),
            ServerEvent::Finalize(_) => {
                self.finalize();
            }
        }
    }

    /// The socket closed. A generation in flight can no longer finish, so
    /// whatever streamed so far is committed with an error notice appended.
    ///
    /// Returns `true` if a message was committed.
    pub fn connection_lost(&mut self) -> bool {
        self.connection = ConnectionStatus::Disconnected;
        if !self.is_generating() {
            return false;
        }
        self.pending.push(Fragment::Error);
        self.finalize()
    }

    /// Commit the pending fragments and decision as a system message and
    /// reset the streaming state.
    ///
    /// Returns `false` (and changes nothing) when no generation is in
    /// flight, so a repeated `finalize` cannot commit twice.
    pub fn finalize(&mut self) -> bool {
        if !self.is_generating() {
            return false;
        }
        let fragments = std::mem::take(&mut self.pending);
        let decision = std::mem::take(&mut self.decision);
        self.history.push(Message::system(fragments, decision));
        self.execution = None;
        self.awaiting_reply = false;
        true
    }
}
