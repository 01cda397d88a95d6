//! Display model for chat messages.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use events::asset::{self, AssetKind, Segment};
use events::{Request, Role};

/// One renderable unit of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Image(String),
    Html(String),
    Error,
}

/// A chat bubble. Never mutated once it is in the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub fragments: Vec<Fragment>,
    pub sender_role: Role,
    /// Thought process recorded while the message was generated.
    pub decision: Vec<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self { fragments: vec![Fragment::Text(text.into())], sender_role: Role::User, decision: Vec::new() }
    }

    pub fn system(fragments: Vec<Fragment>, decision: Vec<String>) -> Self {
        Self { fragments, sender_role: Role::System, decision }
    }

    /// System bubble that only says something went wrong.
    pub fn error() -> Self {
        Self::system(vec![Fragment::Error], Vec::new())
    }

    /// Text fragments joined with single spaces; other fragments are skipped.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.fragments
            .iter()
            .filter_map(|fragment| match fragment {
                Fragment::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Transcript entry sent to the assistant for this message.
    #[must_use]
    pub fn to_request(&self) -> Request {
        Request::new(self.text_content(), self.sender_role)
    }
}

/// Fold one streamed token into a fragment list.
///
/// Text extends the trailing text fragment when there is one; asset markers
/// always start a fragment of their own, which also ends the text run.
pub fn push_token(fragments: &mut Vec<Fragment>, token: &str) {
    for segment in asset::segments(token) {
        match segment {
            Segment::Text(text) => {
                if let Some(Fragment::Text(last)) = fragments.last_mut() {
                    last.push_str(text);
                } else {
                    fragments.push(Fragment::Text(text.to_owned()));
                }
            }
            Segment::Asset { kind: AssetKind::Image, payload } => fragments.push(Fragment::Image(payload.into_owned())),
            Segment::Asset { kind: AssetKind::Html, payload } => fragments.push(Fragment::Html(payload.into_owned())),
            Segment::Asset { kind: AssetKind::Error, .. } => fragments.push(Fragment::Error),
        }
    }
}
