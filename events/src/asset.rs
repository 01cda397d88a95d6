//! Inline asset markers carried inside streamed text tokens.
//!
//! A marker has the form `<asset:KIND:PAYLOAD>`, where `KIND` is `image`,
//! `html` or `error` and `PAYLOAD` runs to the first `>`. Payloads are
//! usually URLs, so they may contain `:`. A `>` inside a payload travels as
//! `%3E` and is decoded again by [`segments`]. Anything that does not parse
//! as a marker stays plain text.

use std::borrow::Cow;

const MARKER_PREFIX: &str = "<asset:";
const MARKER_SUFFIX: char = '>';
const ENCODED_SUFFIX: &str = "%3E";

/// Kind of asset a marker refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Html,
    Error,
}

impl AssetKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Html => "html",
            Self::Error => "error",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "image" => Some(Self::Image),
            "html" => Some(Self::Html),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One piece of a token after marker detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// Payload is borrowed unless it had an encoded `>` to restore.
    Asset { kind: AssetKind, payload: Cow<'a, str> },
}

/// Render a marker. A `>` inside the payload would end the marker early, so
/// it is percent-encoded.
#[must_use]
pub fn marker(kind: AssetKind, payload: &str) -> String {
    format!("{MARKER_PREFIX}{}:{}{MARKER_SUFFIX}", kind.as_str(), payload.replace(MARKER_SUFFIX, ENCODED_SUFFIX))
}

/// Split a token into text runs and asset markers, in order.
///
/// Empty text runs are never produced, so an empty token yields no segments.
#[must_use]
pub fn segments(token: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    let mut text_from = 0;

    while let Some(offset) = token[cursor..].find(MARKER_PREFIX) {
        let start = cursor + offset;
        let body_start = start + MARKER_PREFIX.len();
        match parse_marker_body(&token[body_start..]) {
            Some((kind, payload, consumed)) => {
                if start > text_from {
                    out.push(Segment::Text(&token[text_from..start]));
                }
                out.push(Segment::Asset { kind, payload });
                cursor = body_start + consumed;
                text_from = cursor;
            }
            None => cursor = body_start,
        }
    }

    if text_from < token.len() {
        out.push(Segment::Text(&token[text_from..]));
    }
    out
}

/// Parse `KIND:PAYLOAD>` and return the number of bytes consumed.
fn parse_marker_body(body: &str) -> Option<(AssetKind, Cow<'_, str>, usize)> {
    let end = body.find(MARKER_SUFFIX)?;
    let (kind, payload) = body[..end].split_once(':')?;
    let kind = AssetKind::parse(kind)?;
    Some((kind, decode_payload(payload), end + MARKER_SUFFIX.len_utf8()))
}

fn decode_payload(payload: &str) -> Cow<'_, str> {
    if payload.contains(ENCODED_SUFFIX) {
        Cow::Owned(payload.replace(ENCODED_SUFFIX, &MARKER_SUFFIX.to_string()))
    } else {
        Cow::Borrowed(payload)
    }
}

#[cfg(test)]
#[path = "asset_test.rs"]
mod tests;
