//! Canned answers for the demo executor.
//!
//! The demo only knows two topics. A request is classified by keyword, then
//! answered with a fixed sequence of executor events that exercises every
//! part of the protocol: status, progress, thoughts, streamed words, an
//! image asset and `finalize`.

use events::{ExecutorEvent, Request, Role};

/// Forecast chart attached to energy and steel answers.
pub const FORECAST_IMAGE: &str = "https://i.imgur.com/2X2IDEA.jpeg";

/// Days covered by the canned forecasts.
pub const HORIZON_DAYS: u32 = 9;

const ENERGY_KEYWORDS: &[&str] = &["energy", "electricity", "power", "gas", "kwh", "mwh"];
const STEEL_KEYWORDS: &[&str] = &["steel", "coil", "scrap", "rebar", "iron ore"];

const ENERGY_ANSWER: &str = "Over the next 9 days day-ahead electricity prices are expected to stay \
between 78 and 94 EUR/MWh. The forecast is driven mostly by gas prices and expected wind generation; \
a calmer second week pushes the upper end of the range.";

const STEEL_ANSWER: &str = "Hot-rolled coil prices are forecast to ease slightly, from about 640 to \
615 EUR/t over the coming weeks. Weaker construction demand and stable iron ore costs are the main \
factors behind the decline.";

const DENY_ANSWER: &str = "Unfortunately, I'm just an AI assistant specializing in energy price and \
steel price forecasting. However, I am happy to answer any questions you might have on steel or \
energy prices.";

/// What a request is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    Energy,
    Steel,
    Other,
}

impl Topic {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Steel => "steel",
            Self::Other => "other",
        }
    }
}

/// Classify a prompt by keyword. Steel wins when both topics appear, since
/// steel questions often mention energy costs.
#[must_use]
pub fn classify(prompt: &str) -> Topic {
    let lower = prompt.to_lowercase();
    if STEEL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Topic::Steel
    } else if ENERGY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Topic::Energy
    } else {
        Topic::Other
    }
}

/// Newest message the user wrote.
#[must_use]
pub fn last_user_prompt(messages: &[Request]) -> Option<&str> {
    messages.iter().rev().find(|m| m.role == Role::User).map(|m| m.content.as_str())
}

/// Events to send, in order, in reply to a transcript.
#[must_use]
pub fn script_for(messages: &[Request]) -> Vec<ExecutorEvent> {
    let Some(prompt) = last_user_prompt(messages) else {
        return vec![ExecutorEvent::SendError("no question received".to_owned()), ExecutorEvent::Finalize];
    };

    let topic = classify(prompt);
    let mut events = vec![
        ExecutorEvent::UpdateStatusMessage("started".to_owned()),
        ExecutorEvent::SendDebugThoughts(format!("Classified request as {}.", topic.as_str())),
    ];

    let answer = match topic {
        Topic::Energy => ENERGY_ANSWER,
        Topic::Steel => STEEL_ANSWER,
        Topic::Other => {
            events.push(ExecutorEvent::SendDebugThoughts("Request is outside the supported topics; declining.".to_owned()));
            events.extend(words(DENY_ANSWER));
            events.push(ExecutorEvent::Finalize);
            return events;
        }
    };

    events.push(ExecutorEvent::UpdateStatusMessage(format!("run {} module, horizon {HORIZON_DAYS}", topic.as_str())));
    events.push(ExecutorEvent::UpdateStatusProgress(Some(0.0)));
    events.push(ExecutorEvent::SendDebugThoughts(format!("Forecast horizon: {HORIZON_DAYS} days.")));
    events.push(ExecutorEvent::UpdateStatusProgress(Some(50.0)));
    events.extend(words(answer));
    events.push(ExecutorEvent::SendImage(FORECAST_IMAGE.to_owned()));
    events.push(ExecutorEvent::UpdateStatusProgress(Some(100.0)));
    events.push(ExecutorEvent::Finalize);
    events
}

/// Stream text word by word; concatenating the tokens gives back `text`.
fn words(text: &str) -> impl Iterator<Item = ExecutorEvent> + '_ {
    text.split_inclusive(' ').map(|word| ExecutorEvent::SendText(word.to_owned()))
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
