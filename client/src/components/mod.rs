//! Presentational components for the chat page.

pub mod demo_discussions;
pub mod in_progress;
pub mod message_container;
pub mod modal;
pub mod overlay;
pub mod spinner;
pub mod system_message;
pub mod user_message;
