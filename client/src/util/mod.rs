//! Small rendering helpers shared by components.

pub mod markdown;
