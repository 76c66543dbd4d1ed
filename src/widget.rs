//! The widgets.
//!
//! Each widget is built from the values its caller owns, renders through
//! [`crate::view::Node`], and reports interaction back through callbacks or
//! returned events. None of them keeps anything between frames.

pub mod button;
pub mod labeled_input;
pub mod overlay;
pub mod spinner;

/// Whether an event was used by the receiver or should travel further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum EventHandlingStatus {
    Consumed,
    NotConsumed,
}

impl EventHandlingStatus {
    pub fn is_consumed(self) -> bool {
        matches!(self, EventHandlingStatus::Consumed)
    }
}
