//! Screens of the demo application.
//!
//! A page owns every value its widgets are bound to. It turns events into
//! actions, applies actions to its state, and rebuilds the widgets from that
//! state on every frame.

use formkit::EventHandlingStatus;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::{actions::Action, tui::Event};

pub(crate) mod gallery;

pub(crate) trait Layer: WidgetExt + EventLoopParticipant {
    /// Initialize the page
    fn init(&mut self) {}
}

pub(crate) trait WidgetExt {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Trait for components that participate in the event loop.
///
/// Events never change state directly: they are turned into actions, which
/// come back through [`EventLoopParticipant::update`].
pub(crate) trait EventLoopParticipant {
    #[must_use]
    fn handle_events(&self, event: &Event) -> EventHandlingStatus;

    fn update(&mut self, action: Action);

    #[cfg(test)]
    /// Handle one event, then apply every action it produced.
    fn event_loop_once(
        &mut self,
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<Action>,
        event: Event,
    ) -> EventHandlingStatus {
        let status = self.handle_events(&event);
        while let Ok(action) = rx.try_recv() {
            self.update(action);
        }
        status
    }
}
