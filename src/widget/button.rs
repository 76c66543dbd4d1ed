use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{BorderType, Widget},
};
use tracing::trace;

use super::EventHandlingStatus;
use crate::{
    theme,
    view::{Node, SpinnerNode, Surface, TextNode},
};

/// Corner radius in logical points.
///
/// Terminal borders only come square or rounded, so any positive radius
/// draws rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerRadius(pub u16);

impl Default for CornerRadius {
    fn default() -> Self {
        Self(theme::BUTTON_CORNER_RADIUS)
    }
}

impl From<u16> for CornerRadius {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl CornerRadius {
    pub fn border_type(self) -> BorderType {
        if self.0 == 0 {
            BorderType::Plain
        } else {
            BorderType::Rounded
        }
    }
}

/// A full-width button with a loading state.
///
/// While `loading` is true the label is replaced by a spinner and every
/// activation is dropped: the callback is not called, not even later.
pub struct ActionButton<'a> {
    label: String,
    on_activate: Box<dyn FnMut() + 'a>,
    loading: bool,
    background: Color,
    foreground: Color,
    corner_radius: CornerRadius,
    focused: bool,
    hit_area: Option<Rect>,
}

impl<'a> ActionButton<'a> {
    pub fn new(label: impl Into<String>, on_activate: impl FnMut() + 'a, loading: bool) -> Self {
        Self {
            label: label.into(),
            on_activate: Box::new(on_activate),
            loading,
            background: theme::BUTTON_BACKGROUND,
            foreground: theme::BUTTON_FOREGROUND,
            corner_radius: CornerRadius::default(),
            focused: false,
            hit_area: None,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn corner_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.corner_radius = radius.into();
        self
    }

    /// Keyboard activation (`Enter`, `Space`) only reaches a focused button.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Where the button was last drawn, for mouse activation.
    pub fn hit_area(mut self, area: Rect) -> Self {
        self.hit_area = Some(area);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> Node {
        let content = if self.loading {
            Node::Spinner(SpinnerNode::new(self.foreground))
        } else {
            Node::Text(
                TextNode::new(self.label.as_str())
                    .style(
                        Style::new()
                            .fg(self.foreground)
                            .add_modifier(Modifier::BOLD),
                    )
                    .alignment(Alignment::Center),
            )
        };

        let mut style = Style::new().bg(self.background).fg(self.foreground);
        if self.loading {
            style = style.add_modifier(Modifier::DIM);
        }
        let mut border_style = Style::new().fg(self.foreground);
        if self.focused {
            border_style = border_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }

        content.surface(Surface {
            style,
            border: Some(self.corner_radius.border_type()),
            border_style,
            padding: 1,
        })
    }

    /// Runs the callback unless loading. Returns whether it ran.
    pub fn activate(&mut self) -> bool {
        if self.loading {
            trace!(label = %self.label, "activation ignored while loading");
            return false;
        }
        (self.on_activate)();
        true
    }

    pub fn handle_event(&mut self, event: &Event) -> EventHandlingStatus {
        let activated = match event {
            Event::Key(key) => {
                self.focused
                    && key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            }
            Event::Mouse(mouse) => {
                mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && self
                        .hit_area
                        .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)))
            }
            _ => false,
        };
        if !activated {
            return EventHandlingStatus::NotConsumed;
        }
        self.activate();
        EventHandlingStatus::Consumed
    }
}

impl Widget for ActionButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.view().render(area, buf);
    }
}
