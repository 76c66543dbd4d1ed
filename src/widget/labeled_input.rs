use crossterm::event::{Event, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};
use strum::Display;
use tui_input::{Input, InputRequest, backend::crossterm::EventHandler};

use crate::{
    theme,
    view::{FieldNode, Node, TextNode},
};

/// The kind of text a field expects.
///
/// Terminals have no on-screen keyboard to switch, so the variant is only
/// shown as a tag on the field. It never filters what is typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum KeyboardVariant {
    #[default]
    Default,
    Ascii,
    Number,
    Decimal,
    Phone,
    Email,
    Url,
}

impl KeyboardVariant {
    pub fn tag(self) -> Option<&'static str> {
        match self {
            KeyboardVariant::Default => None,
            KeyboardVariant::Ascii => Some("abc"),
            KeyboardVariant::Number => Some("123"),
            KeyboardVariant::Decimal => Some("1.5"),
            KeyboardVariant::Phone => Some("tel"),
            KeyboardVariant::Email => Some("@"),
            KeyboardVariant::Url => Some("url"),
        }
    }
}

/// The value a field should hold after an edit.
///
/// The field never writes to its caller; the caller stores this and passes
/// it back on the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEdit {
    pub value: String,
    pub cursor: usize,
}

/// A caption, a single-line field and an optional error line.
pub struct LabeledInput<'a> {
    caption: String,
    value: &'a str,
    placeholder: String,
    error: Option<String>,
    keyboard: KeyboardVariant,
    cursor: Option<usize>,
}

impl<'a> LabeledInput<'a> {
    pub fn new(caption: impl Into<String>, value: &'a str) -> Self {
        Self {
            caption: caption.into(),
            value,
            placeholder: String::new(),
            error: None,
            keyboard: KeyboardVariant::default(),
            cursor: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// A message computed by the caller. `None` removes the error line.
    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn keyboard(mut self, keyboard: KeyboardVariant) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Cursor position (in chars) while focused, `None` when not focused.
    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn is_focused(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn view(&self) -> Node {
        let caption = TextNode::new(self.caption.as_str()).style(Style::new().fg(theme::CAPTION));
        let border_style = if self.is_focused() {
            Style::new().fg(theme::FOCUS)
        } else {
            Style::default()
        };
        let field = FieldNode {
            value: self.value.to_string(),
            placeholder: self.placeholder.clone(),
            cursor: self.cursor,
            tag: self.keyboard.tag(),
            border_style,
        };

        let mut children = vec![Node::Text(caption), Node::Field(field)];
        if let Some(error) = &self.error {
            children.push(Node::Text(
                TextNode::new(error.as_str()).style(Style::new().fg(theme::ERROR)),
            ));
        }
        Node::vstack(children)
    }

    /// Applies a key press or paste to the value, if focused.
    ///
    /// The field is single-line: a paste keeps only its first line.
    /// Returns `None` when nothing changed.
    pub fn handle_event(&self, event: &Event) -> Option<InputEdit> {
        let cursor = self.cursor?;
        let mut input = Input::new(self.value.to_string()).with_cursor(cursor);
        let changed = match event {
            Event::Paste(text) => first_line(text).chars().fold(None, |changed, c| {
                input.handle(InputRequest::InsertChar(c)).or(changed)
            }),
            Event::Key(key) if key.kind == KeyEventKind::Press => input.handle_event(event),
            _ => None,
        };
        changed.map(|_| InputEdit {
            value: input.value().to_string(),
            cursor: input.cursor(),
        })
    }

    /// Replaces the whole value with `text`, unchanged.
    pub fn edit(&self, text: &str) -> InputEdit {
        InputEdit {
            value: text.to_string(),
            cursor: text.chars().count(),
        }
    }
}

fn first_line(text: &str) -> &str {
    text.split(['\n', '\r']).next().unwrap_or_default()
}

impl Widget for LabeledInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.view().render(area, buf);
    }
}
