use std::ops::{Deref, DerefMut};

use formkit::theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use super::key_events::KeyEvent;

/// One "what it does: which key" pair in the footer.
#[derive(Debug, Clone)]
pub(crate) struct HelpEntry {
    key: KeyEvent,
    desc: String,
}

impl HelpEntry {
    pub(crate) fn new<T: Into<String>, K: Into<KeyEvent>>(event: K, desc: T) -> Self {
        Self {
            key: event.into(),
            desc: desc.into(),
        }
    }

    pub(crate) fn key(&self) -> String {
        self.key.to_string()
    }

    pub(crate) fn desc(&self) -> &str {
        &self.desc
    }

    fn spans(&self) -> [Span<'_>; 2] {
        [
            Span::styled(format!("{}: ", self.desc), Style::new().fg(theme::CAPTION)),
            Span::styled(
                self.key(),
                Style::new().fg(theme::FOCUS).add_modifier(Modifier::BOLD),
            ),
        ]
    }
}

impl std::fmt::Display for HelpEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.desc(), self.key())
    }
}

#[derive(Default, Clone, Debug)]
pub(crate) struct HelpMsg {
    entries: Vec<HelpEntry>,
}

impl From<Vec<HelpEntry>> for HelpMsg {
    fn from(entries: Vec<HelpEntry>) -> Self {
        Self { entries }
    }
}

impl HelpMsg {
    fn line(&self) -> Line<'_> {
        let mut spans = Vec::with_capacity(self.entries.len() * 3);
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.extend(entry.spans());
        }
        Line::from(spans)
    }

    pub(crate) fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.line()).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(paragraph, area);
    }
}

impl Deref for HelpMsg {
    type Target = Vec<HelpEntry>;

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl DerefMut for HelpMsg {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entries
    }
}

impl std::fmt::Display for HelpMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
