use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use super::spinner::SpinnerKind;
use crate::{
    theme,
    view::{Node, SpinnerNode, Transition},
};

/// Builds the render tree of a custom spinner.
pub type SpinnerFactory<'a> = Box<dyn Fn() -> Node + 'a>;

/// A full-screen barrier with a centered spinner.
///
/// Hidden overlays produce no tree at all, so nothing underneath is touched.
pub struct LoadingOverlay<'a> {
    visible: bool,
    background: Style,
    spinner_size: u16,
    spinner_color: Color,
    custom_spinner: Option<SpinnerFactory<'a>>,
}

impl<'a> LoadingOverlay<'a> {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            background: theme::overlay_barrier(),
            spinner_size: theme::SPINNER_SIZE,
            spinner_color: theme::SPINNER_COLOR,
            custom_spinner: None,
        }
    }

    pub fn background(mut self, style: Style) -> Self {
        self.background = style;
        self
    }

    /// Spinner size in logical points.
    pub fn spinner_size(mut self, size: u16) -> Self {
        self.spinner_size = size;
        self
    }

    pub fn spinner_color(mut self, color: Color) -> Self {
        self.spinner_color = color;
        self
    }

    /// Replaces the default spinner. The factory runs once per render and its
    /// output is framed at the spinner size.
    pub fn custom_spinner(mut self, factory: impl Fn() -> Node + 'a) -> Self {
        self.custom_spinner = Some(Box::new(factory));
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn view(&self) -> Option<Node> {
        if !self.visible {
            return None;
        }
        let (width, height) = theme::points_to_cells(self.spinner_size);
        let spinner = match &self.custom_spinner {
            Some(factory) => factory(),
            None => Node::Spinner(SpinnerNode::new(self.spinner_color).kind(SpinnerKind::Ring))
                .scaled(theme::SPINNER_SCALE),
        };
        Some(Node::Transition {
            transition: Transition::fade(theme::FADE_DURATION),
            child: Box::new(Node::Layers(vec![
                Node::Barrier(self.background),
                Node::frame(width, height, spinner),
            ])),
        })
    }
}

impl Widget for LoadingOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(tree) = self.view() {
            tree.render(area, buf);
        }
    }
}
