//! Render tree.
//!
//! Widgets describe what to draw as a tree of [`Node`]s. The tree is plain
//! data: it can be inspected, cloned and compared, and is painted by
//! [`crate::render`]. An absent branch is never represented by a hidden node,
//! it is simply not in the tree.

use std::time::Duration;

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::BorderType,
};
use unicode_width::UnicodeWidthStr;

use crate::widget::spinner::SpinnerKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// One line of styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub content: String,
    pub style: Style,
    pub alignment: Alignment,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
            alignment: Alignment::Left,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// An indeterminate progress indicator, animated by the host's tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinnerNode {
    pub kind: SpinnerKind,
    pub color: Color,
}

impl SpinnerNode {
    pub fn new(color: Color) -> Self {
        Self {
            kind: SpinnerKind::default(),
            color,
        }
    }

    pub fn kind(mut self, kind: SpinnerKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A single-line editable field.
///
/// `cursor` is `Some` only while the field has focus.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub value: String,
    pub placeholder: String,
    pub cursor: Option<usize>,
    /// Short hint drawn in the bottom border, e.g. `@` for e-mail input.
    pub tag: Option<&'static str>,
    pub border_style: Style,
}

/// Background, border and padding around a child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub style: Style,
    pub border: Option<BorderType>,
    pub border_style: Style,
    pub padding: u16,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            style: Style::default(),
            border: None,
            border_style: Style::default(),
            padding: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `0..=1` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionKind {
    #[default]
    Fade,
}

/// How the host should animate a subtree appearing or disappearing.
///
/// The widget only declares it; playing it is up to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub easing: Easing,
    pub duration: Duration,
}

impl Transition {
    pub fn fade(duration: Duration) -> Self {
        Self {
            kind: TransitionKind::Fade,
            easing: Easing::EaseInOut,
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Empty,
    /// Children laid out one after another, each at its intrinsic size.
    Stack {
        direction: Direction,
        spacing: u16,
        children: Vec<Node>,
    },
    /// Children painted on top of each other over the same area.
    Layers(Vec<Node>),
    Surface {
        surface: Surface,
        child: Box<Node>,
    },
    /// A fixed-size box centered in the available area.
    Frame {
        width: u16,
        height: u16,
        child: Box<Node>,
    },
    /// Grows (or shrinks) the child's area around its center.
    Scale {
        factor: f32,
        child: Box<Node>,
    },
    Text(TextNode),
    Spinner(SpinnerNode),
    Field(FieldNode),
    /// Restyles every cell of the area without clearing what is below.
    Barrier(Style),
    Transition {
        transition: Transition,
        child: Box<Node>,
    },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(TextNode::new(content))
    }

    pub fn vstack(children: Vec<Node>) -> Self {
        Node::Stack {
            direction: Direction::Vertical,
            spacing: 0,
            children,
        }
    }

    pub fn hstack(children: Vec<Node>) -> Self {
        Node::Stack {
            direction: Direction::Horizontal,
            spacing: 1,
            children,
        }
    }

    pub fn frame(width: u16, height: u16, child: Node) -> Self {
        Node::Frame {
            width,
            height,
            child: Box::new(child),
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Node::Scale {
            factor,
            child: Box::new(self),
        }
    }

    pub fn surface(self, surface: Surface) -> Self {
        Node::Surface {
            surface,
            child: Box::new(self),
        }
    }

    /// Rows the node needs when laid out in a vertical stack.
    pub fn height(&self) -> u16 {
        match self {
            Node::Empty | Node::Barrier(_) => 0,
            Node::Text(text) => text.content.lines().count().max(1) as u16,
            Node::Spinner(_) => 1,
            Node::Field(_) => 3,
            Node::Frame { height, .. } => *height,
            Node::Scale { child, .. } | Node::Transition { child, .. } => child.height(),
            Node::Surface { surface, child } => {
                child.height() + if surface.border.is_some() { 2 } else { 0 }
            }
            Node::Layers(children) => children.iter().map(Node::height).max().unwrap_or(0),
            Node::Stack {
                direction: Direction::Vertical,
                spacing,
                children,
            } => {
                let gaps = children.len().saturating_sub(1) as u16 * spacing;
                children.iter().map(Node::height).sum::<u16>() + gaps
            }
            Node::Stack {
                direction: Direction::Horizontal,
                children,
                ..
            } => children.iter().map(Node::height).max().unwrap_or(0),
        }
    }

    /// Columns the node needs when laid out in a horizontal stack.
    pub fn width(&self) -> u16 {
        match self {
            Node::Empty | Node::Barrier(_) => 0,
            Node::Text(text) => text
                .content
                .lines()
                .map(UnicodeWidthStr::width)
                .max()
                .unwrap_or(0) as u16,
            Node::Spinner(_) => 1,
            Node::Field(field) => {
                let shown = if field.value.is_empty() {
                    &field.placeholder
                } else {
                    &field.value
                };
                UnicodeWidthStr::width(shown.as_str()) as u16 + 3
            }
            Node::Frame { width, .. } => *width,
            Node::Scale { child, .. } | Node::Transition { child, .. } => child.width(),
            Node::Surface { surface, child } => {
                let border = if surface.border.is_some() { 2 } else { 0 };
                child.width() + border + surface.padding * 2
            }
            Node::Layers(children) => children.iter().map(Node::width).max().unwrap_or(0),
            Node::Stack {
                direction: Direction::Horizontal,
                spacing,
                children,
            } => {
                let gaps = children.len().saturating_sub(1) as u16 * spacing;
                children.iter().map(Node::width).sum::<u16>() + gaps
            }
            Node::Stack {
                direction: Direction::Vertical,
                children,
                ..
            } => children.iter().map(Node::width).max().unwrap_or(0),
        }
    }

    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Stack { children, .. } | Node::Layers(children) => children.iter().collect(),
            Node::Surface { child, .. }
            | Node::Frame { child, .. }
            | Node::Scale { child, .. }
            | Node::Transition { child, .. } => vec![child.as_ref()],
            Node::Empty
            | Node::Text(_)
            | Node::Spinner(_)
            | Node::Field(_)
            | Node::Barrier(_) => Vec::new(),
        }
    }

    /// Pre-order traversal of the tree, starting with `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    pub fn count(&self, predicate: impl Fn(&Node) -> bool) -> usize {
        self.walk().filter(|node| predicate(node)).count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextNode> {
        self.walk().filter_map(|node| match node {
            Node::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn spinners(&self) -> impl Iterator<Item = &SpinnerNode> {
        self.walk().filter_map(|node| match node {
            Node::Spinner(spinner) => Some(spinner),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldNode> {
        self.walk().filter_map(|node| match node {
            Node::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn find_text(&self, content: &str) -> Option<&TextNode> {
        self.texts().find(|text| text.content == content)
    }

    /// The first transition declared in the tree, if any.
    pub fn transition(&self) -> Option<Transition> {
        self.walk().find_map(|node| match node {
            Node::Transition { transition, .. } => Some(*transition),
            _ => None,
        })
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}
