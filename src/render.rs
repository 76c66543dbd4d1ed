//! Paints a [`Node`] tree into a ratatui [`Buffer`].

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Widget},
};
use tui_input::Input;

use crate::{
    theme,
    view::{Direction, FieldNode, Node},
    widget::spinner,
};

/// Per-frame values owned by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCx {
    /// Animation clock, advanced by the host on every tick.
    pub tick: u64,
    /// Progress of the enclosing transition, `1.0` when settled.
    pub progress: f32,
}

impl Default for RenderCx {
    fn default() -> Self {
        Self {
            tick: 0,
            progress: 1.0,
        }
    }
}

impl RenderCx {
    pub fn at_tick(tick: u64) -> Self {
        Self {
            tick,
            ..Default::default()
        }
    }
}

pub fn paint(node: &Node, area: Rect, buf: &mut Buffer, cx: &RenderCx) {
    let area = area.intersection(buf.area);
    if area.is_empty() {
        return;
    }
    match node {
        Node::Empty => {}
        Node::Text(text) => {
            Paragraph::new(text.content.as_str())
                .style(text.style)
                .alignment(text.alignment)
                .render(area, buf);
        }
        Node::Spinner(spinner) => spinner::paint(spinner, area, buf, cx.tick),
        Node::Field(field) => paint_field(field, area, buf),
        Node::Barrier(style) => {
            // Before the midpoint of a fade only the dimming is applied.
            let style = if cx.progress < 0.5 {
                Style::new().add_modifier(style.add_modifier)
            } else {
                *style
            };
            buf.set_style(area, style);
        }
        Node::Surface { surface, child } => {
            let mut block = Block::new()
                .style(surface.style)
                .padding(Padding::horizontal(surface.padding));
            if let Some(border_type) = surface.border {
                block = block
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(surface.border_style);
            }
            let inner = block.inner(area);
            block.render(area, buf);
            paint(child, inner, buf, cx);
        }
        Node::Frame {
            width,
            height,
            child,
        } => {
            let width = (*width).min(area.width);
            let height = (*height).min(area.height);
            let framed = Rect::new(
                area.x + (area.width - width) / 2,
                area.y + (area.height - height) / 2,
                width,
                height,
            );
            paint(child, framed, buf, cx);
        }
        Node::Scale { factor, child } => {
            paint(child, scale_rect(area, *factor), buf, cx);
        }
        Node::Layers(children) => {
            for child in children {
                paint(child, area, buf, cx);
            }
        }
        Node::Stack {
            direction,
            spacing,
            children,
        } => {
            let layout = match direction {
                Direction::Vertical => {
                    Layout::vertical(children.iter().map(|c| Constraint::Length(c.height())))
                }
                Direction::Horizontal => {
                    Layout::horizontal(children.iter().map(|c| Constraint::Length(c.width())))
                }
            };
            let areas = layout.spacing(*spacing).split(area);
            for (child, child_area) in children.iter().zip(areas.iter()) {
                paint(child, *child_area, buf, cx);
            }
        }
        Node::Transition { child, .. } => paint(child, area, buf, cx),
    }
}

fn scale_rect(area: Rect, factor: f32) -> Rect {
    let width = (f32::from(area.width) * factor).round() as i32;
    let height = (f32::from(area.height) * factor).round() as i32;
    let x = i32::from(area.x) + (i32::from(area.width) - width) / 2;
    let y = i32::from(area.y) + (i32::from(area.height) - height) / 2;
    let clamp = |v: i32| v.clamp(0, i32::from(u16::MAX)) as u16;
    Rect::new(clamp(x), clamp(y), clamp(width), clamp(height))
}

fn paint_field(field: &FieldNode, area: Rect, buf: &mut Buffer) {
    let mut block = Block::bordered()
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(field.border_style);
    if let Some(tag) = field.tag {
        block = block.title_bottom(Line::from(tag).right_aligned());
    }
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.is_empty() {
        return;
    }

    if field.value.is_empty() {
        Paragraph::new(field.placeholder.as_str())
            .style(Style::new().fg(theme::PLACEHOLDER))
            .render(inner, buf);
        if field.cursor.is_some() {
            mark_cursor(buf, inner.x, inner.y);
        }
        return;
    }

    let input = Input::new(field.value.clone()).with_cursor(field.cursor.unwrap_or(0));
    let width = inner.width as usize;
    let scroll = if field.cursor.is_some() {
        input.visual_scroll(width)
    } else {
        0
    };
    Paragraph::new(input.value())
        .scroll((0, scroll as u16))
        .render(inner, buf);

    if field.cursor.is_some() {
        let offset = input.visual_cursor().max(scroll) - scroll;
        let x = inner.x + (offset as u16).min(inner.width - 1);
        mark_cursor(buf, x, inner.y);
    }
}

fn mark_cursor(buf: &mut Buffer, x: u16, y: u16) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.modifier.insert(Modifier::REVERSED);
    }
}

/// A tree together with the frame values it should be painted with.
pub struct Painted<'a> {
    node: &'a Node,
    cx: RenderCx,
}

impl Node {
    pub fn painted(&self, cx: RenderCx) -> Painted<'_> {
        Painted { node: self, cx }
    }
}

impl Widget for Painted<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        paint(self.node, area, buf, &self.cx);
    }
}

impl Widget for &Node {
    fn render(self, area: Rect, buf: &mut Buffer) {
        paint(self, area, buf, &RenderCx::default());
    }
}

impl Widget for Node {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self).render(area, buf);
    }
}
