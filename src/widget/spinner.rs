//! Indeterminate spinners.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use strum::Display;
use unicode_width::UnicodeWidthStr;

use crate::view::SpinnerNode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SpinnerKind {
    #[default]
    Braille,
    Line,
    Hourglass,
    /// A dot running around the border of its area. Falls back to
    /// [`SpinnerKind::Braille`] when the area is smaller than 3x3.
    Ring,
}

const BRAILLE: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LINE: &[&str] = &["-", "\\", "|", "/"];
const HOURGLASS: &[&str] = &["⧗", "⧖"];

impl SpinnerKind {
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerKind::Braille | SpinnerKind::Ring => BRAILLE,
            SpinnerKind::Line => LINE,
            SpinnerKind::Hourglass => HOURGLASS,
        }
    }

    pub fn frame(self, tick: u64) -> &'static str {
        let frames = self.frames();
        frames[(tick % frames.len() as u64) as usize]
    }
}

pub(crate) fn paint(spinner: &SpinnerNode, area: Rect, buf: &mut Buffer, tick: u64) {
    if spinner.kind == SpinnerKind::Ring && area.width >= 3 && area.height >= 3 {
        paint_ring(spinner, area, buf, tick);
        return;
    }
    let glyph = spinner.kind.frame(tick);
    let width = UnicodeWidthStr::width(glyph) as u16;
    if width > area.width {
        return;
    }
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - 1) / 2;
    buf.set_string(x, y, glyph, Style::new().fg(spinner.color));
}

/// Cells on the border of `area`, clockwise from the top-left corner.
fn perimeter(area: Rect) -> Vec<(u16, u16)> {
    let (left, top) = (area.x, area.y);
    let (right, bottom) = (area.right() - 1, area.bottom() - 1);
    let mut cells = Vec::with_capacity(2 * (area.width + area.height) as usize);
    cells.extend((left..=right).map(|x| (x, top)));
    cells.extend((top + 1..=bottom).map(|y| (right, y)));
    cells.extend((left..right).rev().map(|x| (x, bottom)));
    cells.extend((top + 1..bottom).rev().map(|y| (left, y)));
    cells
}

fn paint_ring(spinner: &SpinnerNode, area: Rect, buf: &mut Buffer, tick: u64) {
    let cells = perimeter(area);
    let len = cells.len() as u64;
    let head = (tick % len) as usize;
    let base = Style::new().fg(spinner.color);
    for (index, position) in cells.into_iter().enumerate() {
        let behind = (head + len as usize - index) % len as usize;
        let (symbol, style) = match behind {
            0 => ("●", base.add_modifier(Modifier::BOLD)),
            1 | 2 => ("•", base),
            _ => ("·", base.add_modifier(Modifier::DIM)),
        };
        if let Some(cell) = buf.cell_mut(position) {
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use ratatui::style::Color;

    use super::*;
    use crate::{RenderCx, render::tests::draw, view::Node};

    #[test]
    fn frames_cycle_with_tick() {
        assert_eq!(SpinnerKind::Line.frame(0), "-");
        assert_eq!(SpinnerKind::Line.frame(5), "\\");
        assert_eq!(SpinnerKind::Braille.frame(10), SpinnerKind::Braille.frame(0));
    }

    #[test]
    fn perimeter_is_clockwise() {
        let cells = perimeter(Rect::new(0, 0, 3, 3));
        assert_eq!(
            cells,
            [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)]
        );
    }

    #[test]
    fn single_glyph_is_centered() {
        let spinner = Node::Spinner(SpinnerNode::new(Color::Green).kind(SpinnerKind::Line));
        let terminal = draw(5, 3, spinner.painted(RenderCx::at_tick(2)));
        assert_snapshot!(terminal.backend(), @r#"
        "     "
        "  |  "
        "     "
        "#);
        assert_eq!(terminal.backend().buffer()[(2, 1)].fg, Color::Green);
    }

    #[test]
    fn ring_has_one_head() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 3));
        let spinner = SpinnerNode::new(Color::White).kind(SpinnerKind::Ring);
        paint(&spinner, buf.area, &mut buf, 3);
        let heads = buf.content().iter().filter(|c| c.symbol() == "●").count();
        assert_eq!(heads, 1);
        assert_eq!(buf[(3, 0)].symbol(), "●");
        assert_eq!(buf[(2, 0)].symbol(), "•");
        assert_eq!(buf[(1, 0)].symbol(), "•");
        assert_eq!(buf[(0, 0)].symbol(), "·");
        // the center is left alone
        assert_eq!(buf[(2, 1)].symbol(), " ");
    }

    #[test]
    fn ring_runs_around_the_border() {
        let spinner = Node::Spinner(SpinnerNode::new(Color::White).kind(SpinnerKind::Ring));
        let terminal = draw(6, 3, spinner.painted(RenderCx::at_tick(3)));
        assert_snapshot!(terminal.backend(), @r#"
        "·••●··"
        "·    ·"
        "······"
        "#);
    }

    #[test]
    fn small_ring_falls_back_to_glyph() {
        let spinner = Node::Spinner(SpinnerNode::new(Color::White).kind(SpinnerKind::Ring));
        let terminal = draw(4, 1, spinner.painted(RenderCx::default()));
        assert_snapshot!(terminal.backend(), @r#"
        " ⠋  "
        "#);
    }
}
