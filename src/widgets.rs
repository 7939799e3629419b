//! Clickable UI building blocks.
//!
//! Each component renders and registers its own click targets, so what the
//! player sees and what a tap hits never drift apart.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

/// One row of tabs with a tap target per tab.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let mut spans: Vec<Span> = Vec::new();
        let mut widths: Vec<(u16, u16)> = Vec::new();
        for (i, (label, style, action_id)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            let padded = format!(" {} ", label);
            widths.push((Line::from(padded.as_str()).width() as u16, action_id));
            spans.push(Span::styled(padded, style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        for (x, w, action_id) in tab_spans(&widths, sep_width, inner.width) {
            cs.add_click_target(Rect::new(inner.x + x, area.y, w, area.height.max(1)), action_id);
        }
    }
}

/// Horizontal `(offset, width, action)` spans for tabs laid out left to right.
/// Each tab owns its label and the separator after it; the last tab runs to
/// the edge so the whole row is tappable.
fn tab_spans(widths: &[(u16, u16)], sep_width: u16, total_width: u16) -> Vec<(u16, u16, u16)> {
    let mut spans = Vec::with_capacity(widths.len());
    let mut x: u16 = 0;
    for (i, &(w, action_id)) in widths.iter().enumerate() {
        if x >= total_width {
            break;
        }
        let own = if i + 1 == widths.len() {
            total_width - x
        } else {
            (w + sep_width).min(total_width - x)
        };
        spans.push((x, own, action_id));
        x += own;
    }
    spans
}

/// Lines paired with click actions; targets follow their line wherever it
/// ends up in the list.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for each clickable line. `top_offset` and
    /// `bottom_offset` are the border rows around the content; lines past
    /// the bottom are clipped. One logical line is one row (no wrapping).
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top_offset: u16, bottom_offset: u16) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row < content_end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}
