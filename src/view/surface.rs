//! The renderable panel surface
//!
//! Holds what the bytecode panel shows: the listing, the applied highlights
//! and the scroll position. Renders as a ratatui widget, or as plain text
//! lines for non-terminal output.

use crate::view::overlay::HighlightSet;
use crate::view::viewport::PanelViewport;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

/// Gutter marker for highlighted lines in plain output
pub const PLAIN_MARKER: &str = "> ";
const PLAIN_BLANK: &str = "  ";

#[derive(Debug, Clone)]
pub struct PanelSurface {
    text: String,
    lines: Vec<String>,
    highlights: HighlightSet,
    viewport: PanelViewport,
    highlight_color: Color,
}

impl PanelSurface {
    pub fn new(height: usize, highlight_color: Color) -> Self {
        Self {
            text: String::new(),
            lines: Vec::new(),
            highlights: HighlightSet::new(),
            viewport: PanelViewport::new(height),
            highlight_color,
        }
    }

    /// Replace the whole text. Highlights are dropped and the view returns
    /// to the top.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.lines = text.lines().map(str::to_string).collect();
        self.highlights.clear();
        self.viewport.reset(self.lines.len());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn highlights_mut(&mut self) -> &mut HighlightSet {
        &mut self.highlights
    }

    pub fn viewport(&self) -> &PanelViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut PanelViewport {
        &mut self.viewport
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().bg(self.highlight_color)
    }

    /// Visible lines as plain text, highlighted ones marked in the gutter
    pub fn plain_lines(&self) -> Vec<(bool, String)> {
        self.viewport
            .visible_range()
            .map(|i| {
                let highlighted = self.highlights.at_line(i).is_some();
                let marker = if highlighted { PLAIN_MARKER } else { PLAIN_BLANK };
                (highlighted, format!("{marker}{}", self.lines[i]))
            })
            .collect()
    }
}

impl Widget for &PanelSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = self.viewport.visible_range();
        let highlighted = self.highlights.in_window(visible.start, visible.end);
        let style = self.highlight_style();

        for (row, line_index) in visible.take(area.height as usize).enumerate() {
            let y = area.y + row as u16;
            let is_highlighted = highlighted.iter().any(|h| h.contains(line_index));
            if is_highlighted {
                buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            }
            let line_style = if is_highlighted { style } else { Style::default() };
            buf.set_stringn(
                area.x,
                y,
                &self.lines[line_index],
                area.width as usize,
                line_style,
            );
        }
    }
}
