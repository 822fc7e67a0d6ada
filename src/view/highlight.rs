//! Highlight controller
//!
//! Owns the bytecode panel surface and keeps its highlights in step with the
//! source selection. Every application replaces the previous highlights
//! wholesale; nothing accumulates across events.
//!
//! Scrolling is deferred: `scroll_to_reveal` only posts a request, and
//! `settle` (called once layout has settled) carries it out. Each `clear`
//! bumps a generation counter, so a request posted before a newer clear or
//! apply is dropped instead of scrolling to an outdated block.

use crate::model::line_map::{DisassemblyBlock, LineMapIndex};
use crate::model::selection::SourceLineRange;
use crate::view::surface::PanelSurface;
use ratatui::style::Color;

/// A scroll waiting for the next `settle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScrollRequest {
    generation: u64,
    block: DisassemblyBlock,
}

pub struct HighlightController {
    surface: PanelSurface,
    index: LineMapIndex,
    generation: u64,
    pending_scroll: Option<ScrollRequest>,
    /// Whether interactive applications post a scroll
    pub scroll_to_highlight: bool,
}

impl HighlightController {
    pub fn new(height: usize, highlight_color: Color) -> Self {
        Self {
            surface: PanelSurface::new(height, highlight_color),
            index: LineMapIndex::empty(),
            generation: 0,
            pending_scroll: None,
            scroll_to_highlight: true,
        }
    }

    /// Replace the panel text and rebuild the line map
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.surface.set_text(text);
        self.index = LineMapIndex::parse(text);
    }

    /// Remove every highlight and cancel any pending scroll. Idempotent.
    pub fn clear(&mut self) {
        self.surface.highlights_mut().clear();
        self.pending_scroll = None;
        self.generation += 1;
    }

    /// Replace the highlights with those for `selected`. Returns the blocks
    /// that were highlighted.
    pub fn apply_for_selection(&mut self, selected: SourceLineRange) -> Vec<DisassemblyBlock> {
        self.clear();
        let blocks = self.index.blocks_for(selected);
        let highlights = self.surface.highlights_mut();
        for block in &blocks {
            highlights.add(block.start_index, block.end_index, block.source_line);
        }
        tracing::debug!(
            "Highlighted {} block(s) for source lines {}..={}",
            blocks.len(),
            selected.start(),
            selected.end()
        );
        blocks
    }

    /// Apply for an interactive event: highlight, then post a scroll to the
    /// first hit block when scrolling is enabled
    pub fn apply_interactive(&mut self, selected: SourceLineRange) -> Vec<DisassemblyBlock> {
        let blocks = self.apply_for_selection(selected);
        if self.scroll_to_highlight {
            if let Some(first) = blocks.first() {
                self.scroll_to_reveal(*first);
            }
        }
        blocks
    }

    /// Post a deferred scroll revealing `block`; replaces any earlier request
    pub fn scroll_to_reveal(&mut self, block: DisassemblyBlock) {
        self.pending_scroll = Some(ScrollRequest {
            generation: self.generation,
            block,
        });
    }

    /// Run the pending scroll if it is still current. Returns true if the
    /// viewport moved.
    pub fn settle(&mut self) -> bool {
        let Some(request) = self.pending_scroll.take() else {
            return false;
        };
        if request.generation != self.generation {
            tracing::debug!("Dropping stale scroll request");
            return false;
        }
        let before = self.surface.viewport().top_line;
        self.surface.viewport_mut().reveal(&request.block);
        self.surface.viewport().top_line != before
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.pending_scroll.is_some()
    }

    pub fn surface(&self) -> &PanelSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PanelSurface {
        &mut self.surface
    }

    pub fn index(&self) -> &LineMapIndex {
        &self.index
    }

    /// Currently highlighted `(start_index, end_index)` pairs
    pub fn highlighted(&self) -> Vec<(usize, usize)> {
        self.surface.highlights().keys()
    }
}
