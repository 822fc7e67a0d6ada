use crate::model::line_map::DisassemblyBlock;

/// The viewport - which display lines of the panel are visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelViewport {
    /// First visible display line
    pub top_line: usize,

    /// Number of visible rows
    pub height: usize,

    /// Total display lines in the panel text
    line_count: usize,
}

impl PanelViewport {
    /// Create a new viewport at the top of an empty panel
    pub fn new(height: usize) -> Self {
        Self {
            top_line: 0,
            height,
            line_count: 0,
        }
    }

    /// Update panel dimensions, keeping the scroll position valid
    pub fn resize(&mut self, height: usize) {
        self.height = height;
        self.apply_scroll_limit();
    }

    /// New panel text: back to the top
    pub fn reset(&mut self, line_count: usize) {
        self.line_count = line_count;
        self.top_line = 0;
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Visible display lines as a half-open range
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = self.top_line.saturating_add(self.height).min(self.line_count);
        self.top_line.min(end)..end
    }

    /// Scroll so that `line` is the first visible line (clamped)
    pub fn scroll_to(&mut self, line: usize) {
        self.top_line = line;
        self.apply_scroll_limit();
    }

    /// Prevent scrolling past the end: the last line stays at the bottom
    /// unless the text is shorter than the viewport
    pub fn apply_scroll_limit(&mut self) {
        let max_top = self.line_count.saturating_sub(self.height);
        if self.top_line > max_top {
            self.top_line = max_top;
        }
    }

    /// Where `top_line` should go to reveal `block`.
    ///
    /// A block taller than the viewport starts at the top; a shorter one is
    /// centered on its midpoint line.
    pub fn reveal_target(&self, block: &DisassemblyBlock) -> usize {
        if block.len() > self.height {
            block.start_index
        } else {
            let middle = block.start_index + (block.end_index - block.start_index) / 2;
            middle.saturating_sub(self.height / 2)
        }
    }

    /// Scroll so `block` is revealed
    pub fn reveal(&mut self, block: &DisassemblyBlock) {
        let target = self.reveal_target(block);
        self.scroll_to(target);
    }
}
