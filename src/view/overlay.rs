use std::ops::RangeInclusive;

/// A highlight over a run of display lines in the bytecode panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOverlay {
    /// First highlighted display line (0-based)
    pub start_index: usize,

    /// Last highlighted display line, inclusive
    pub end_index: usize,

    /// Source line the highlighted block was emitted for
    pub source_line: usize,
}

impl LineOverlay {
    pub fn key(&self) -> (usize, usize) {
        (self.start_index, self.end_index)
    }

    pub fn lines(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// Check if this highlight covers a display line
    pub fn contains(&self, line: usize) -> bool {
        self.lines().contains(&line)
    }

    /// Check if this highlight overlaps the half-open line range `[start, end)`
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start_index < end && start <= self.end_index
    }
}

/// The highlights currently applied to the panel.
///
/// Keyed by `(start_index, end_index)`: adding the same range twice keeps one
/// highlight. Kept sorted by start line for rendering.
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    highlights: Vec<LineOverlay>,
}

impl HighlightSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self {
            highlights: Vec::new(),
        }
    }

    /// Add a highlight. Returns false if the range was already highlighted.
    pub fn add(&mut self, start_index: usize, end_index: usize, source_line: usize) -> bool {
        let key = (start_index, end_index);
        let pos = self.highlights.partition_point(|h| h.key() < key);
        if self.highlights.get(pos).is_some_and(|h| h.key() == key) {
            return false;
        }
        self.highlights.insert(
            pos,
            LineOverlay {
                start_index,
                end_index,
                source_line,
            },
        );
        true
    }

    /// Remove every highlight
    pub fn clear(&mut self) {
        self.highlights.clear();
    }

    /// The highlight covering a display line, if any
    pub fn at_line(&self, line: usize) -> Option<&LineOverlay> {
        self.highlights.iter().find(|h| h.contains(line))
    }

    /// Highlights overlapping the visible window `[start, end)`
    pub fn in_window(&self, start: usize, end: usize) -> Vec<&LineOverlay> {
        self.highlights
            .iter()
            .filter(|h| h.overlaps(start, end))
            .collect()
    }

    /// All `(start_index, end_index)` keys, in display order
    pub fn keys(&self) -> Vec<(usize, usize)> {
        self.highlights.iter().map(LineOverlay::key).collect()
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }
}
