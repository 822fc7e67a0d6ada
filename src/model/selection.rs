//! Source line ranges selected in the editor

use std::ops::RangeInclusive;

/// Inclusive interval of 1-based source lines currently selected.
///
/// A plain cursor is the single-line range `[n, n]`. `start <= end` always
/// holds; constructors normalize reversed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLineRange {
    start: usize,
    end: usize,
}

impl SourceLineRange {
    /// Closed interval `[a, b]`, in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A single cursor line
    pub fn line(line: usize) -> Self {
        Self::new(line, line)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

impl From<RangeInclusive<usize>> for SourceLineRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

/// Caret and selection state reported by a host for one editor.
///
/// Both are 1-based source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSelection {
    pub caret_line: usize,
    pub selection: Option<RangeInclusive<usize>>,
}

impl EditorSelection {
    pub fn caret(line: usize) -> Self {
        Self {
            caret_line: line,
            selection: None,
        }
    }

    pub fn selecting(start: usize, end: usize, caret_line: usize) -> Self {
        Self {
            caret_line,
            selection: Some(start..=end),
        }
    }

    /// The lines to map: the selection if present, else the caret line
    pub fn lines(&self) -> SourceLineRange {
        match &self.selection {
            Some(range) => range.clone().into(),
            None => SourceLineRange::line(self.caret_line),
        }
    }
}
