//! Line-mapping index between source lines and disassembly display lines
//!
//! A disassembly listing is opaque text, except that some lines start with a
//! bare integer: the source line the following instructions were emitted
//! for. Those lines are *block heads*. Each head opens a block that runs
//! until the line before the next head (or the end of the listing).
//!
//! A block keeps covering source lines until the next strictly greater
//! source line that has a head of its own. So with heads for lines 1 and 3,
//! selecting line 2 (a comment, say) still hits the block for line 1.
//!
//! ```text
//!   display   text                       block
//!   0         "  1  LOAD 0"             -> line 1, [0, 1], covers [1, 2]
//!   1         "     LOAD 1"
//!   2         "  3  ADD"                -> line 3, [2, 3], covers [3, inf)
//!   3         "     STORE x"
//! ```
//!
//! Heads may be emitted out of numeric order (loops, inlined code), and the
//! same source line may head several blocks. Blocks are sorted by source line
//! before coverage is computed and duplicates are never merged.

use crate::model::selection::SourceLineRange;
use crate::model::sentinel;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

fn block_head_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*(\d+)\s+").expect("block head pattern is valid"))
}

/// A contiguous run of display lines emitted for one source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisassemblyBlock {
    /// 1-based source line from the block head
    pub source_line: usize,
    /// First display line (the head itself), 0-based
    pub start_index: usize,
    /// Last display line, inclusive
    pub end_index: usize,
}

impl DisassemblyBlock {
    pub fn display_range(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// Number of display lines in the block (always at least 1)
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Parsed block structure of one disassembly listing
#[derive(Debug, Clone, Default)]
pub struct LineMapIndex {
    /// Blocks sorted by source line (stable, so duplicates keep scan order)
    blocks: Vec<DisassemblyBlock>,
    /// Last source line covered by `blocks[i]`; `None` is unbounded.
    /// Non-decreasing along `blocks`.
    coverage_end: Vec<Option<usize>>,
    /// Indices into `blocks`, ordered by display position
    by_display: Vec<usize>,
    line_count: usize,
}

impl LineMapIndex {
    /// An index that maps nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a listing. Sentinel or blank text yields an empty index.
    pub fn parse(text: &str) -> Self {
        if sentinel::is_no_mapping(text) {
            return Self::empty();
        }

        let lines: Vec<&str> = text.lines().collect();
        let line_count = lines.len();

        // Collect heads in scan order
        let mut heads: Vec<(usize, usize)> = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let Some(captures) = block_head_pattern().captures(line) else {
                continue;
            };
            match captures[1].parse::<usize>() {
                Ok(source_line) => heads.push((source_line, index)),
                Err(e) => {
                    tracing::debug!("Skipping block head at display line {}: {}", index, e);
                }
            }
        }

        let mut blocks: Vec<DisassemblyBlock> = heads
            .iter()
            .enumerate()
            .map(|(i, &(source_line, start_index))| {
                let end_index = heads
                    .get(i + 1)
                    .map(|&(_, next_start)| next_start - 1)
                    .unwrap_or(line_count - 1);
                DisassemblyBlock {
                    source_line,
                    start_index,
                    end_index,
                }
            })
            .collect();

        blocks.sort_by_key(|b| b.source_line);

        // Walk backwards remembering the closest strictly greater source line
        let mut coverage_end = vec![None; blocks.len()];
        let mut next_greater: Option<usize> = None;
        for i in (0..blocks.len()).rev() {
            if let Some(next) = blocks.get(i + 1) {
                if next.source_line > blocks[i].source_line {
                    next_greater = Some(next.source_line);
                }
            }
            coverage_end[i] = next_greater.map(|line| line - 1);
        }

        let mut by_display: Vec<usize> = (0..blocks.len()).collect();
        by_display.sort_by_key(|&i| blocks[i].start_index);

        tracing::debug!(
            "Indexed {} blocks over {} display lines",
            blocks.len(),
            line_count
        );

        Self {
            blocks,
            coverage_end,
            by_display,
            line_count,
        }
    }

    /// All blocks whose coverage intersects `selected`, in source line order
    pub fn blocks_for(&self, selected: SourceLineRange) -> Vec<DisassemblyBlock> {
        // Hits are contiguous: source_line <= selected.end, coverage_end >= selected.start
        let upper = self
            .blocks
            .partition_point(|b| b.source_line <= selected.end());
        let lower = self
            .coverage_end
            .partition_point(|end| matches!(end, Some(end) if *end < selected.start()));

        if lower >= upper {
            return Vec::new();
        }
        self.blocks[lower..upper].to_vec()
    }

    /// The source line whose block contains `display_index`, if any.
    /// Lines before the first block head belong to no block.
    pub fn source_line_at(&self, display_index: usize) -> Option<usize> {
        let pos = self
            .by_display
            .partition_point(|&i| self.blocks[i].start_index <= display_index);
        let block = &self.blocks[*self.by_display.get(pos.checked_sub(1)?)?];
        block
            .display_range()
            .contains(&display_index)
            .then_some(block.source_line)
    }

    /// Blocks sorted by source line
    pub fn blocks(&self) -> &[DisassemblyBlock] {
        &self.blocks
    }

    /// Coverage interval of `blocks()[i]` as `(first, last)`; `last == None`
    /// means the block covers to the end of the file.
    pub fn coverage(&self, i: usize) -> Option<(usize, Option<usize>)> {
        let block = self.blocks.get(i)?;
        Some((block.source_line, self.coverage_end[i]))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of display lines in the parsed listing (0 for sentinels)
    pub fn line_count(&self) -> usize {
        self.line_count
    }
}
