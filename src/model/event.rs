use crate::model::selection::SourceLineRange;
use std::path::PathBuf;

/// Unique identifier for a source editor instance in the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(pub usize);

/// Unique identifier for a project (one bytecode panel per project)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Handle for one listener registration with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Interactive events a source editor delivers to its listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The selection changed; `lines` is the new selected line span
    SelectionChanged {
        editor: EditorId,
        lines: SourceLineRange,
    },

    /// The caret moved to a new 1-based line without a selection
    CaretMoved { editor: EditorId, line: usize },
}

impl EditorEvent {
    pub fn editor(&self) -> EditorId {
        match self {
            EditorEvent::SelectionChanged { editor, .. } | EditorEvent::CaretMoved { editor, .. } => {
                *editor
            }
        }
    }

    /// The lines this event asks to map
    pub fn lines(&self) -> SourceLineRange {
        match self {
            EditorEvent::SelectionChanged { lines, .. } => *lines,
            EditorEvent::CaretMoved { line, .. } => SourceLineRange::line(*line),
        }
    }
}

/// Project-level events the host forwards to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A different file became selected (or nothing did)
    FileSelectionChanged { path: Option<PathBuf> },

    /// The text of a document changed
    DocumentChanged { path: PathBuf },
}
