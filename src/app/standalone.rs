//! Host for running the panel outside an editor
//!
//! One file on disk, one editor, a selection set from the command line. The
//! CLI uses it, and it is handy for driving the engine in tests.

use crate::app::host::EditorHost;
use crate::app::listeners::{EditorListener, ListenerRegistry};
use crate::config::PythonConfig;
use crate::model::event::{EditorEvent, EditorId, SubscriptionId};
use crate::model::selection::EditorSelection;
use crate::services::toolchain;
use std::path::{Path, PathBuf};

/// The single editor a standalone host exposes
pub const STANDALONE_EDITOR: EditorId = EditorId(1);

pub struct StandaloneHost {
    file: PathBuf,
    selection: EditorSelection,
    toolchain: Option<PathBuf>,
    listeners: ListenerRegistry,
}

impl StandaloneHost {
    /// Host for `file`, with the caret on line 1 and the interpreter resolved
    /// from `python`
    pub fn new(file: impl Into<PathBuf>, python: &PythonConfig) -> Self {
        Self {
            file: file.into(),
            selection: EditorSelection::caret(1),
            toolchain: toolchain::resolve(python),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Override the interpreter
    pub fn with_toolchain(mut self, toolchain: Option<PathBuf>) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Move the selection and notify listeners, as an editor would
    pub fn set_selection(&mut self, selection: EditorSelection) {
        let event = match &selection.selection {
            Some(range) => EditorEvent::SelectionChanged {
                editor: STANDALONE_EDITOR,
                lines: range.clone().into(),
            },
            None => EditorEvent::CaretMoved {
                editor: STANDALONE_EDITOR,
                line: selection.caret_line,
            },
        };
        self.selection = selection;
        self.listeners.dispatch(&event);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.listener_count(STANDALONE_EDITOR)
    }
}

impl EditorHost for StandaloneHost {
    fn active_editor(&self) -> Option<EditorId> {
        Some(STANDALONE_EDITOR)
    }

    fn editor_selection(&self, editor: EditorId) -> Option<EditorSelection> {
        (editor == STANDALONE_EDITOR).then(|| self.selection.clone())
    }

    fn selected_file(&self) -> Option<PathBuf> {
        Some(self.file.clone())
    }

    fn document_text(&self, path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn resolve_toolchain(&self) -> Option<PathBuf> {
        self.toolchain.clone()
    }

    fn subscribe(&mut self, editor: EditorId, listener: EditorListener) -> SubscriptionId {
        self.listeners.subscribe(editor, listener)
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.listeners.unsubscribe(subscription)
    }
}
