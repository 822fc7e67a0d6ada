//! The host environment the panel lives in
//!
//! An IDE, a terminal editor or the standalone CLI host all look the same to
//! the synchronization engine: something that knows the active editor and
//! file, can hand out document text, and delivers editor events to
//! subscribed listeners.

use crate::app::listeners::EditorListener;
use crate::model::event::{EditorId, SubscriptionId};
use crate::model::selection::EditorSelection;
use std::path::{Path, PathBuf};

pub trait EditorHost {
    /// The source editor currently active for the project
    fn active_editor(&self) -> Option<EditorId>;

    /// Caret and selection of an editor
    fn editor_selection(&self, editor: EditorId) -> Option<EditorSelection>;

    /// The file currently selected in the host
    fn selected_file(&self) -> Option<PathBuf>;

    /// Current text of a file's document (unsaved edits included)
    fn document_text(&self, path: &Path) -> Option<String>;

    /// The interpreter configured for the project
    fn resolve_toolchain(&self) -> Option<PathBuf>;

    /// Attach a listener for selection and caret events of `editor`
    fn subscribe(&mut self, editor: EditorId, listener: EditorListener) -> SubscriptionId;

    /// Detach a listener. Returns false if it was not attached.
    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool;
}
