// PanelTestHarness - in-memory editor host for driving bytecode panels

use bytesight::app::host::EditorHost;
use bytesight::app::listeners::{EditorListener, ListenerRegistry};
use bytesight::app::panel::SyncedBytecodePanel;
use bytesight::config::Config;
use bytesight::model::event::{EditorEvent, EditorId, SubscriptionId};
use bytesight::model::selection::{EditorSelection, SourceLineRange};
use bytesight::services::disassembler::DisassemblyProvider;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

/// Interpreter used to run shell helper scripts in place of Python
pub const SHELL: &str = "/bin/sh";

/// Editor host with any number of editors and in-memory documents
#[derive(Default)]
pub struct FakeHost {
    pub active: Option<EditorId>,
    pub file: Option<PathBuf>,
    pub toolchain: Option<PathBuf>,
    pub selections: HashMap<EditorId, EditorSelection>,
    pub documents: HashMap<PathBuf, String>,
    pub listeners: ListenerRegistry,
}

impl FakeHost {
    /// Host with one active editor on `file`, caret on line 1, running
    /// helpers through `/bin/sh`
    pub fn with_document(file: &str, text: &str) -> Self {
        let mut host = Self {
            active: Some(EditorId(1)),
            file: Some(PathBuf::from(file)),
            toolchain: Some(PathBuf::from(SHELL)),
            ..Self::default()
        };
        host.selections.insert(EditorId(1), EditorSelection::caret(1));
        host.documents.insert(PathBuf::from(file), text.to_string());
        host
    }

    /// Move the caret of `editor` and notify its listeners
    pub fn move_caret(&mut self, editor: EditorId, line: usize) -> usize {
        self.selections.insert(editor, EditorSelection::caret(line));
        self.listeners
            .dispatch(&EditorEvent::CaretMoved { editor, line })
    }

    /// Select lines `start..=end` in `editor` and notify its listeners
    pub fn select(&mut self, editor: EditorId, start: usize, end: usize) -> usize {
        self.selections
            .insert(editor, EditorSelection::selecting(start, end, end));
        self.listeners.dispatch(&EditorEvent::SelectionChanged {
            editor,
            lines: SourceLineRange::new(start, end),
        })
    }

    /// Make `editor` active with its caret on line 1
    pub fn activate(&mut self, editor: EditorId) {
        self.selections
            .entry(editor)
            .or_insert_with(|| EditorSelection::caret(1));
        self.active = Some(editor);
    }

    pub fn listener_count(&self, editor: EditorId) -> usize {
        self.listeners.listener_count(editor)
    }
}

impl EditorHost for FakeHost {
    fn active_editor(&self) -> Option<EditorId> {
        self.active
    }

    fn editor_selection(&self, editor: EditorId) -> Option<EditorSelection> {
        self.selections.get(&editor).cloned()
    }

    fn selected_file(&self) -> Option<PathBuf> {
        self.file.clone()
    }

    fn document_text(&self, path: &Path) -> Option<String> {
        self.documents.get(path).cloned()
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

/// Route library logs to the test output; `RUST_LOG` raises the level
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Shell helper that prints `listing` regardless of the source it is given
pub fn printing_helper(listing: &str) -> String {
    let mut script = String::new();
    for line in listing.lines() {
        script.push_str(&format!("printf '%s\\n' '{}'\n", line));
    }
    script
}

/// Provider that runs `script` through `/bin/sh`
pub fn shell_provider(script: &str) -> DisassemblyProvider {
    DisassemblyProvider::new(&Config::default().python)
        .with_timeout(Duration::from_secs(5))
        .with_helper_source(script)
}

/// A synced panel over a shared fake host
pub struct PanelTestHarness {
    pub host: Rc<RefCell<FakeHost>>,
    pub panel: SyncedBytecodePanel<FakeHost>,
}

impl PanelTestHarness {
    /// Panel of `height` rows over `host`, whose helper prints `listing`
    pub fn new(host: FakeHost, listing: &str, height: usize) -> Self {
        Self::with_script(host, &printing_helper(listing), height)
    }

    pub fn with_script(host: FakeHost, script: &str, height: usize) -> Self {
        init_tracing();
        let host = Rc::new(RefCell::new(host));
        let panel = SyncedBytecodePanel::new(Rc::clone(&host), &Config::default(), height)
            .with_provider(shell_provider(script));
        Self { host, panel }
    }

    pub fn text(&self) -> String {
        self.panel.controller().surface().text().to_string()
    }

    pub fn top_line(&self) -> usize {
        self.panel.controller().surface().viewport().top_line
    }

    pub fn move_caret(&self, editor: EditorId, line: usize) -> usize {
        self.host.borrow_mut().move_caret(editor, line)
    }

    pub fn select(&self, editor: EditorId, start: usize, end: usize) -> usize {
        self.host.borrow_mut().select(editor, start, end)
    }
}
