//! Bytecode panels and the event router
//!
//! A panel shows the disassembly of the selected file. The synced variant
//! also binds to the active source editor and keeps the highlighted blocks
//! following its selection.
//!
//! Binding lifecycle:
//!
//! ```text
//!   Unbound --refresh--> Bound(editor, subscription)
//!   Bound   --refresh--> Unbound --> Bound(new editor, new subscription)
//!   any     --dispose--> Unbound (final)
//! ```
//!
//! A refresh always detaches the previous listener before attaching a new
//! one, so at most one subscription per panel exists at any time.

use crate::app::host::EditorHost;
use crate::app::normalize_path;
use crate::config::Config;
use crate::config::PythonConfig;
use crate::model::event::{EditorEvent, EditorId, HostEvent, SubscriptionId};
use crate::model::sentinel::Sentinel;
use crate::services::disassembler::DisassemblyProvider;
use crate::view::highlight::HighlightController;
use crate::view::surface::PanelSurface;
use ratatui::style::Color;
use std::cell::{Ref, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

/// What every bytecode panel offers the host
pub trait BytecodePanel {
    /// Re-run the disassembler for the selected file and refresh the panel
    fn update_bytecode(&mut self);

    /// The renderable surface
    fn component(&self) -> Ref<'_, PanelSurface>;
}

/// Work out the panel text for the host's current state
fn produce_text<H: EditorHost>(
    host: &H,
    python: &PythonConfig,
    provider: &DisassemblyProvider,
) -> (String, Option<PathBuf>) {
    let Some(toolchain) = host.resolve_toolchain() else {
        return (Sentinel::NoToolchain.to_text(), None);
    };
    let Some(file) = host.selected_file() else {
        return (Sentinel::NoFile.to_text(), None);
    };
    if !python.is_source_file(&file) {
        return (Sentinel::NotSourceFile.to_text(), Some(file));
    }
    let Some(source) = host.document_text(&file) else {
        return (Sentinel::NoDocument.to_text(), Some(file));
    };
    let text = provider.produce(&source, Some(&toolchain));
    (text, Some(file))
}

fn highlight_color(config: &Config) -> Color {
    let [r, g, b] = config.panel.highlight_color;
    Color::Rgb(r, g, b)
}

/// The live association between a panel and one source editor
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    editor: EditorId,
    subscription: SubscriptionId,
}

/// Panel that keeps its highlights in sync with the active editor
pub struct SyncedBytecodePanel<H: EditorHost> {
    host: Rc<RefCell<H>>,
    python: PythonConfig,
    provider: DisassemblyProvider,
    controller: Rc<RefCell<HighlightController>>,
    /// File whose listing is shown, bound or not
    shown_file: Option<PathBuf>,
    binding: Option<Binding>,
    disposed: bool,
}

impl<H: EditorHost> SyncedBytecodePanel<H> {
    pub fn new(host: Rc<RefCell<H>>, config: &Config, height: usize) -> Self {
        let mut controller = HighlightController::new(height, highlight_color(config));
        controller.scroll_to_highlight = config.panel.scroll_to_highlight;
        Self {
            host,
            python: config.python.clone(),
            provider: DisassemblyProvider::new(&config.python),
            controller: Rc::new(RefCell::new(controller)),
            shown_file: None,
            binding: None,
            disposed: false,
        }
    }

    /// Use a specific provider (custom helper script or timeout)
    pub fn with_provider(mut self, provider: DisassemblyProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Tear down the old binding, regenerate the text and bind to the
    /// active editor, applying the highlight for its current selection
    pub fn refresh(&mut self) {
        if self.disposed {
            tracing::debug!("Ignoring refresh of a disposed panel");
            return;
        }
        self.unbind();

        let (text, file) = produce_text(&*self.host.borrow(), &self.python, &self.provider);
        self.controller.borrow_mut().set_text(&text);
        self.shown_file = file;

        let Some(editor) = self.host.borrow().active_editor() else {
            tracing::debug!("No active editor; panel stays unbound");
            return;
        };
        self.bind(editor);

        let selection = self.host.borrow().editor_selection(editor);
        if let Some(selection) = selection {
            self.controller
                .borrow_mut()
                .apply_interactive(selection.lines());
        }
    }

    fn bind(&mut self, editor: EditorId) {
        let controller = Rc::clone(&self.controller);
        let listener = Box::new(move |event: &EditorEvent| {
            if event.editor() != editor {
                tracing::debug!("Ignoring event for unbound editor {:?}", event.editor());
                return;
            }
            controller.borrow_mut().apply_interactive(event.lines());
        });
        let subscription = self.host.borrow_mut().subscribe(editor, listener);
        self.binding = Some(Binding {
            editor,
            subscription,
        });
    }

    fn unbind(&mut self) {
        if let Some(binding) = self.binding.take() {
            if !self.host.borrow_mut().unsubscribe(binding.subscription) {
                tracing::warn!("Listener {:?} was already detached", binding.subscription);
            }
        }
        self.controller.borrow_mut().clear();
    }

    /// React to project-level host events
    pub fn handle_host_event(&mut self, event: &HostEvent) {
        match event {
            HostEvent::FileSelectionChanged { .. } => self.refresh(),
            HostEvent::DocumentChanged { path } => {
                let affects_shown_file = self
                    .shown_file
                    .as_ref()
                    .is_some_and(|file| normalize_path(file) == normalize_path(path));
                if affects_shown_file {
                    self.refresh();
                }
            }
        }
    }

    /// Detach from the editor and stop reacting to refreshes for good
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.unbind();
        self.disposed = true;
    }

    /// Run the deferred scroll, once layout has settled
    pub fn settle(&mut self) -> bool {
        self.controller.borrow_mut().settle()
    }

    /// Change the number of visible rows
    pub fn resize(&mut self, height: usize) {
        self.controller
            .borrow_mut()
            .surface_mut()
            .viewport_mut()
            .resize(height);
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn bound_editor(&self) -> Option<EditorId> {
        self.binding.as_ref().map(|b| b.editor)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn controller(&self) -> Ref<'_, HighlightController> {
        self.controller.borrow()
    }

    /// Currently highlighted `(start_index, end_index)` pairs
    pub fn highlighted(&self) -> Vec<(usize, usize)> {
        self.controller.borrow().highlighted()
    }

    /// Source line owning a panel line, for jumping back to the editor
    pub fn source_line_at(&self, display_index: usize) -> Option<usize> {
        self.controller.borrow().index().source_line_at(display_index)
    }
}

impl<H: EditorHost> BytecodePanel for SyncedBytecodePanel<H> {
    fn update_bytecode(&mut self) {
        self.refresh();
    }

    fn component(&self) -> Ref<'_, PanelSurface> {
        Ref::map(self.controller.borrow(), HighlightController::surface)
    }
}

impl<H: EditorHost> Drop for SyncedBytecodePanel<H> {
    fn drop(&mut self) {
        // A panel dropped while the host is mid-dispatch cannot reach it
        if let Ok(mut host) = self.host.try_borrow_mut() {
            if let Some(binding) = self.binding.take() {
                host.unsubscribe(binding.subscription);
            }
        }
    }
}

/// Panel that only shows the disassembly, without following the editor
pub struct PlainBytecodePanel<H: EditorHost> {
    host: Rc<RefCell<H>>,
    python: PythonConfig,
    provider: DisassemblyProvider,
    surface: RefCell<PanelSurface>,
}

impl<H: EditorHost> PlainBytecodePanel<H> {
    pub fn new(host: Rc<RefCell<H>>, config: &Config, height: usize) -> Self {
        Self {
            host,
            python: config.python.clone(),
            provider: DisassemblyProvider::new(&config.python),
            surface: RefCell::new(PanelSurface::new(height, highlight_color(config))),
        }
    }

    pub fn with_provider(mut self, provider: DisassemblyProvider) -> Self {
        self.provider = provider;
        self
    }
}

impl<H: EditorHost> BytecodePanel for PlainBytecodePanel<H> {
    fn update_bytecode(&mut self) {
        let (text, _) = produce_text(&*self.host.borrow(), &self.python, &self.provider);
        self.surface.get_mut().set_text(&text);
    }

    fn component(&self) -> Ref<'_, PanelSurface> {
        self.surface.borrow()
    }
}
