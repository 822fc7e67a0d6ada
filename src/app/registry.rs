//! Project to panel table
//!
//! Lets a global "update bytecode" command reach the panel of the active
//! project without holding a reference to it. Entries are inserted when a
//! panel is created and removed when it is disposed; dropping the panel
//! detaches it from its editor.

use crate::app::panel::BytecodePanel;
use crate::model::event::ProjectId;
use std::collections::HashMap;

#[derive(Default)]
pub struct PanelRegistry {
    panels: HashMap<ProjectId, Box<dyn BytecodePanel>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the panel for `project`, disposing any panel it replaces
    pub fn insert(&mut self, project: ProjectId, panel: Box<dyn BytecodePanel>) {
        if self.panels.insert(project.clone(), panel).is_some() {
            tracing::debug!("Replaced bytecode panel for project {}", project.0);
        }
    }

    pub fn get(&self, project: &ProjectId) -> Option<&dyn BytecodePanel> {
        self.panels.get(project).map(|panel| panel.as_ref())
    }

    pub fn get_mut(&mut self, project: &ProjectId) -> Option<&mut (dyn BytecodePanel + 'static)> {
        self.panels.get_mut(project).map(|panel| panel.as_mut())
    }

    /// Refresh the panel of `project`. Returns false if it has none.
    pub fn update_bytecode(&mut self, project: &ProjectId) -> bool {
        match self.panels.get_mut(project) {
            Some(panel) => {
                panel.update_bytecode();
                true
            }
            None => false,
        }
    }

    /// Remove and drop the panel of `project`. Returns false if it has none.
    pub fn dispose(&mut self, project: &ProjectId) -> bool {
        self.panels.remove(project).is_some()
    }

    pub fn contains(&self, project: &ProjectId) -> bool {
        self.panels.contains_key(project)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::surface::PanelSurface;
    use ratatui::style::Color;
    use std::cell::{Cell, Ref, RefCell};
    use std::rc::Rc;

    /// Counts refreshes and drops
    struct CountingPanel {
        surface: RefCell<PanelSurface>,
        updates: Rc<Cell<usize>>,
        dropped: Rc<Cell<bool>>,
    }

    impl BytecodePanel for CountingPanel {
        fn update_bytecode(&mut self) {
            self.updates.set(self.updates.get() + 1);
            self.surface
                .get_mut()
                .set_text(&format!("update {}", self.updates.get()));
        }

        fn component(&self) -> Ref<'_, PanelSurface> {
            self.surface.borrow()
        }
    }

    impl Drop for CountingPanel {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    fn counting_panel() -> (Box<dyn BytecodePanel>, Rc<Cell<usize>>, Rc<Cell<bool>>) {
        let updates = Rc::new(Cell::new(0));
        let dropped = Rc::new(Cell::new(false));
        let panel = CountingPanel {
            surface: RefCell::new(PanelSurface::new(10, Color::Blue)),
            updates: Rc::clone(&updates),
            dropped: Rc::clone(&dropped),
        };
        (Box::new(panel), updates, dropped)
    }

    #[test]
    fn test_update_reaches_registered_panel() {
        let mut registry = PanelRegistry::new();
        let project = ProjectId::new("demo");
        let (panel, updates, _) = counting_panel();
        registry.insert(project.clone(), panel);

        assert!(registry.update_bytecode(&project));
        assert!(registry.update_bytecode(&project));
        assert_eq!(updates.get(), 2);
        assert_eq!(
            registry.get(&project).unwrap().component().text(),
            "update 2"
        );

        assert!(!registry.update_bytecode(&ProjectId::new("other")));
    }

    #[test]
    fn test_dispose_removes_and_drops() {
        let mut registry = PanelRegistry::new();
        let project = ProjectId::new("demo");
        let (panel, _, dropped) = counting_panel();
        registry.insert(project.clone(), panel);
        assert_eq!(registry.len(), 1);

        assert!(registry.dispose(&project));
        assert!(dropped.get());
        assert!(registry.is_empty());
        assert!(!registry.dispose(&project));
        assert!(!registry.update_bytecode(&project));
    }

    #[test]
    fn test_insert_replaces_previous_panel() {
        let mut registry = PanelRegistry::new();
        let project = ProjectId::new("demo");
        let (first, _, first_dropped) = counting_panel();
        let (second, second_updates, _) = counting_panel();

        registry.insert(project.clone(), first);
        registry.insert(project.clone(), second);
        assert!(first_dropped.get());
        assert_eq!(registry.len(), 1);

        registry.get_mut(&project).unwrap().update_bytecode();
        assert_eq!(second_updates.get(), 1);
    }
}
