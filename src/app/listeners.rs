//! Editor listener registry
//!
//! Hosts keep one of these to deliver selection and caret events to whoever
//! subscribed to a given editor. Subscriptions are explicit: `subscribe`
//! hands back an id, and only `unsubscribe` with that id removes it.

use crate::model::event::{EditorEvent, EditorId, SubscriptionId};

/// Callback invoked for every event of the subscribed editor
pub type EditorListener = Box<dyn FnMut(&EditorEvent)>;

struct Registration {
    id: SubscriptionId,
    editor: EditorId,
    listener: EditorListener,
}

/// Registry for managing editor listeners
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl ListenerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events of `editor`
    pub fn subscribe(&mut self, editor: EditorId, listener: EditorListener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.registrations.push(Registration {
            id,
            editor,
            listener,
        });
        tracing::debug!("Subscribed {:?} to editor {:?}", id, editor);
        id
    }

    /// Remove a registration. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        before != self.registrations.len()
    }

    /// Deliver `event` to every listener of its editor, in subscription order.
    /// Returns how many listeners ran.
    pub fn dispatch(&mut self, event: &EditorEvent) -> usize {
        let editor = event.editor();
        let mut delivered = 0;
        for registration in self
            .registrations
            .iter_mut()
            .filter(|r| r.editor == editor)
        {
            (registration.listener)(event);
            delivered += 1;
        }
        delivered
    }

    /// Number of listeners attached to `editor`
    pub fn listener_count(&self, editor: EditorId) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.editor == editor)
            .count()
    }

    /// Total number of registrations across all editors
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
