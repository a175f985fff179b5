//! Selection and inline-edit session.
//!
//! At most one node is selected and at most one is in text-edit mode. The
//! two slots are independent: editing a node does not require selecting it.

use nb_core::id::NodeId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    selected: Option<NodeId>,
    editing: Option<NodeId>,
}

impl Session {
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn editing(&self) -> Option<NodeId> {
        self.editing
    }

    pub fn select(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn enter_edit(&mut self, id: NodeId) {
        self.editing = Some(id);
    }

    pub fn exit_edit(&mut self) {
        self.editing = None;
    }

    /// Drop every reference to `id` (after the node is deleted).
    pub fn forget(&mut self, id: NodeId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
    }
}
