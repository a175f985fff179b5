//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser bridge and native hosts agree on bindings.
//!
//! While a node is in inline-edit mode the text field owns the keyboard:
//! only `Escape` and `Enter` are resolved.

use crate::editor::EditorAction;
use nb_core::model::EdgeKind;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Graph ──
    AddNode,
    DeleteSelected,
    ConnectPrimary,
    ConnectAlias,

    // ── Edit session ──
    EditSelected,
    /// Leave edit mode, or deselect when not editing.
    Escape,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ResetView,
}

impl ShortcutAction {
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::AddNode => "addNode",
            ShortcutAction::DeleteSelected => "deleteSelected",
            ShortcutAction::ConnectPrimary => "connectPrimary",
            ShortcutAction::ConnectAlias => "connectAlias",
            ShortcutAction::EditSelected => "editSelected",
            ShortcutAction::Escape => "escape",
            ShortcutAction::ZoomIn => "zoomIn",
            ShortcutAction::ZoomOut => "zoomOut",
            ShortcutAction::ResetView => "resetView",
        }
    }

    /// The editor action for shortcuts that map one-to-one. `EditSelected`
    /// and `Escape` depend on session state and are resolved by the caller.
    pub fn to_action(self) -> Option<EditorAction> {
        match self {
            ShortcutAction::AddNode => Some(EditorAction::AddNode),
            ShortcutAction::DeleteSelected => Some(EditorAction::DeleteSelected),
            ShortcutAction::ConnectPrimary => Some(EditorAction::CreateEdge {
                kind: EdgeKind::Primary,
                target: None,
            }),
            ShortcutAction::ConnectAlias => Some(EditorAction::CreateEdge {
                kind: EdgeKind::Alias,
                target: None,
            }),
            ShortcutAction::ZoomIn => Some(EditorAction::ZoomIn),
            ShortcutAction::ZoomOut => Some(EditorAction::ZoomOut),
            ShortcutAction::ResetView => Some(EditorAction::ResetView),
            ShortcutAction::EditSelected | ShortcutAction::Escape => None,
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// `ctrl` and `meta` are treated alike, so ⌘ on macOS and Ctrl elsewhere
/// bind the same view shortcuts.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"n"`, `"Delete"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
        editing: bool,
    ) -> Option<ShortcutAction> {
        if editing {
            return match key {
                "Escape" | "Enter" => Some(ShortcutAction::Escape),
                _ => None,
            };
        }

        let cmd = ctrl || meta;

        if cmd {
            return match key {
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ResetView),
                _ => None,
            };
        }

        if shift {
            return match key {
                "e" | "E" => Some(ShortcutAction::ConnectAlias),
                // `+` needs Shift on most layouts.
                "+" => Some(ShortcutAction::ZoomIn),
                _ => None,
            };
        }

        match key {
            "n" | "N" => Some(ShortcutAction::AddNode),
            "e" | "E" => Some(ShortcutAction::ConnectPrimary),
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteSelected),
            "Enter" | "F2" => Some(ShortcutAction::EditSelected),
            "Escape" => Some(ShortcutAction::Escape),
            "=" | "+" => Some(ShortcutAction::ZoomIn),
            "-" => Some(ShortcutAction::ZoomOut),
            "0" => Some(ShortcutAction::ResetView),
            _ => None,
        }
    }
}
