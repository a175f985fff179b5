//! The editor session: graph store + camera + interaction + selection.
//!
//! All mutations run synchronously on the caller's thread in arrival order.
//! Pointer input flows through the `InteractionMachine`; discrete actions
//! from toolbars, shortcuts, and the host go through [`Editor::dispatch`].
//! User-facing results are reported as classified [`Outcome`]s; the host
//! decides how to show them.

use crate::input::InputEvent;
use crate::interaction::{Effect, Interaction, InteractionMachine, WheelSteps};
use crate::session::Session;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use nb_core::config::EditorConfig;
use nb_core::filter::{FilteredView, ViewFilter};
use nb_core::id::{EdgeId, NodeId};
use nb_core::model::{EdgeKind, Point};
use nb_core::store::GraphStore;
use nb_core::transform::Camera;
use nb_render::hit::{NodeMetrics, hit_test};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

// ─── Outcomes ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeCode {
    NodeCreated,
    NodeDeleted,
    EdgeCreated,
    EdgeDeleted,
    ViewReset,
    NoSelection,
    NoEligibleTarget,
}

impl OutcomeCode {
    /// Short reason code handed to the presentation layer.
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeCode::NodeCreated => "node-created",
            OutcomeCode::NodeDeleted => "node-deleted",
            OutcomeCode::EdgeCreated => "edge-created",
            OutcomeCode::EdgeDeleted => "edge-deleted",
            OutcomeCode::ViewReset => "view-reset",
            OutcomeCode::NoSelection => "no-selection",
            OutcomeCode::NoEligibleTarget => "no-eligible-target",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub level: Level,
    pub code: OutcomeCode,
}

impl Outcome {
    pub const fn success(code: OutcomeCode) -> Self {
        Self {
            level: Level::Success,
            code,
        }
    }

    pub const fn info(code: OutcomeCode) -> Self {
        Self {
            level: Level::Info,
            code,
        }
    }

    pub const fn error(code: OutcomeCode) -> Self {
        Self {
            level: Level::Error,
            code,
        }
    }
}

/// A precondition that stopped an action. The action made no changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    NoSelection,
    NoEligibleTarget,
}

impl ActionError {
    pub fn outcome(self) -> Outcome {
        match self {
            ActionError::NoSelection => Outcome::error(OutcomeCode::NoSelection),
            ActionError::NoEligibleTarget => Outcome::error(OutcomeCode::NoEligibleTarget),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::NoSelection => f.write_str("no node is selected"),
            ActionError::NoEligibleTarget => f.write_str("no other node to connect to"),
        }
    }
}

impl std::error::Error for ActionError {}

// ─── Actions ─────────────────────────────────────────────────────────────

/// Discrete actions the presentation layer can invoke.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    AddNode,
    DeleteNode(NodeId),
    DeleteSelected,
    /// Connect the selected node. `target: None` picks the first other node
    /// in store order.
    CreateEdge {
        kind: EdgeKind,
        target: Option<NodeId>,
    },
    DeleteEdge(EdgeId),
    SetSearchQuery(String),
    ZoomIn,
    ZoomOut,
    ResetView,
    EnterEdit(NodeId),
    ExitEdit,
    UpdateNodeText { id: NodeId, text: String },
}

// ─── Editor ──────────────────────────────────────────────────────────────

pub struct Editor {
    store: GraphStore,
    camera: Camera,
    machine: InteractionMachine,
    session: Session,
    filter: ViewFilter,
    config: EditorConfig,
    rng: SmallRng,
    outcomes: Vec<Outcome>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_seed(config, 0x5eed)
    }

    /// Seed the spawn-position generator (the host passes entropy; tests
    /// pass constants).
    pub fn with_seed(config: EditorConfig, seed: u64) -> Self {
        let config = config.validated();
        let wheel = WheelSteps {
            zoom_in: config.wheel_zoom_in,
            zoom_out: config.wheel_zoom_out,
        };
        Self {
            store: GraphStore::new(),
            camera: config.camera(),
            machine: InteractionMachine::new(config.double_tap_ms, wheel),
            session: Session::default(),
            filter: ViewFilter::default(),
            rng: SmallRng::seed_from_u64(seed),
            outcomes: Vec::new(),
            config,
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    // ─── Read side ───────────────────────────────────────────────────────

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn metrics(&self) -> NodeMetrics {
        NodeMetrics::from(&self.config)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.session.selected()
    }

    pub fn editing(&self) -> Option<NodeId> {
        self.session.editing()
    }

    pub fn interaction(&self) -> Interaction {
        self.machine.state()
    }

    pub fn query(&self) -> &str {
        self.filter.query()
    }

    /// Nodes and edges that pass the current search query.
    pub fn visible(&self) -> FilteredView<'_> {
        self.filter.apply(&self.store)
    }

    /// Outcomes reported since the last drain, oldest first.
    pub fn drain_outcomes(&mut self) -> Vec<Outcome> {
        std::mem::take(&mut self.outcomes)
    }

    /// Topmost visible node under a screen position.
    pub fn hit_test_screen(&self, x: f32, y: f32) -> Option<NodeId> {
        let world = self.camera.screen_to_world(Point::new(x, y));
        hit_test(self.visible().nodes, self.metrics(), world)
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Feed one input event. `hit` is the node under a `PointerDown`;
    /// callers without their own hit test can use [`Editor::hit_test_screen`].
    pub fn handle_input(&mut self, event: &InputEvent, hit: Option<NodeId>) {
        if let InputEvent::Key {
            key,
            ctrl,
            shift,
            alt,
            meta,
        } = event
        {
            self.handle_key(key, *ctrl, *shift, *alt, *meta);
            return;
        }
        let effects = self
            .machine
            .handle(event, hit, &self.store, &self.camera);
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    pub fn pointer_down(&mut self, event: &InputEvent, hit: Option<NodeId>) {
        self.handle_input(event, hit);
    }

    pub fn pointer_move(&mut self, event: &InputEvent) {
        self.handle_input(event, None);
    }

    pub fn pointer_up(&mut self) {
        self.machine.release();
    }

    pub fn pointer_leave(&mut self) {
        self.machine.release();
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.handle_input(&InputEvent::Wheel { delta_y }, None);
    }

    /// Resolve and run a keyboard shortcut. Returns the shortcut that fired.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let editing = self.session.editing().is_some();
        let shortcut = ShortcutMap::resolve(key, ctrl, shift, alt, meta, editing)?;
        match shortcut {
            ShortcutAction::EditSelected => {
                if let Some(id) = self.session.selected() {
                    self.enter_edit(id);
                }
            }
            ShortcutAction::Escape => {
                if editing {
                    self.exit_edit();
                } else {
                    self.clear_selection();
                }
            }
            other => {
                if let Some(action) = other.to_action() {
                    self.dispatch(action);
                }
            }
        }
        Some(shortcut)
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Select(id) => self.session.select(id),
            Effect::ClearSelection => self.session.clear_selection(),
            Effect::EnterEdit(id) => self.session.enter_edit(id),
            Effect::MoveNode { id, position } => self.store.move_node(id, position),
            Effect::SetPan(pan) => self.camera.pan = pan,
            Effect::ZoomBy(factor) => {
                self.camera.zoom_by(factor);
                log::debug!("zoom {}", self.camera.zoom());
            }
        }
    }

    // ─── Actions ─────────────────────────────────────────────────────────

    /// Run an action, queue its outcome (if any), and return it.
    pub fn dispatch(&mut self, action: EditorAction) -> Option<Outcome> {
        let outcome = match action {
            EditorAction::AddNode => {
                self.add_node();
                Some(Outcome::success(OutcomeCode::NodeCreated))
            }
            EditorAction::DeleteNode(id) => self
                .delete_node(id)
                .then_some(Outcome::success(OutcomeCode::NodeDeleted)),
            EditorAction::DeleteSelected => match self.session.selected() {
                Some(id) => self
                    .delete_node(id)
                    .then_some(Outcome::success(OutcomeCode::NodeDeleted)),
                None => Some(ActionError::NoSelection.outcome()),
            },
            EditorAction::CreateEdge { kind, target } => match self.create_edge(kind, target) {
                Ok(_) => Some(Outcome::success(OutcomeCode::EdgeCreated)),
                Err(e) => Some(e.outcome()),
            },
            EditorAction::DeleteEdge(id) => self
                .delete_edge(id)
                .then_some(Outcome::success(OutcomeCode::EdgeDeleted)),
            EditorAction::SetSearchQuery(query) => {
                self.set_search_query(query);
                None
            }
            EditorAction::ZoomIn => {
                self.zoom_in();
                None
            }
            EditorAction::ZoomOut => {
                self.zoom_out();
                None
            }
            EditorAction::ResetView => {
                self.reset_view();
                Some(Outcome::info(OutcomeCode::ViewReset))
            }
            EditorAction::EnterEdit(id) => {
                self.enter_edit(id);
                None
            }
            EditorAction::ExitEdit => {
                self.exit_edit();
                None
            }
            EditorAction::UpdateNodeText { id, text } => {
                self.update_node_text(id, text);
                None
            }
        };

        if let Some(outcome) = outcome {
            self.record(outcome);
        }
        outcome
    }

    /// Queue the failure of a precondition the host checked itself (for
    /// example a target name that never referred to a node).
    pub fn reject(&mut self, error: ActionError) -> Outcome {
        let outcome = error.outcome();
        self.record(outcome);
        outcome
    }

    fn record(&mut self, outcome: Outcome) {
        log::debug!("outcome {} {}", outcome.level.as_str(), outcome.code.as_str());
        self.outcomes.push(outcome);
    }

    /// Create a node with the default text near the spawn origin and select it.
    pub fn add_node(&mut self) -> NodeId {
        let jitter = self.config.spawn_jitter;
        let offset = if jitter > 0.0 {
            Point::new(
                self.rng.random_range(0.0..jitter),
                self.rng.random_range(0.0..jitter),
            )
        } else {
            Point::ZERO
        };
        let position = self.config.spawn_origin + offset;
        let text = self.config.default_node_text.clone();
        let id = self.store.create_node(text, position);
        self.session.select(id);
        id
    }

    /// Delete a node, its edges, and any selection/edit reference to it.
    /// Returns false if the node did not exist.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let Some(_deleted) = self.store.delete_node(id) else {
            return false;
        };
        self.session.forget(id);
        // A drag on the deleted node has nothing left to move.
        if matches!(self.machine.state(), Interaction::DraggingNode { node, .. } if node == id) {
            self.machine.release();
        }
        true
    }

    /// Connect the selected node to `target`, or to the first other node in
    /// store order when `target` is `None`. Fails without side effects if
    /// nothing is selected or there is no node to connect to.
    pub fn create_edge(
        &mut self,
        kind: EdgeKind,
        target: Option<NodeId>,
    ) -> Result<EdgeId, ActionError> {
        let from = self
            .session
            .selected()
            .filter(|id| self.store.contains_node(*id))
            .ok_or(ActionError::NoSelection)?;

        let to = match target {
            Some(to) if self.store.contains_node(to) => to,
            Some(_) => return Err(ActionError::NoEligibleTarget),
            None => {
                self.store
                    .first_other_node(from)
                    .ok_or(ActionError::NoEligibleTarget)?
                    .id
            }
        };

        Ok(self.store.create_edge(from, to, kind))
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> bool {
        self.store.delete_edge(id).is_some()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter = ViewFilter::new(query);
        log::debug!("search query {:?}", self.filter.query());
    }

    pub fn zoom_in(&mut self) {
        self.camera.step_zoom(self.config.button_zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.camera.step_zoom(-self.config.button_zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// Put a node into inline-edit mode. Unknown ids are ignored.
    pub fn enter_edit(&mut self, id: NodeId) {
        if self.store.contains_node(id) {
            self.session.enter_edit(id);
        }
    }

    pub fn exit_edit(&mut self) {
        self.session.exit_edit();
    }

    pub fn update_node_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.store.update_node_text(id, text);
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Channel;
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        Editor::with_seed(EditorConfig::default(), 7)
    }

    #[test]
    fn add_node_uses_defaults_and_selects() {
        let mut ed = editor();
        let id = ed.add_node();
        let node = ed.store().node(id).unwrap();
        assert_eq!(node.text, "New node");
        assert!((100.0..300.0).contains(&node.position.x));
        assert!((100.0..300.0).contains(&node.position.y));
        assert_eq!(ed.selected(), Some(id));
    }

    #[test]
    fn zero_jitter_spawns_at_origin() {
        let config = EditorConfig {
            spawn_jitter: 0.0,
            ..EditorConfig::default()
        };
        let mut ed = Editor::new(config);
        let id = ed.add_node();
        assert_eq!(ed.store().node(id).unwrap().position, Point::new(100.0, 100.0));
    }

    #[test]
    fn same_seed_same_positions() {
        let mut a = editor();
        let mut b = editor();
        let ida = a.add_node();
        let pa = a.store().node(ida).unwrap().position;
        let idb = b.add_node();
        let pb = b.store().node(idb).unwrap().position;
        assert_eq!(pa, pb);
    }

    #[test]
    fn dispatch_queues_outcomes() {
        let mut ed = editor();
        ed.dispatch(EditorAction::AddNode);
        ed.dispatch(EditorAction::CreateEdge {
            kind: EdgeKind::Primary,
            target: None,
        });
        ed.dispatch(EditorAction::ZoomIn);
        let codes: Vec<&str> = ed.drain_outcomes().iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["node-created", "no-eligible-target"]);
        assert!(ed.drain_outcomes().is_empty());
    }

    #[test]
    fn create_edge_without_selection_fails() {
        let mut ed = editor();
        ed.add_node();
        ed.add_node();
        ed.clear_selection();
        assert_eq!(
            ed.create_edge(EdgeKind::Alias, None),
            Err(ActionError::NoSelection)
        );
        assert_eq!(ed.store().edge_count(), 0);
    }

    #[test]
    fn explicit_target_must_exist() {
        let mut ed = editor();
        let a = ed.add_node();
        let ghost = NodeId::intern("editor_ghost");
        assert_eq!(
            ed.create_edge(EdgeKind::Primary, Some(ghost)),
            Err(ActionError::NoEligibleTarget)
        );
        // Self-loops are allowed when asked for explicitly.
        let e = ed.create_edge(EdgeKind::Primary, Some(a)).unwrap();
        assert!(ed.store().edge(e).unwrap().is_self_loop());
    }

    #[test]
    fn delete_missing_node_reports_nothing() {
        let mut ed = editor();
        let outcome = ed.dispatch(EditorAction::DeleteNode(NodeId::intern("editor_nobody")));
        assert_eq!(outcome, None);
        assert!(ed.drain_outcomes().is_empty());
    }

    #[test]
    fn delete_selected_needs_selection() {
        let mut ed = editor();
        assert_eq!(
            ed.dispatch(EditorAction::DeleteSelected),
            Some(Outcome::error(OutcomeCode::NoSelection))
        );
        let id = ed.add_node();
        assert_eq!(
            ed.dispatch(EditorAction::DeleteSelected),
            Some(Outcome::success(OutcomeCode::NodeDeleted))
        );
        assert!(!ed.store().contains_node(id));
    }

    #[test]
    fn deleting_dragged_node_ends_drag() {
        let mut ed = editor();
        let id = ed.add_node();
        let pos = ed.store().node(id).unwrap().position;
        ed.pointer_down(
            &InputEvent::pointer_down(pos.x + 1.0, pos.y + 1.0, Channel::Mouse, 0.0),
            Some(id),
        );
        assert!(matches!(ed.interaction(), Interaction::DraggingNode { .. }));
        ed.delete_node(id);
        assert!(ed.interaction().is_idle());
    }

    #[test]
    fn enter_edit_ignores_unknown_ids() {
        let mut ed = editor();
        ed.enter_edit(NodeId::intern("editor_unknown"));
        assert_eq!(ed.editing(), None);
        let id = ed.add_node();
        ed.clear_selection();
        ed.enter_edit(id);
        assert_eq!(ed.editing(), Some(id));
        assert_eq!(ed.selected(), None);
        ed.exit_edit();
        assert_eq!(ed.editing(), None);
    }

    #[test]
    fn hit_test_screen_respects_camera_and_filter() {
        let config = EditorConfig {
            spawn_jitter: 0.0,
            ..EditorConfig::default()
        };
        let mut ed = Editor::new(config);
        let id = ed.add_node();
        // Node box spans world (100..240, 100..144).
        assert_eq!(ed.hit_test_screen(120.0, 120.0), Some(id));
        ed.set_search_query("nothing matches");
        assert_eq!(ed.hit_test_screen(120.0, 120.0), None);
        ed.set_search_query("");
        ed.camera.set_zoom(2.0);
        assert_eq!(ed.hit_test_screen(120.0, 120.0), None);
        assert_eq!(ed.hit_test_screen(250.0, 250.0), Some(id));
    }

    #[test]
    fn keys_drive_actions() {
        let mut ed = editor();
        assert_eq!(ed.handle_key("n", false, false, false, false), Some(ShortcutAction::AddNode));
        let id = ed.selected().unwrap();
        ed.handle_key("Enter", false, false, false, false);
        assert_eq!(ed.editing(), Some(id));
        // Typing while editing does not trigger shortcuts.
        assert_eq!(ed.handle_key("n", false, false, false, false), None);
        assert_eq!(ed.store().node_count(), 1);
        ed.handle_key("Escape", false, false, false, false);
        assert_eq!(ed.editing(), None);
        assert_eq!(ed.selected(), Some(id));
        ed.handle_key("Escape", false, false, false, false);
        assert_eq!(ed.selected(), None);
    }

    #[test]
    fn key_events_route_through_handle_input() {
        let mut ed = editor();
        ed.handle_input(
            &InputEvent::Key {
                key: "=".to_string(),
                ctrl: false,
                shift: false,
                alt: false,
                meta: false,
            },
            None,
        );
        assert!((ed.camera().zoom() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn reject_queues_error_outcome() {
        let mut ed = editor();
        assert_eq!(
            ed.reject(ActionError::NoEligibleTarget),
            Outcome::error(OutcomeCode::NoEligibleTarget)
        );
        assert_eq!(
            ed.drain_outcomes(),
            vec![Outcome::error(OutcomeCode::NoEligibleTarget)]
        );
        assert_eq!(ed.store().edge_count(), 0);
    }

    #[test]
    fn action_error_display() {
        assert_eq!(ActionError::NoSelection.to_string(), "no node is selected");
        assert_eq!(
            ActionError::NoEligibleTarget.outcome(),
            Outcome::error(OutcomeCode::NoEligibleTarget)
        );
    }
}
