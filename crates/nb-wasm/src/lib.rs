//! WASM bridge for Nodeboard: exposes the graph editor to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM
//! (toolbar, search box, inline text field, notifications); everything
//! stateful lives in [`GraphCanvas`].

mod render2d;

use nb_core::config::EditorConfig;
use nb_core::id::{EdgeId, NodeId};
use nb_core::model::{Edge, EdgeKind, Node};
use nb_core::transform::Camera;
use nb_editor::shortcuts::ShortcutAction;
use nb_editor::{ActionError, Channel, Editor, EditorAction, InputEvent, Outcome};
use nb_render::hit::NodeMetrics;
use nb_render::paint::{PaintContext, build_draw_list};
use serde_json::{Value, json};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller.
///
/// All interaction from the page goes through this struct. Methods that
/// change something visible return `true` so the page knows to re-render.
#[wasm_bindgen]
pub struct GraphCanvas {
    editor: Editor,
    width: f64,
    height: f64,
    /// Dark mode flag: `false` = light (default), `true` = dark.
    dark_mode: bool,
}

#[wasm_bindgen]
impl GraphCanvas {
    /// Create a controller. `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config_json: &str) -> Self {
        console_error_panic_hook_setup();

        let config = EditorConfig::from_json(config_json);
        let seed = host_seed();
        log::debug!("canvas {width}x{height}, seed {seed:#x}");

        Self {
            editor: Editor::with_seed(config, seed),
            width,
            height,
            dark_mode: false,
        }
    }

    /// Render the visible graph to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let view = self.editor.visible();
        let list = build_draw_list(
            &view,
            PaintContext {
                camera: self.editor.camera(),
                metrics: self.editor.metrics(),
                selected: self.editor.selected(),
                editing: self.editor.editing(),
            },
        );
        let theme = if self.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        render2d::render_list(ctx, &list, self.width, self.height, &theme);
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Reseed node spawn positions (tests and reproducible demos).
    pub fn set_seed(&mut self, seed: u32) {
        self.editor.reseed(u64::from(seed));
    }

    // ─── Pointer API ─────────────────────────────────────────────────────

    /// Pointer down at a screen position. `pointer_type` is the DOM
    /// `PointerEvent.pointerType`; `time_ms` is `event.timeStamp`.
    /// Returns true if the view needs a re-render.
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        pointer_type: &str,
        time_ms: f64,
    ) -> bool {
        let before = self.snapshot();
        let hit = self.editor.hit_test_screen(x, y);
        let event = InputEvent::pointer_down(x, y, parse_channel(pointer_type), time_ms);
        self.editor.pointer_down(&event, hit);
        before != self.snapshot()
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32, pointer_type: &str) -> bool {
        if self.editor.interaction().is_idle() {
            return false;
        }
        let event = InputEvent::pointer_move(x, y, parse_channel(pointer_type));
        self.editor.pointer_move(&event);
        true
    }

    pub fn handle_pointer_up(&mut self) -> bool {
        let active = !self.editor.interaction().is_idle();
        self.editor.pointer_up();
        active
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        let active = !self.editor.interaction().is_idle();
        self.editor.pointer_leave();
        active
    }

    /// Wheel zoom. Returns true if the zoom changed (it may be clamped).
    pub fn handle_wheel(&mut self, delta_y: f32) -> bool {
        let before = self.editor.camera().zoom();
        self.editor.wheel(delta_y);
        before != self.editor.camera().zoom()
    }

    /// Hit-test a screen position. Returns the node id or an empty string.
    pub fn hit_test(&self, x: f32, y: f32) -> String {
        self.editor
            .hit_test_screen(x, y)
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool,"action":"<action_name>"}`
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let before = self.snapshot();
        let action = self.editor.handle_key(key, ctrl, shift, alt, meta);
        key_result_json(action, before != self.snapshot())
    }

    // ─── Actions ─────────────────────────────────────────────────────────

    /// Add a node near the spawn origin. Returns the new node id.
    pub fn add_node(&mut self) -> String {
        self.editor.dispatch(EditorAction::AddNode);
        self.selected_id()
    }

    /// Returns true if the node existed.
    pub fn delete_node(&mut self, node_id: &str) -> bool {
        let Some(id) = NodeId::lookup(node_id) else {
            return false;
        };
        self.editor.dispatch(EditorAction::DeleteNode(id)).is_some()
    }

    pub fn delete_selected(&mut self) -> bool {
        outcome_ok(self.editor.dispatch(EditorAction::DeleteSelected))
    }

    /// Connect the selected node. `kind` is `"primary"` or `"alias"`;
    /// an empty `target` picks the first other node. A target name that
    /// was never a node id fails like a deleted one.
    /// Returns the new edge id, or an empty string on failure.
    pub fn create_edge(&mut self, kind: &str, target: &str) -> String {
        let kind = kind.parse().unwrap_or_else(|e| {
            log::warn!("{e}, using primary");
            EdgeKind::Primary
        });
        let target = match target {
            "" => None,
            name => match NodeId::lookup(name) {
                Some(id) => Some(id),
                None => {
                    let error = if self.editor.selected().is_some() {
                        ActionError::NoEligibleTarget
                    } else {
                        ActionError::NoSelection
                    };
                    self.editor.reject(error);
                    return String::new();
                }
            },
        };
        let outcome = self.editor.dispatch(EditorAction::CreateEdge { kind, target });
        if !outcome_ok(outcome) {
            return String::new();
        }
        self.editor
            .store()
            .edges()
            .last()
            .map(|e| e.id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn delete_edge(&mut self, edge_id: &str) -> bool {
        let Some(id) = EdgeId::lookup(edge_id) else {
            return false;
        };
        self.editor.dispatch(EditorAction::DeleteEdge(id)).is_some()
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.editor
            .dispatch(EditorAction::SetSearchQuery(query.to_string()));
    }

    pub fn zoom_in(&mut self) {
        self.editor.dispatch(EditorAction::ZoomIn);
    }

    pub fn zoom_out(&mut self) {
        self.editor.dispatch(EditorAction::ZoomOut);
    }

    pub fn reset_view(&mut self) {
        self.editor.dispatch(EditorAction::ResetView);
    }

    /// Returns true if the node exists and is now being edited.
    pub fn enter_edit(&mut self, node_id: &str) -> bool {
        let Some(id) = NodeId::lookup(node_id) else {
            return false;
        };
        self.editor.dispatch(EditorAction::EnterEdit(id));
        self.editor.editing() == Some(id)
    }

    pub fn exit_edit(&mut self) {
        self.editor.dispatch(EditorAction::ExitEdit);
    }

    /// Commit inline-edit text. Returns true if the node exists.
    pub fn update_node_text(&mut self, node_id: &str, text: &str) -> bool {
        let Some(id) = NodeId::lookup(node_id).filter(|id| self.editor.store().contains_node(*id))
        else {
            return false;
        };
        self.editor.dispatch(EditorAction::UpdateNodeText {
            id,
            text: text.to_string(),
        });
        true
    }

    // ─── Read API ────────────────────────────────────────────────────────

    /// All nodes as a JSON array, or only those passing the search query.
    pub fn nodes_json(&self, filtered: bool) -> String {
        let nodes: Vec<Value> = if filtered {
            self.editor.visible().nodes.into_iter().map(node_json).collect()
        } else {
            self.editor.store().nodes().iter().map(node_json).collect()
        };
        Value::Array(nodes).to_string()
    }

    pub fn edges_json(&self, filtered: bool) -> String {
        let edges: Vec<Value> = if filtered {
            self.editor.visible().edges.into_iter().map(edge_json).collect()
        } else {
            self.editor.store().edges().iter().map(edge_json).collect()
        };
        Value::Array(edges).to_string()
    }

    /// `{"panX":f,"panY":f,"zoom":f}`
    pub fn view_json(&self) -> String {
        view_json(self.editor.camera()).to_string()
    }

    /// Selected node id, or empty string if none.
    pub fn selected_id(&self) -> String {
        id_or_empty(self.editor.selected())
    }

    /// Node in inline-edit mode, or empty string if none.
    pub fn editing_id(&self) -> String {
        id_or_empty(self.editor.editing())
    }

    /// Screen-space box of a node as `{"x","y","width","height"}`, for
    /// placing the inline text field. Empty object if the node is unknown.
    pub fn node_screen_rect_json(&self, node_id: &str) -> String {
        let view = self.editor.visible();
        let node = NodeId::lookup(node_id)
            .filter(|id| view.contains_node(*id))
            .and_then(|id| self.editor.store().node(id));
        match node {
            Some(node) => {
                screen_rect_json(node, self.editor.camera(), self.editor.metrics()).to_string()
            }
            None => "{}".to_string(),
        }
    }

    /// Outcomes since the last call, as `[{"level":..,"code":..}]`.
    pub fn take_outcomes_json(&mut self) -> String {
        outcomes_json(&self.editor.drain_outcomes()).to_string()
    }

    pub fn node_count(&self) -> usize {
        self.editor.store().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.editor.store().edge_count()
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

/// Everything a re-render depends on, for change detection.
#[derive(PartialEq)]
struct Snapshot {
    nodes: usize,
    edges: usize,
    selected: Option<NodeId>,
    editing: Option<NodeId>,
    camera: Camera,
}

impl GraphCanvas {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.editor.store().node_count(),
            edges: self.editor.store().edge_count(),
            selected: self.editor.selected(),
            editing: self.editor.editing(),
            camera: *self.editor.camera(),
        }
    }
}

fn parse_channel(pointer_type: &str) -> Channel {
    pointer_type.parse().unwrap_or_else(|e| {
        log::trace!("{e}, treating as mouse");
        Channel::Mouse
    })
}

fn outcome_ok(outcome: Option<Outcome>) -> bool {
    outcome.is_some_and(|o| o.level != nb_editor::Level::Error)
}

fn id_or_empty(id: Option<NodeId>) -> String {
    id.map(|id| id.as_str().to_string()).unwrap_or_default()
}

fn node_json(node: &Node) -> Value {
    json!({
        "id": node.id.as_str(),
        "text": node.text,
        "x": node.position.x,
        "y": node.position.y,
    })
}

fn edge_json(edge: &Edge) -> Value {
    json!({
        "id": edge.id.as_str(),
        "from": edge.from.as_str(),
        "to": edge.to.as_str(),
        "kind": edge.kind.as_str(),
    })
}

fn view_json(camera: &Camera) -> Value {
    json!({
        "panX": camera.pan.x,
        "panY": camera.pan.y,
        "zoom": camera.zoom(),
    })
}

fn outcomes_json(outcomes: &[Outcome]) -> Value {
    outcomes
        .iter()
        .map(|o| json!({ "level": o.level.as_str(), "code": o.code.as_str() }))
        .collect()
}

fn key_result_json(action: Option<ShortcutAction>, changed: bool) -> String {
    json!({
        "changed": changed,
        "action": action.map_or("none", ShortcutAction::name),
    })
    .to_string()
}

fn screen_rect_json(node: &Node, camera: &Camera, metrics: NodeMetrics) -> Value {
    let top_left = camera.world_to_screen(node.position);
    let zoom = camera.zoom();
    json!({
        "x": top_left.x,
        "y": top_left.y,
        "width": metrics.width * zoom,
        "height": metrics.height * zoom,
    })
}

/// Entropy for node spawn jitter. Native builds (tests) use a fixed seed.
fn host_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * u64::MAX as f64) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0x5eed
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Nodeboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
