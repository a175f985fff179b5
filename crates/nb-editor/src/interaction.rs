//! Pointer interaction state machine.
//!
//! Translates pointer and wheel input into `Effect`s that the `Editor`
//! applies to the graph store, camera, and session. The machine itself only
//! reads the store and camera.
//!
//! ```text
//!            down on node (single tap)            move: node := world(p) - grab
//!   Idle ───────────────────────────────▶ DraggingNode ─┐
//!    ▲  │                                      │        │
//!    │  │ down on canvas                       │ up / leave
//!    │  ▼                                      ▼
//!    │ PanningCanvas ── move: pan := p - anchor
//!    └──────────────── up / leave ─────────────┘
//! ```
//!
//! A down on a node that pairs with the previous press as a double tap
//! enters edit mode instead of starting a drag.

use crate::gesture::{DoubleTapDetector, Tap};
use crate::input::{Channel, InputEvent};
use nb_core::id::NodeId;
use nb_core::model::Point;
use nb_core::store::GraphStore;
use nb_core::transform::Camera;
use smallvec::{SmallVec, smallvec};

/// The active pointer gesture. Dragging and panning at once is not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// `grab_offset` is the pointer's world position minus the node's
    /// position at press time, so the node keeps its spot under the finger.
    DraggingNode { node: NodeId, grab_offset: Point },
    /// `anchor` is the press position minus the pan at press time.
    PanningCanvas { anchor: Point },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

/// A state change requested by the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Select(NodeId),
    ClearSelection,
    EnterEdit(NodeId),
    MoveNode { id: NodeId, position: Point },
    SetPan(Point),
    ZoomBy(f32),
}

pub type Effects = SmallVec<[Effect; 2]>;

/// Multiplicative zoom steps for the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSteps {
    pub zoom_in: f32,
    pub zoom_out: f32,
}

impl Default for WheelSteps {
    fn default() -> Self {
        Self {
            zoom_in: 1.1,
            zoom_out: 0.9,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InteractionMachine {
    state: Interaction,
    taps: DoubleTapDetector,
    wheel: WheelSteps,
}

impl Default for InteractionMachine {
    fn default() -> Self {
        Self::new(300.0, WheelSteps::default())
    }
}

impl InteractionMachine {
    pub fn new(double_tap_ms: f64, wheel: WheelSteps) -> Self {
        Self {
            state: Interaction::Idle,
            taps: DoubleTapDetector::new(double_tap_ms),
            wheel,
        }
    }

    pub fn state(&self) -> Interaction {
        self.state
    }

    /// Handle one event. `hit` is the node under the pointer for
    /// `PointerDown`, resolved by the caller's hit test.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<NodeId>,
        store: &GraphStore,
        camera: &Camera,
    ) -> Effects {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                channel,
                time_ms,
            } => self.pointer_down(Point::new(*x, *y), *channel, *time_ms, hit, store, camera),
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Point::new(*x, *y), camera),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave { .. } => {
                self.release();
                SmallVec::new()
            }
            InputEvent::Wheel { delta_y } => self.wheel(*delta_y),
            InputEvent::Key { .. } => SmallVec::new(),
        }
    }

    fn pointer_down(
        &mut self,
        pointer: Point,
        channel: Channel,
        time_ms: f64,
        hit: Option<NodeId>,
        store: &GraphStore,
        camera: &Camera,
    ) -> Effects {
        if !self.state.is_idle() {
            log::debug!("press during {:?}, discarding previous gesture", self.state);
            self.state = Interaction::Idle;
        }

        // A hit on a node that has since been deleted counts as canvas.
        if let Some(node) = hit.and_then(|id| store.node(id)) {
            let id = node.id;
            if self.taps.register(channel, time_ms) == Tap::Double {
                log::debug!("double tap on {id}, entering edit");
                return smallvec![Effect::Select(id), Effect::EnterEdit(id)];
            }
            let grab_offset = camera.screen_to_world(pointer) - node.position;
            self.state = Interaction::DraggingNode {
                node: id,
                grab_offset,
            };
            log::debug!("drag start {id}");
            return smallvec![Effect::Select(id)];
        }

        self.state = Interaction::PanningCanvas {
            anchor: pointer - camera.pan,
        };
        log::debug!("pan start");
        smallvec![Effect::ClearSelection]
    }

    fn pointer_move(&mut self, pointer: Point, camera: &Camera) -> Effects {
        match self.state {
            Interaction::Idle => SmallVec::new(),
            Interaction::DraggingNode { node, grab_offset } => smallvec![Effect::MoveNode {
                id: node,
                position: camera.screen_to_world(pointer) - grab_offset,
            }],
            Interaction::PanningCanvas { anchor } => smallvec![Effect::SetPan(pointer - anchor)],
        }
    }

    /// End any gesture. Pointer up and leave are the only cancellation.
    pub fn release(&mut self) {
        if !self.state.is_idle() {
            log::debug!("gesture end {:?}", self.state);
        }
        self.state = Interaction::Idle;
    }

    fn wheel(&mut self, delta_y: f32) -> Effects {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return SmallVec::new();
        }
        let factor = if delta_y < 0.0 {
            self.wheel.zoom_in
        } else {
            self.wheel.zoom_out
        };
        smallvec![Effect::ZoomBy(factor)]
    }
}
