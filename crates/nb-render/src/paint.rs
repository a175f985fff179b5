//! Filtered view → screen-space draw commands.
//!
//! Backend-agnostic: the WASM Canvas2D painter (and any future GPU path)
//! consumes the same `DrawList`. Edges are emitted first so node boxes
//! paint over their endpoints.

use crate::hit::{NodeMetrics, node_center, node_rect};
use kurbo::{Affine, Rect};
use nb_core::filter::FilteredView;
use nb_core::id::{EdgeId, NodeId};
use nb_core::model::{EdgeKind, Point};
use nb_core::transform::Camera;

/// One primitive for the backend to draw, in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Straight line between node centres.
    Edge {
        id: EdgeId,
        kind: EdgeKind,
        from: Point,
        to: Point,
    },
    /// Node box with its label.
    Node {
        id: NodeId,
        text: String,
        rect: Rect,
        selected: bool,
        editing: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
    /// Font scale matching the camera zoom.
    pub scale: f64,
}

/// What the painter needs besides the view itself.
#[derive(Debug, Clone, Copy)]
pub struct PaintContext<'a> {
    pub camera: &'a Camera,
    pub metrics: NodeMetrics,
    pub selected: Option<NodeId>,
    pub editing: Option<NodeId>,
}

/// World → screen affine: `translate(pan) * scale(zoom)`.
pub fn view_affine(camera: &Camera) -> Affine {
    Affine::translate((f64::from(camera.pan.x), f64::from(camera.pan.y)))
        * Affine::scale(f64::from(camera.zoom()))
}

/// Build the draw list for a filtered view.
///
/// Edges whose endpoints are not both in the view are skipped. That covers
/// dangling references as well as filtered-out endpoints.
pub fn build_draw_list(view: &FilteredView<'_>, cx: PaintContext<'_>) -> DrawList {
    let camera = cx.camera;
    let affine = view_affine(camera);
    let mut commands = Vec::with_capacity(view.nodes.len() + view.edges.len());

    for edge in &view.edges {
        let (Some(from), Some(to)) = (view.node(edge.from), view.node(edge.to)) else {
            log::trace!("skip edge {} with missing endpoint", edge.id);
            continue;
        };
        commands.push(DrawCmd::Edge {
            id: edge.id,
            kind: edge.kind,
            from: camera.world_to_screen(node_center(from, cx.metrics)),
            to: camera.world_to_screen(node_center(to, cx.metrics)),
        });
    }

    for node in &view.nodes {
        commands.push(DrawCmd::Node {
            id: node.id,
            text: node.text.clone(),
            rect: affine.transform_rect_bbox(node_rect(node, cx.metrics)),
            selected: cx.selected == Some(node.id),
            editing: cx.editing == Some(node.id),
        });
    }

    DrawList {
        commands,
        scale: f64::from(camera.zoom()),
    }
}
