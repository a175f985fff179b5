//! Hit testing: world point → node lookup.
//!
//! Walks the visible nodes back to front (last painted = topmost) and
//! returns the first whose box contains the point.

use kurbo::Rect;
use nb_core::id::NodeId;
use nb_core::model::{Node, Point};

/// Node box dimensions in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self {
            width: 140.0,
            height: 44.0,
        }
    }
}

impl From<&nb_core::EditorConfig> for NodeMetrics {
    fn from(config: &nb_core::EditorConfig) -> Self {
        Self {
            width: config.node_width,
            height: config.node_height,
        }
    }
}

/// World-space box of a node. The node position is its top-left corner.
pub fn node_rect(node: &Node, metrics: NodeMetrics) -> Rect {
    let x = f64::from(node.position.x);
    let y = f64::from(node.position.y);
    Rect::new(
        x,
        y,
        x + f64::from(metrics.width),
        y + f64::from(metrics.height),
    )
}

/// World-space centre of a node box, where edges attach.
pub fn node_center(node: &Node, metrics: NodeMetrics) -> Point {
    Point::new(
        node.position.x + metrics.width / 2.0,
        node.position.y + metrics.height / 2.0,
    )
}

/// Find the topmost node at `world`. `None` means the press landed on
/// empty canvas.
pub fn hit_test<'a, I>(nodes: I, metrics: NodeMetrics, world: Point) -> Option<NodeId>
where
    I: IntoIterator<Item = &'a Node>,
    I::IntoIter: DoubleEndedIterator,
{
    let p = kurbo::Point::new(f64::from(world.x), f64::from(world.y));
    nodes
        .into_iter()
        .rev()
        .find(|node| node_rect(node, metrics).contains(p))
        .map(|node| node.id)
}
