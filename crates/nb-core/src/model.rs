//! Graph data model: points, nodes, and typed edges.
//!
//! Node positions live in world space. Edges carry an ordered endpoint pair
//! and a two-variant kind tag; direction matters for display only.

use crate::id::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A 2D point or offset. Used for both world and screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, k: f32) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl Div<f32> for Point {
    type Output = Point;
    fn div(self, k: f32) -> Point {
        Point::new(self.x / k, self.y / k)
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A labelled box on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    /// Top-left corner in world space.
    pub position: Point,
}

impl Node {
    pub fn new(id: NodeId, text: impl Into<String>, position: Point) -> Self {
        Self {
            id,
            text: text.into(),
            position,
        }
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// Relationship kind. The core attaches no meaning beyond the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Primary,
    Alias,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Primary => "primary",
            EdgeKind::Alias => "alias",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(EdgeKind::Primary),
            "alias" => Ok(EdgeKind::Alias),
            other => Err(format!("unknown edge kind `{other}`")),
        }
    }
}

/// A connection between two node ids.
///
/// Endpoints are not guaranteed to exist: the store accepts dangling
/// references and consumers skip edges whose endpoints are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    /// True if either endpoint is `node`. Lookup ignores direction.
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(10.0, 4.0);
        let b = Point::new(2.0, 1.0);
        assert_eq!(a - b, Point::new(8.0, 3.0));
        assert_eq!(a + b, Point::new(12.0, 5.0));
        assert_eq!(a * 0.5, Point::new(5.0, 2.0));
        assert_eq!(a / 2.0, Point::new(5.0, 2.0));
    }

    #[test]
    fn edge_kind_parses_and_serializes_lowercase() {
        assert_eq!("alias".parse::<EdgeKind>(), Ok(EdgeKind::Alias));
        assert_eq!("primary".parse::<EdgeKind>(), Ok(EdgeKind::Primary));
        assert!("Primary".parse::<EdgeKind>().is_err());
        assert_eq!(
            serde_json::to_string(&EdgeKind::Alias).unwrap(),
            "\"alias\""
        );
    }

    #[test]
    fn edge_touches_either_endpoint() {
        let a = NodeId::intern("touch_a");
        let b = NodeId::intern("touch_b");
        let c = NodeId::intern("touch_c");
        let edge = Edge {
            id: EdgeId::intern("touch_e"),
            from: a,
            to: b,
            kind: EdgeKind::Primary,
        };
        assert!(edge.touches(a));
        assert!(edge.touches(b));
        assert!(!edge.touches(c));
        assert!(!edge.is_self_loop());
    }
}
