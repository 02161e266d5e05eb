use crate::angles::Angle;
use crate::palette::Rgba;

// ── geometry ──────────────────────────────────────────────────────────────

/// Point in logical pixels (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ── nodes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Single line of monospaced text, horizontally centered on `anchor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Top-center of the text block.
    pub anchor: Point,
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgba,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgba,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
    pub fill: Option<Rgba>,
    pub stroke: Option<Stroke>,
}

/// Rectangle given by its unrotated center and size, then rotated clockwise
/// by `angle` about `pivot`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bar {
    pub center: Point,
    pub size: Size,
    pub pivot: Point,
    pub angle: Angle,
    pub color: Rgba,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HandKind {
    Hour,
    Minute,
    Second,
}

/// One element of the clock scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Background(Rgba),
    Title(Label),
    Digital(Label),
    Outline(Circle),
    Tick(Bar),
    Hand(HandKind, Bar),
    CenterDot(Circle),
}

/// Flat, back-to-front list of scene nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Nodes in paint order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ticks(&self) -> impl Iterator<Item = &Bar> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Tick(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn hand(&self, kind: HandKind) -> Option<&Bar> {
        self.nodes.iter().find_map(|n| match n {
            Node::Hand(k, bar) if *k == kind => Some(bar),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Title(l) | Node::Digital(l) => Some(l),
            _ => None,
        })
    }
}
