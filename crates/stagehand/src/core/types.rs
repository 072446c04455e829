//! Core type definitions shared by every dialect
//!
//! Coordinates are `f64` in an abstract plane with y growing downward. Units
//! are consistent within one diagram but not across dialects.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The diagram sub-languages this crate understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramDialect {
    Flowchart,
    Sequence,
    Pie,
    State,
    Mindmap,
    Unknown,
}

impl DiagramDialect {
    /// Every recognized dialect, in classification order
    pub fn supported() -> &'static [DiagramDialect] {
        &[
            DiagramDialect::Flowchart,
            DiagramDialect::Sequence,
            DiagramDialect::Pie,
            DiagramDialect::State,
            DiagramDialect::Mindmap,
        ]
    }

    /// One-line human description
    pub fn description(&self) -> &'static str {
        match self {
            DiagramDialect::Flowchart => "Flowcharts laid out from renderer geometry",
            DiagramDialect::Sequence => "Sequence diagrams with actor lanes and messages",
            DiagramDialect::Pie => "Pie charts sliced clockwise from twelve o'clock",
            DiagramDialect::State => "State diagrams leveled left to right",
            DiagramDialect::Mindmap => "Mindmaps placed radially around the root",
            DiagramDialect::Unknown => "Unrecognized input",
        }
    }
}

impl fmt::Display for DiagramDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramDialect::Flowchart => write!(f, "flowchart"),
            DiagramDialect::Sequence => write!(f, "sequence"),
            DiagramDialect::Pie => write!(f, "pie"),
            DiagramDialect::State => write!(f, "state"),
            DiagramDialect::Mindmap => write!(f, "mindmap"),
            DiagramDialect::Unknown => write!(f, "unknown"),
        }
    }
}

/// A point in diagram space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` in direction `angle` (radians, clockwise with y down)
    pub fn polar_offset(&self, angle: f64, radius: f64) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
        }
    }
}

/// Axis-aligned box described by its center
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub center: Point,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.center.y + self.height / 2.0
    }
}

/// Flowchart node shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    /// Rectangle: `A[label]`
    #[default]
    Rectangle,
    /// Rounded rectangle (stadium): `A(label)`
    RoundedRect,
    /// Diamond (decision): `A{label}`
    Diamond,
    /// Circle: `A((label))`
    Circle,
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Rectangle => write!(f, "rectangle"),
            NodeShape::RoundedRect => write!(f, "rounded"),
            NodeShape::Diamond => write!(f, "diamond"),
            NodeShape::Circle => write!(f, "circle"),
        }
    }
}

/// Flowchart connector styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// Solid arrow: `-->`
    #[default]
    Arrow,
    /// Dotted arrow: `-.->`
    DottedArrow,
    /// Thick arrow: `==>`
    ThickArrow,
    /// Solid line (no arrow): `---`
    Line,
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeStyle::Arrow => write!(f, "-->"),
            EdgeStyle::DottedArrow => write!(f, "-.->"),
            EdgeStyle::ThickArrow => write!(f, "==>"),
            EdgeStyle::Line => write!(f, "---"),
        }
    }
}

/// Sequence message line style; dashed marks a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Flow direction declared in a flowchart header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub enum Direction {
    /// Top to bottom (TD or TB)
    #[default]
    TopDown,
    /// Left to right (LR)
    LeftRight,
    /// Right to left (RL)
    RightLeft,
    /// Bottom to top (BT)
    BottomUp,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TD" | "TB" => Ok(Direction::TopDown),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            "BT" => Ok(Direction::BottomUp),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => write!(f, "TD"),
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
            Direction::BottomUp => write!(f, "BT"),
        }
    }
}
