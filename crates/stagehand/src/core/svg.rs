//! Geometry extraction from rendered flowchart SVG
//!
//! A node is a `<g>` element whose class list contains `node`. Its position
//! is the sum of every `translate(..)` on the enclosing groups; its size and
//! shape come from the first `rect`, `polygon`, `circle` or `path` inside it,
//! and its label is the text content inside it.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::{debug, span, trace, Level};

use super::{clean_node_id, DiagramError, FlowchartGeometry, GeometrySource, NodeGeometry, NodeShape, Point};

/// Geometry source backed by a pre-rendered SVG document
#[derive(Debug, Clone)]
pub struct SvgGeometrySource {
    svg: String,
}

impl SvgGeometrySource {
    pub fn new(svg: impl Into<String>) -> Self {
        Self { svg: svg.into() }
    }

    /// Load the SVG document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DiagramError> {
        let svg = std::fs::read_to_string(path)?;
        Ok(Self { svg })
    }

    /// Decode the held document
    pub fn geometry(&self) -> Result<FlowchartGeometry, DiagramError> {
        parse_svg_geometry(&self.svg)
    }
}

impl GeometrySource for SvgGeometrySource {
    fn render(&self, _text: &str) -> impl Future<Output = anyhow::Result<FlowchartGeometry>> + Send {
        std::future::ready(self.geometry().map_err(anyhow::Error::from))
    }
}

/// A node group being collected
#[derive(Debug)]
struct PendingNode {
    id: String,
    origin: Point,
    shape: Option<(NodeShape, Point, f64, f64)>,
    label: Vec<String>,
}

/// One open `<g>` element
#[derive(Debug, Clone, Copy)]
struct Frame {
    offset: Point,
    node: Option<usize>,
}

/// Decode flowchart node geometry from an SVG document
pub fn parse_svg_geometry(svg: &str) -> Result<FlowchartGeometry, DiagramError> {
    let span = span!(Level::DEBUG, "parse_svg_geometry", bytes = svg.len());
    let _enter = span.enter();

    let mut reader = Reader::from_str(svg);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut pending: Vec<PendingNode> = Vec::new();
    let mut viewport: Option<(f64, f64)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let attrs = attributes(e);
                match local_name(e).as_str() {
                    "svg" if viewport.is_none() => viewport = svg_viewport(&attrs),
                    "g" => {
                        let frame = open_group(&attrs, frames.last().copied(), &mut pending);
                        frames.push(frame);
                    }
                    name => record_shape(name, &attrs, frames.last().copied(), &mut pending),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let attrs = attributes(e);
                match local_name(e).as_str() {
                    "svg" if viewport.is_none() => viewport = svg_viewport(&attrs),
                    "g" => {
                        // An empty node group still counts as a node
                        open_group(&attrs, frames.last().copied(), &mut pending);
                    }
                    name => record_shape(name, &attrs, frames.last().copied(), &mut pending),
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.decode().unwrap_or_default().trim().to_string();
                if let Some(index) = frames.last().and_then(|f| f.node) {
                    if !text.is_empty() {
                        pending[index].label.push(text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"g" {
                    frames.pop();
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DiagramError::geometry_error(format!(
                    "SVG parse error at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
        buf.clear();
    }

    let mut geometry = FlowchartGeometry::default();
    for node in pending {
        let (shape, center, width, height) = node
            .shape
            .unwrap_or((NodeShape::Rectangle, node.origin, 0.0, 0.0));
        let mut rendered = NodeGeometry::new(node.id, center, width, height).with_shape(shape);
        if !node.label.is_empty() {
            rendered = rendered.with_label(node.label.join(" "));
        }
        trace!(id = %rendered.id, shape = %rendered.shape, "Decoded node geometry");
        geometry.push(rendered);
    }

    let (width, height) = viewport.unwrap_or_else(|| extent(&geometry));
    geometry.width = width;
    geometry.height = height;

    debug!(
        node_count = geometry.nodes.len(),
        width = geometry.width,
        height = geometry.height,
        "Decoded flowchart geometry"
    );
    Ok(geometry)
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

fn attributes(e: &BytesStart) -> HashMap<String, String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            (
                String::from_utf8_lossy(a.key.as_ref()).to_string(),
                String::from_utf8_lossy(&a.value).to_string(),
            )
        })
        .collect()
}

fn open_group(
    attrs: &HashMap<String, String>,
    parent: Option<Frame>,
    pending: &mut Vec<PendingNode>,
) -> Frame {
    let base = parent.map(|f| f.offset).unwrap_or_default();
    let shift = attrs.get("transform").map(|t| translation(t)).unwrap_or_default();
    let offset = Point::new(base.x + shift.x, base.y + shift.y);

    let is_node = attrs
        .get("class")
        .is_some_and(|c| c.split_whitespace().any(|class| class == "node"));

    let node = match (is_node, attrs.get("id")) {
        (true, Some(raw_id)) => {
            pending.push(PendingNode {
                id: clean_node_id(raw_id),
                origin: offset,
                shape: None,
                label: Vec::new(),
            });
            Some(pending.len() - 1)
        }
        _ => parent.and_then(|f| f.node),
    };

    Frame { offset, node }
}

fn record_shape(
    name: &str,
    attrs: &HashMap<String, String>,
    frame: Option<Frame>,
    pending: &mut [PendingNode],
) {
    let Some(frame) = frame else { return };
    let Some(index) = frame.node else { return };
    if pending[index].shape.is_some() {
        return;
    }

    let own = attrs.get("transform").map(|t| translation(t)).unwrap_or_default();
    let origin = Point::new(frame.offset.x + own.x, frame.offset.y + own.y);
    let number = |key: &str| attrs.get(key).and_then(|v| parse_length(v));

    let shape = match name {
        "rect" => {
            let width = number("width").unwrap_or(0.0);
            let height = number("height").unwrap_or(0.0);
            let x = number("x").unwrap_or(-width / 2.0);
            let y = number("y").unwrap_or(-height / 2.0);
            let rounded = number("rx").is_some_and(|rx| rx > 0.0);
            let kind = if rounded {
                NodeShape::RoundedRect
            } else {
                NodeShape::Rectangle
            };
            Some((
                kind,
                Point::new(origin.x + x + width / 2.0, origin.y + y + height / 2.0),
                width,
                height,
            ))
        }
        "polygon" => attrs.get("points").and_then(|p| polygon_box(p)).map(|(min, max)| {
            (
                NodeShape::Diamond,
                Point::new(origin.x + (min.x + max.x) / 2.0, origin.y + (min.y + max.y) / 2.0),
                max.x - min.x,
                max.y - min.y,
            )
        }),
        "path" => attrs.get("d").and_then(|d| path_box(d)).map(|(min, max)| {
            (
                NodeShape::Rectangle,
                Point::new(origin.x + (min.x + max.x) / 2.0, origin.y + (min.y + max.y) / 2.0),
                max.x - min.x,
                max.y - min.y,
            )
        }),
        "circle" => {
            let r = number("r").unwrap_or(0.0);
            let cx = number("cx").unwrap_or(0.0);
            let cy = number("cy").unwrap_or(0.0);
            Some((
                NodeShape::Circle,
                Point::new(origin.x + cx, origin.y + cy),
                r * 2.0,
                r * 2.0,
            ))
        }
        _ => None,
    };

    if shape.is_some() {
        pending[index].shape = shape;
    }
}

/// Sum of every `translate(x[, y])` in a transform attribute
fn translation(transform: &str) -> Point {
    let mut total = Point::default();
    let mut rest = transform;
    while let Some(start) = rest.find("translate(") {
        let after = &rest[start + "translate(".len()..];
        let Some(close) = after.find(')') else { break };
        let values: Vec<f64> = after[..close]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        total.x += values.first().copied().unwrap_or(0.0);
        total.y += values.get(1).copied().unwrap_or(0.0);
        rest = &after[close..];
    }
    total
}

fn polygon_box(points: &str) -> Option<(Point, Point)> {
    let values: Vec<f64> = points
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();
    if values.len() < 2 {
        return None;
    }
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for pair in values.chunks_exact(2) {
        min.x = min.x.min(pair[0]);
        min.y = min.y.min(pair[1]);
        max.x = max.x.max(pair[0]);
        max.y = max.y.max(pair[1]);
    }
    Some((min, max))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathToken {
    Command(char),
    Number(f64),
}

/// Split path data into commands and numbers. Numbers may run together
/// (`10-20`, `.5.5`) as path grammar allows.
fn path_tokens(data: &str) -> Vec<PathToken> {
    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_alphabetic() {
            tokens.push(PathToken::Command(c as char));
            i += 1;
        } else if c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.') {
            let start = i;
            let mut seen_dot = c == b'.';
            i += 1;
            while i < bytes.len() {
                match bytes[i] {
                    b'0'..=b'9' => i += 1,
                    b'.' if !seen_dot => {
                        seen_dot = true;
                        i += 1;
                    }
                    b'e' | b'E' => {
                        i += 1;
                        if i < bytes.len() && matches!(bytes[i], b'-' | b'+') {
                            i += 1;
                        }
                        seen_dot = true;
                    }
                    _ => break,
                }
            }
            if let Ok(n) = data[start..i].parse() {
                tokens.push(PathToken::Number(n));
            }
        } else {
            i += 1;
        }
    }
    tokens
}

/// Bounding box of path data, control points included.
///
/// Arcs contribute their endpoints plus a box of their radii around the
/// chord midpoint, which covers half-circle arcs exactly.
fn path_box(data: &str) -> Option<(Point, Point)> {
    let tokens = path_tokens(data);
    let mut points = Vec::new();
    let mut current = Point::default();
    let mut subpath_start = Point::default();
    let mut command = 'M';
    let mut i = 0;

    while i < tokens.len() {
        if let PathToken::Command(c) = tokens[i] {
            command = c;
            i += 1;
            if c.eq_ignore_ascii_case(&'z') {
                current = subpath_start;
                continue;
            }
        }

        let arity = match command.to_ascii_uppercase() {
            'M' | 'L' | 'T' => 2,
            'H' | 'V' => 1,
            'S' | 'Q' => 4,
            'C' => 6,
            'A' => 7,
            _ => break,
        };
        let args: Vec<f64> = tokens[i..]
            .iter()
            .take(arity)
            .map_while(|t| match t {
                PathToken::Number(n) => Some(*n),
                PathToken::Command(_) => None,
            })
            .collect();
        if args.len() < arity {
            break;
        }
        i += arity;

        let relative = command.is_ascii_lowercase();
        let base = if relative { current } else { Point::default() };
        let end = match command.to_ascii_uppercase() {
            'H' => Point::new(base.x + args[0], current.y),
            'V' => Point::new(current.x, base.y + args[0]),
            'A' => {
                let end = Point::new(base.x + args[5], base.y + args[6]);
                let mid = Point::new((current.x + end.x) / 2.0, (current.y + end.y) / 2.0);
                let (rx, ry) = (args[0].abs(), args[1].abs());
                points.push(Point::new(mid.x - rx, mid.y - ry));
                points.push(Point::new(mid.x + rx, mid.y + ry));
                end
            }
            _ => {
                for pair in args.chunks_exact(2) {
                    points.push(Point::new(base.x + pair[0], base.y + pair[1]));
                }
                Point::new(base.x + args[arity - 2], base.y + args[arity - 1])
            }
        };
        points.push(end);

        if command.eq_ignore_ascii_case(&'m') {
            subpath_start = end;
            // Pairs following a moveto are linetos
            command = if relative { 'l' } else { 'L' };
        }
        current = end;
    }

    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}

fn parse_length(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").parse().ok()
}

fn svg_viewport(attrs: &HashMap<String, String>) -> Option<(f64, f64)> {
    let from_view_box = attrs.get("viewBox").and_then(|vb| {
        let values: Vec<f64> = vb
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        (values.len() == 4).then(|| (values[2], values[3]))
    });
    from_view_box.or_else(|| {
        let width = attrs.get("width").and_then(|v| parse_length(v))?;
        let height = attrs.get("height").and_then(|v| parse_length(v))?;
        Some((width, height))
    })
}

fn extent(geometry: &FlowchartGeometry) -> (f64, f64) {
    geometry.nodes.iter().fold((0.0_f64, 0.0_f64), |(w, h), node| {
        (w.max(node.bounds.right()), h.max(node.bounds.bottom()))
    })
}
