//! Property tests for layout and sequencing invariants

use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, TAU};

use stagehand::core::graph::topological_order;
use stagehand::prelude::*;

// ===================
// Strategies
// ===================

fn pie_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..1000.0, 1..12)
}

/// Random DAG over `n` nodes: edges only run from lower to higher index
fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..10).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..20).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect::<Vec<_>>()
        });
        (Just(n), edges)
    })
}

/// Acyclic graph plus one renderer y-position per node
fn flowchart_case() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<f64>)> {
    dag().prop_flat_map(|(n, edges)| {
        (Just(n), Just(edges), prop::collection::vec(0.0f64..1000.0, n))
    })
}

/// Declared actors plus messages that may name undeclared ones
fn sequence_case() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..5, prop::collection::vec((0usize..6, 0usize..6), 0..12))
}

/// Transitions between `[*]` (index 0) and states S1..S6
fn state_case() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..7, 0usize..7), 0..12)
}

fn mindmap_labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z]{1,8}", 0..10)
}

fn pie_text(values: &[f64]) -> String {
    let mut text = String::from("pie title Random\n");
    for (i, value) in values.iter().enumerate() {
        text.push_str(&format!("    \"S{i}\" : {value}\n"));
    }
    text
}

fn flowchart_input(n: usize, edges: &[(usize, usize)], ys: &[f64]) -> (String, FlowchartGeometry) {
    let mut text = String::from("graph TD\n");
    for i in 0..n {
        text.push_str(&format!("    N{i}\n"));
    }
    for (from, to) in edges {
        text.push_str(&format!("    N{from} --> N{to}\n"));
    }

    // Renderer order is the reverse of the text order
    let mut geometry = FlowchartGeometry::new(400.0, 1000.0);
    for i in (0..n).rev() {
        geometry.push(NodeGeometry::new(
            format!("N{i}"),
            Point::new(100.0 + i as f64 * 10.0, ys[i]),
            40.0,
            20.0,
        ));
    }
    (text, geometry)
}

fn sequence_text(actors: usize, messages: &[(usize, usize)]) -> String {
    let mut text = String::from("sequenceDiagram\n");
    for i in 0..actors {
        text.push_str(&format!("    participant P{i}\n"));
    }
    for (k, (from, to)) in messages.iter().enumerate() {
        text.push_str(&format!("    P{from}->>P{to}: m{k}\n"));
    }
    text
}

fn state_text(transitions: &[(usize, usize)]) -> String {
    let name = |i: usize| if i == 0 { "[*]".to_string() } else { format!("S{i}") };
    let mut text = String::from("stateDiagram-v2\n");
    for &(from, to) in transitions {
        text.push_str(&format!("    {} --> {}\n", name(from), name(to)));
    }
    text
}

fn mindmap_text(labels: &[String]) -> String {
    let mut text = String::from("mindmap\n  root((Root))\n");
    for (i, label) in labels.iter().enumerate() {
        let indent = if i % 2 == 0 { 4 } else { 6 };
        text.push_str(&format!("{}{}\n", " ".repeat(indent), label));
    }
    text
}

/// Number of elements a diagram's layout holds
fn element_count(diagram: &ParsedDiagram) -> usize {
    match diagram {
        ParsedDiagram::Flowchart(l) => l.nodes.len() + l.edges.len(),
        ParsedDiagram::Sequence(l) => l.actors.len() + l.messages.len(),
        ParsedDiagram::Pie(l) => 1 + l.segments.len(),
        ParsedDiagram::State(l) => l.states.len() + l.transitions.len(),
        ParsedDiagram::Mindmap(l) => l.nodes.len() + l.connections.len(),
        ParsedDiagram::Unsupported => 0,
    }
}

// ===================
// Property Test Functions
// ===================

/// Slices are contiguous and cover exactly one turn from twelve o'clock.
fn check_pie_angles(values: Vec<f64>) -> Result<(), TestCaseError> {
    let ParsedDiagram::Pie(pie) = stagehand::parse(&pie_text(&values), None) else {
        return Err(TestCaseError::fail("expected pie"));
    };

    prop_assert_eq!(pie.segments.len(), values.len());
    prop_assert_eq!(pie.segments[0].start_angle, -FRAC_PI_2);
    for pair in pie.segments.windows(2) {
        prop_assert_eq!(pair[0].end_angle, pair[1].start_angle);
    }
    let last = &pie.segments[pie.segments.len() - 1];
    prop_assert_eq!(last.end_angle, -FRAC_PI_2 + TAU);

    let swept: f64 = pie.segments.iter().map(|s| s.end_angle - s.start_angle).sum();
    prop_assert!((swept - TAU).abs() < 1e-9);
    Ok(())
}

/// Every edge of an acyclic graph points forward in the order.
fn check_topological_validity(n: usize, edges: Vec<(usize, usize)>) -> Result<(), TestCaseError> {
    let order = topological_order(n, &edges, |i| (n - i) as f64);
    prop_assert_eq!(order.len(), n);

    let mut rank = vec![0; n];
    for (position, &node) in order.iter().enumerate() {
        rank[node] = position;
    }
    for (from, to) in edges {
        prop_assert!(rank[from] < rank[to]);
    }
    Ok(())
}

/// Slots are 0..n in entry order, one per element; nothing is revealed
/// later than its own slot.
fn check_slots_gapless(diagram: &ParsedDiagram) -> Result<(), TestCaseError> {
    prop_assert!(diagram.is_supported());
    let sequencer = Sequencer::new(diagram, AnimationConfig::default());
    prop_assert_eq!(sequencer.entries().len(), element_count(diagram));
    for (expected, entry) in sequencer.entries().iter().enumerate() {
        prop_assert_eq!(entry.slot, expected);
        prop_assert!(entry.reveal_slot <= entry.slot);
    }
    Ok(())
}

/// Laid out flowchart nodes are a topological order of the laid out edges.
fn check_flowchart_order(n: usize, edges: Vec<(usize, usize)>, ys: Vec<f64>) -> Result<(), TestCaseError> {
    let (text, geometry) = flowchart_input(n, &edges, &ys);
    let ParsedDiagram::Flowchart(layout) = stagehand::parse(&text, Some(&geometry)) else {
        return Err(TestCaseError::fail("expected flowchart"));
    };

    prop_assert_eq!(layout.nodes.len(), n);
    prop_assert_eq!(layout.edges.len(), edges.len());
    let position = |id: &str| layout.nodes.iter().position(|node| node.id == id);
    for edge in &layout.edges {
        let from = position(&edge.from);
        let to = position(&edge.to);
        prop_assert!(from.is_some() && to.is_some());
        prop_assert!(from < to, "{} placed after {}", edge.from, edge.to);
    }
    Ok(())
}

/// Parsing the same text twice gives identical layouts.
fn check_idempotent(text: &str) -> Result<(), TestCaseError> {
    let first = stagehand::parse(text, None);
    prop_assert!(first.is_supported());
    prop_assert_eq!(first, stagehand::parse(text, None));
    Ok(())
}

/// Opacity never decreases as frames advance.
fn check_opacity_monotonic(frames_per_element: u32, frame: u64) -> Result<(), TestCaseError> {
    let diagram = stagehand::parse("pie\n\"A\" : 1\n\"B\" : 2\n\"C\" : 3", None);
    let sequencer = Sequencer::new(&diagram, AnimationConfig::new(frames_per_element));
    let now = sequencer.frame(frame);
    let next = sequencer.frame(frame + 1);
    for (a, b) in now.opacities.iter().zip(&next.opacities) {
        prop_assert!((0.0..=1.0).contains(a));
        prop_assert!(a <= b);
    }
    prop_assert!(now.progress.visible <= next.progress.visible);
    Ok(())
}

proptest! {
    #[test]
    fn pie_angles_are_contiguous(values in pie_values()) {
        check_pie_angles(values)?;
    }

    #[test]
    fn topological_order_respects_edges((n, edges) in dag()) {
        check_topological_validity(n, edges)?;
    }

    #[test]
    fn flowchart_nodes_follow_edges((n, edges, ys) in flowchart_case()) {
        check_flowchart_order(n, edges, ys)?;
    }

    #[test]
    fn flowchart_slots_are_gapless((n, edges, ys) in flowchart_case()) {
        let (text, geometry) = flowchart_input(n, &edges, &ys);
        check_slots_gapless(&stagehand::parse(&text, Some(&geometry)))?;
    }

    #[test]
    fn sequence_slots_are_gapless((actors, messages) in sequence_case()) {
        check_slots_gapless(&stagehand::parse(&sequence_text(actors, &messages), None))?;
    }

    #[test]
    fn pie_slots_are_gapless(values in pie_values()) {
        check_slots_gapless(&stagehand::parse(&pie_text(&values), None))?;
    }

    #[test]
    fn state_slots_are_gapless(transitions in state_case()) {
        check_slots_gapless(&stagehand::parse(&state_text(&transitions), None))?;
    }

    #[test]
    fn mindmap_slots_are_gapless(labels in mindmap_labels()) {
        check_slots_gapless(&stagehand::parse(&mindmap_text(&labels), None))?;
    }

    #[test]
    fn pie_parsing_is_idempotent(values in pie_values()) {
        check_idempotent(&pie_text(&values))?;
    }

    #[test]
    fn sequence_parsing_is_idempotent((actors, messages) in sequence_case()) {
        check_idempotent(&sequence_text(actors, &messages))?;
    }

    #[test]
    fn state_parsing_is_idempotent(transitions in state_case()) {
        check_idempotent(&state_text(&transitions))?;
    }

    #[test]
    fn mindmap_parsing_is_idempotent(labels in mindmap_labels()) {
        check_idempotent(&mindmap_text(&labels))?;
    }

    #[test]
    fn opacity_is_monotonic(frames_per_element in 0u32..60, frame in 0u64..400) {
        check_opacity_monotonic(frames_per_element, frame)?;
    }
}

#[test]
fn test_zero_total_pie_has_no_segments() {
    let diagram = stagehand::parse("pie title Empty\n\"A\" : 0\n\"B\" : 0", None);
    let ParsedDiagram::Pie(pie) = diagram else {
        panic!("expected pie");
    };
    assert!(pie.segments.is_empty());
    assert_eq!(pie.title.as_deref(), Some("Empty"));
}
