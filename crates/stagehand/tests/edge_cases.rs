//! Edge case tests for diagram parsing and layout
//!
//! Boundary conditions, unusual inputs and silently dropped references.

use stagehand::ParsedDiagram;

// =============================================================================
// Empty Input Tests
// =============================================================================

mod empty_inputs {
    use stagehand::core::{LayoutAlgorithm, Parser};
    use stagehand::plugins::mindmap::*;
    use stagehand::plugins::pie::*;
    use stagehand::plugins::sequence::*;
    use stagehand::plugins::state::*;

    #[test]
    fn test_sequence_header_only() {
        let mut db = SequenceDatabase::new();
        SequenceParser::new().parse("sequenceDiagram\n", &mut db).unwrap();
        let layout = SequenceLayoutAlgorithm::new().layout(&db).unwrap();
        assert!(layout.actors.is_empty());
        assert_eq!(layout.height, 180.0);
    }

    #[test]
    fn test_state_whitespace_only() {
        let mut db = StateDatabase::new();
        StateParser::new().parse("   \n\n  \t  \n", &mut db).unwrap();
        assert!(db.states().is_empty());
    }

    #[test]
    fn test_pie_without_entries() {
        let mut db = PieDatabase::new();
        PieParser::new().parse("pie", &mut db).unwrap();
        let layout = PieLayoutAlgorithm::new().layout(&db).unwrap();
        assert!(layout.segments.is_empty());
        assert_eq!(layout.title, None);
    }

    #[test]
    fn test_mindmap_header_only() {
        let mut db = MindmapDatabase::new();
        MindmapParser::new().parse("mindmap\n%% nothing yet", &mut db).unwrap();
        let layout = MindmapLayoutAlgorithm::new().layout(&db).unwrap();
        assert!(layout.nodes.is_empty());
        assert!(layout.connections.is_empty());
    }
}

// =============================================================================
// Dropped and Skipped Input
// =============================================================================

#[test]
fn test_sequence_message_to_undeclared_actor_dropped() {
    let input = "sequenceDiagram\n    participant A\n    participant B\n    A->>C: lost\n    A->>B: kept";
    let ParsedDiagram::Sequence(layout) = stagehand::parse(input, None) else {
        panic!("expected sequence");
    };
    assert_eq!(layout.messages.len(), 1);
    assert_eq!(layout.messages[0].text, "kept");
    // Accepted messages are numbered without gaps
    assert_eq!(layout.messages[0].y, 120.0);
}

#[test]
fn test_pie_skips_invalid_values() {
    let input = "pie\n    \"A\" : 10\n    \"B\" : -5\n    \"C\" : lots\n    \"D\" : 30";
    let ParsedDiagram::Pie(pie) = stagehand::parse(input, None) else {
        panic!("expected pie");
    };
    let labels: Vec<&str> = pie.segments.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "D"]);
}

#[test]
fn test_flowchart_keyword_lines_skipped() {
    use stagehand::core::{Database, Parser};
    use stagehand::plugins::flowchart::{FlowchartDatabase, FlowchartParser};

    let input = "graph LR\n    classDef hot fill:#f00\n    A-->B; B-->C\n    class A hot\n    style B stroke:#333\n    click A callback";
    let mut db = FlowchartDatabase::new();
    FlowchartParser::new().parse(input, &mut db).unwrap();
    assert_eq!(db.node_count(), 3);
    assert_eq!(db.edge_count(), 2);
}

#[test]
fn test_state_cycle_uses_fallback_level() {
    let input = "stateDiagram-v2\n    A --> B\n    B --> A";
    let ParsedDiagram::State(layout) = stagehand::parse(input, None) else {
        panic!("expected state");
    };
    let a = layout.states.iter().find(|s| s.id == "A").unwrap();
    let b = layout.states.iter().find(|s| s.id == "B").unwrap();
    assert_eq!(a.level, 1);
    assert_eq!(b.level, 1);
    assert_eq!(a.position.x, b.position.x);
    assert_ne!(a.position.y, b.position.y);
}

#[test]
fn test_mindmap_tabs_count_as_two_columns() {
    let input = "mindmap\nroot((R))\n\tChild\n\t\tGrandchild";
    let ParsedDiagram::Mindmap(layout) = stagehand::parse(input, None) else {
        panic!("expected mindmap");
    };
    let depths: Vec<usize> = layout.nodes.iter().map(|n| n.depth).collect();
    assert_eq!(depths, vec![0, 1, 2]);
    assert_eq!(layout.nodes[2].parent, Some(layout.nodes[1].id));
}

#[test]
fn test_flowchart_numeric_ids_through_svg_ids() {
    use stagehand::core::{clean_node_id, FlowchartGeometry, NodeGeometry, Point};

    // Renderer ids for `1` and `2` clean back to the ids in the text
    let geometry = FlowchartGeometry::new(200.0, 200.0)
        .with_node(NodeGeometry::new(
            clean_node_id("flowchart-1-0"),
            Point::new(100.0, 50.0),
            60.0,
            30.0,
        ))
        .with_node(NodeGeometry::new(
            clean_node_id("flowchart-2-1"),
            Point::new(100.0, 150.0),
            60.0,
            30.0,
        ));
    let ParsedDiagram::Flowchart(layout) = stagehand::parse("graph TD\n1-->2", Some(&geometry)) else {
        panic!("expected flowchart");
    };
    assert_eq!(layout.nodes.len(), 2);
    assert_eq!(layout.edges.len(), 1);
}

#[test]
fn test_flowchart_without_geometry_is_empty() {
    let ParsedDiagram::Flowchart(layout) = stagehand::parse("graph TD\nA-->B-->C", None) else {
        panic!("expected flowchart");
    };
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
}
