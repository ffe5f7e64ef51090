use strata::model::{VertexKind, build_graph};
use strata::{Error, Node, TreeGraph};

#[test]
fn model_build_graph_keeps_input_order_and_defaults_row_hints() {
    let mut input = TreeGraph::new();
    input
        .add_node(Node::new("a"))
        .add_node(Node::new("b").with_row_hint(7.5).with_priority(3.0))
        .add_edge("a", "b")
        .add_edge("a", "b");
    let g = build_graph(&input).unwrap();

    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 1);
    let a = g.node_by_id("a").unwrap();
    let b = g.node_by_id("b").unwrap();
    assert_eq!(a.kind, VertexKind::Real { node: 0 });
    assert_eq!(a.row_hint, 0.0);
    assert_eq!(b.row_hint, 7.5);
    assert_eq!(b.priority, Some(3.0));
    assert!(!b.is_dummy());
}

#[test]
fn model_validate_reports_the_first_problem() {
    let mut input = TreeGraph::new();
    input.add_node(Node::new("a")).add_edge("a", "ghost");
    assert_eq!(
        input.validate(),
        Err(Error::MissingEndpoint {
            from: "a".to_string(),
            to: "ghost".to_string(),
        })
    );

    let empty = TreeGraph::new();
    assert!(empty.is_empty());
    assert_eq!(empty.validate(), Ok(()));
}
