use strata::compact;
use strata::graphlib::NodeIx;
use strata::model::build_graph;
use strata::split::Placement;
use strata::{Node, TreeGraph};

/// A placement of edgeless vertices at the given `(layer, row)` cells.
fn placement(cells: &[(usize, f64)]) -> (Placement, Vec<NodeIx>) {
    let mut input = TreeGraph::new();
    for i in 0..cells.len() {
        input.add_node(Node::new(format!("v{i}")));
    }
    let g = build_graph(&input).unwrap();
    let mut p = Placement::new(&g);
    for (i, &(layer, row)) in cells.iter().enumerate() {
        p.layer[i] = layer;
        p.row[i] = row;
    }
    (p, g.node_indices().collect())
}

#[test]
fn compact_removes_interior_empty_rows() {
    let (mut p, members) = placement(&[(0, 0.0), (1, 3.0), (0, 5.0)]);
    let removed = compact::remove_empty_rows(&mut p, &members, 1.0);

    assert_eq!(removed, 3);
    assert_eq!(p.row, vec![0.0, 1.0, 2.0]);
}

#[test]
fn compact_leaves_dense_layouts_alone() {
    let (mut p, members) = placement(&[(0, 0.0), (0, 1.0), (1, 0.0), (1, 2.0), (2, 1.0)]);
    let before = p.clone();
    assert_eq!(compact::remove_empty_rows(&mut p, &members, 1.0), 0);
    assert_eq!(p, before);
}

#[test]
fn compact_keeps_gaps_needed_for_spacing() {
    let (mut p, members) = placement(&[(0, 0.0), (0, 3.0), (1, 3.0)]);
    assert_eq!(compact::remove_empty_rows(&mut p, &members, 3.0), 0);
    assert_eq!(p.row, vec![0.0, 3.0, 3.0]);
}

#[test]
fn compact_closes_a_gap_only_as_far_as_spacing_allows() {
    let (mut p, members) = placement(&[(0, 0.0), (0, 4.0), (1, 4.0)]);
    assert_eq!(compact::remove_empty_rows(&mut p, &members, 2.0), 2);
    assert_eq!(p.row, vec![0.0, 2.0, 2.0]);
}

#[test]
fn compact_ignores_vertices_outside_members() {
    let (mut p, members) = placement(&[(0, 0.0), (0, 2.0), (1, 1.0)]);
    let removed = compact::remove_empty_rows(&mut p, &members[..2], 1.0);
    assert_eq!(removed, 1);
    assert_eq!(p.row, vec![0.0, 1.0, 1.0]);
}
