use strata::layers::LayerGraph;
use strata::position::segments::{self, Segment};

#[test]
fn segments_round_half_toward_zero() {
    assert_eq!(segments::round_half_toward_zero(0.5), 0.0);
    assert_eq!(segments::round_half_toward_zero(-0.5), 0.0);
    assert_eq!(segments::round_half_toward_zero(1.5), 1.0);
    assert_eq!(segments::round_half_toward_zero(-2.5), -2.0);
    assert_eq!(segments::round_half_toward_zero(1.4), 1.0);
    assert_eq!(segments::round_half_toward_zero(1.6), 2.0);
    assert_eq!(segments::round_half_toward_zero(-3.0), -3.0);
}

#[test]
fn segments_find_follows_aligned_single_links() {
    let mut lg = LayerGraph::new(4);
    let a = lg.add_vertex(0, false);
    let d1 = lg.add_vertex(1, true);
    let d2 = lg.add_vertex(2, true);
    let b = lg.add_vertex(3, false);
    let c = lg.add_vertex(3, false);
    lg.add_edge(a, d1);
    lg.add_edge(d1, d2);
    lg.add_edge(d2, b);
    lg.init_rows(1.0);

    let found = segments::find(&lg);
    assert_eq!(
        found,
        vec![
            Segment {
                vertices: vec![a, d1, d2, b],
            },
            Segment { vertices: vec![c] },
        ]
    );
}

#[test]
fn segments_find_breaks_at_branches() {
    let mut lg = LayerGraph::new(2);
    let a = lg.add_vertex(0, false);
    let b = lg.add_vertex(1, false);
    let c = lg.add_vertex(1, false);
    lg.add_edge(a, b);
    lg.add_edge(a, c);
    lg.init_rows(1.0);

    let found = segments::find(&lg);
    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|s| s.vertices.len() == 1));
}

/// `u` on row 1 feeds a lone dummy `d` on row 0, which feeds `w` on row 1.
fn offset_dummy() -> (LayerGraph, usize, usize) {
    let mut lg = LayerGraph::new(3);
    let _u0 = lg.add_vertex(0, false);
    let u = lg.add_vertex(0, false);
    let d = lg.add_vertex(1, true);
    let _w0 = lg.add_vertex(2, false);
    let w = lg.add_vertex(2, false);
    lg.add_edge(u, d);
    lg.add_edge(d, w);
    lg.init_rows(1.0);
    (lg, u, d)
}

#[test]
fn segments_target_takes_the_smaller_same_sign_delta() {
    let (lg, _, d) = offset_dummy();
    let seg = Segment { vertices: vec![d] };
    assert_eq!(segments::target_shift(&lg, &seg), Some(1.0));
}

#[test]
fn segments_target_averages_opposite_deltas() {
    let mut lg = LayerGraph::new(3);
    let _a = lg.add_vertex(0, false);
    let _b = lg.add_vertex(0, false);
    let c = lg.add_vertex(0, false);
    let _x = lg.add_vertex(1, false);
    let d = lg.add_vertex(1, true);
    let w = lg.add_vertex(2, false);
    lg.add_edge(c, d);
    lg.add_edge(d, w);
    lg.init_rows(1.0);

    // Up is +1, down is -1.
    let seg = Segment { vertices: vec![d] };
    assert_eq!(segments::target_shift(&lg, &seg), Some(0.0));
}

#[test]
fn segments_target_is_none_without_neighbours() {
    let mut lg = LayerGraph::new(1);
    let a = lg.add_vertex(0, false);
    let seg = Segment { vertices: vec![a] };
    assert_eq!(segments::target_shift(&lg, &seg), None);
}

#[test]
fn segments_align_moves_a_segment_onto_its_neighbours() {
    let (mut lg, u, d) = offset_dummy();
    let stats = segments::align(&mut lg, 1.0, 3);

    assert_eq!(lg.row(d), 1.0);
    assert_eq!(lg.row(u), 1.0);
    assert_eq!(stats.shifts, 1);
    assert_eq!(stats.passes, 2);
    lg.check_spacing(1.0);
}

#[test]
fn segments_shift_is_clamped_by_neighbours() {
    let mut lg = LayerGraph::new(3);
    let u = lg.add_vertex(0, false);
    let _u1 = lg.add_vertex(0, false);
    let _u2 = lg.add_vertex(0, false);
    let _x = lg.add_vertex(1, false);
    let d = lg.add_vertex(1, true);
    let w = lg.add_vertex(2, false);
    lg.add_edge(u, d);
    lg.add_edge(d, w);
    lg.init_rows(1.0);

    // d sits on row 1 right below x and wants to move up to row 0.
    let seg = Segment { vertices: vec![d] };
    assert_eq!(segments::target_shift(&lg, &seg), Some(-1.0));
    let (applied, full) = segments::shift(&mut lg, &seg, 1.0);
    assert_eq!(applied, 0.0);
    assert!(!full);
    assert_eq!(lg.row(d), 1.0);
}
