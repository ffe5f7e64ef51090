use strata_graphlib::alg::{self, CycleError};
use strata_graphlib::{Graph, NodeIx};

fn graph(ids: &[&str], edges: &[(&str, &str)]) -> Graph<(), ()> {
    let mut g: Graph<(), ()> = Graph::new();
    for id in ids {
        g.set_node(*id, ());
    }
    for (v, w) in edges {
        let v = g.node_ix(v).unwrap();
        let w = g.node_ix(w).unwrap();
        g.set_edge(v, w, ());
    }
    g
}

fn ids(g: &Graph<(), ()>, vs: &[NodeIx]) -> Vec<String> {
    vs.iter().map(|&v| g.node_id(v).to_string()).collect()
}

#[test]
fn topsort_orders_a_diamond_deterministically() {
    let g = graph(
        &["root", "l", "r", "tail"],
        &[("root", "l"), ("root", "r"), ("l", "tail"), ("r", "tail")],
    );
    let order = alg::topsort(&g).unwrap();
    assert_eq!(ids(&g, &order), vec!["root", "l", "r", "tail"]);
}

#[test]
fn topsort_seeds_sources_in_index_order() {
    let g = graph(&["b", "a", "c"], &[("a", "c")]);
    let order = alg::topsort(&g).unwrap();
    assert_eq!(ids(&g, &order), vec!["b", "a", "c"]);
}

#[test]
fn topsort_reports_a_vertex_on_a_cycle() {
    let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "b")]);
    let err = alg::topsort(&g).unwrap_err();
    assert_eq!(
        err,
        CycleError {
            node: g.node_ix("b").unwrap()
        }
    );
    assert!(!alg::is_acyclic(&g));
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn topsort_rejects_a_self_loop() {
    let g = graph(&["a"], &[("a", "a")]);
    assert!(alg::topsort(&g).is_err());
}

#[test]
fn components_ignore_edge_direction() {
    let g = graph(
        &["a1", "b1", "a2", "b2", "c1"],
        &[("a1", "a2"), ("b2", "b1")],
    );
    let comps: Vec<Vec<String>> = alg::components(&g)
        .iter()
        .map(|c| ids(&g, c))
        .collect();
    assert_eq!(
        comps,
        vec![
            vec!["a1".to_string(), "a2".to_string()],
            vec!["b1".to_string(), "b2".to_string()],
            vec!["c1".to_string()],
        ]
    );
}

#[test]
fn components_where_drops_filtered_edges() {
    let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
    let b = g.node_ix("b").unwrap();
    let comps = alg::components_where(&g, |_, v, _| v != b);
    let comps: Vec<Vec<String>> = comps.iter().map(|c| ids(&g, c)).collect();
    assert_eq!(
        comps,
        vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ]
    );
}
