use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use strata::{LayoutOptions, Node, TreeGraph};

/// A layered prerequisite tree: `width` nodes per tier, each depending on a few nodes of the
/// previous tier plus an occasional long edge two tiers back.
fn build_tree(name: &str, tiers: usize, width: usize, fanin: usize) -> TreeGraph {
    let id = |t: usize, i: usize| format!("{name}_t{t}_n{i}");
    let mut g = TreeGraph::new();
    for t in 0..tiers {
        for i in 0..width {
            g.add_node(Node::new(id(t, i)).with_origin(format!("mod{}", i % 4)));
        }
    }

    for t in 1..tiers {
        for i in 0..width {
            for k in 0..fanin {
                let from = (i * 7 + k * 3) % width;
                g.add_edge(id(t - 1, from), id(t, i));
            }
            if t >= 2 && i % 5 == 0 {
                g.add_edge(id(t - 2, (i + 1) % width), id(t, i));
            }
        }
    }
    g
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("tree_6x10_f2", 6usize, 10usize, 2usize),
        ("tree_10x25_f3", 10usize, 25usize, 3usize),
        ("tree_16x40_f3", 16usize, 40usize, 3usize),
    ];

    for (name, tiers, width, fanin) in cases {
        let tree = build_tree(name, tiers, width, fanin);
        for (label, options) in [
            ("default", LayoutOptions::default()),
            (
                "by_origin",
                LayoutOptions {
                    group_by_origin: true,
                    ..Default::default()
                },
            ),
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("strata::layout/{label}"), name),
                &tree,
                |b, tree| {
                    b.iter(|| {
                        let layout = strata::layout(black_box(tree), &options)
                            .expect("benchmark graph is a DAG");
                        black_box(layout.crossings);
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
