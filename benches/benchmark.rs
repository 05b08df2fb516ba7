use cnvtree::engine::{downstream_closure, linear_order, trim};
use cnvtree::model::{Edge, EdgeIndex, TreeBuilder};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rustc_hash::FxHashSet;
use std::hint::black_box;

const CHAIN_LENGTHS: &[(&str, usize)] = &[("Chain1k", 1_000), ("Chain50k", 50_000)];

const BINARY_DEPTHS: &[(&str, u32)] = &[("Binary10", 10), ("Binary15", 15)];

fn chain(length: usize) -> EdgeIndex {
    EdgeIndex::from_edges(
        (0..length).map(|i| Edge::new(format!("cell{i}"), format!("cell{}", i + 1))),
    )
    .unwrap()
}

/// Complete binary tree in heap numbering, root `cell1`.
fn binary(depth: u32) -> EdgeIndex {
    let num_internal = (1usize << depth) - 1;
    EdgeIndex::from_edges((1..=num_internal).flat_map(|parent| {
        [2 * parent, 2 * parent + 1]
            .map(|child| Edge::new(format!("cell{parent}"), format!("cell{child}")))
    }))
    .unwrap()
}

fn closure_and_order(c: &mut Criterion) {
    for &(name, length) in CHAIN_LENGTHS {
        let index = chain(length);
        let start = Edge::new("cell0", "cell1");
        c.bench_function(&format!("closure/{name}"), |b| {
            b.iter(|| downstream_closure(black_box(&index), &start).unwrap());
        });
        c.bench_function(&format!("order/{name}"), |b| {
            b.iter(|| linear_order(black_box(&index), "cell0").unwrap());
        });
    }

    for &(name, depth) in BINARY_DEPTHS {
        let index = binary(depth);
        let start = Edge::new("cell1", "cell2");
        c.bench_function(&format!("closure/{name}"), |b| {
            b.iter(|| downstream_closure(black_box(&index), &start).unwrap());
        });
    }
}

fn trimming(c: &mut Criterion) {
    for &(name, depth) in BINARY_DEPTHS {
        let index = binary(depth);
        let tree = TreeBuilder::build(&index, "cell1").unwrap();
        let closure = downstream_closure(&index, &Edge::new("cell1", "cell2")).unwrap();
        let nodes: FxHashSet<String> = closure.nodes.iter().cloned().collect();
        let edges: FxHashSet<Edge> = closure.edges.iter().cloned().collect();

        c.bench_function(&format!("trim/{name}"), |b| {
            b.iter_batched(
                || (index.clone(), tree.clone()),
                |(mut index, mut tree)| trim(&mut index, &mut tree, &nodes, &edges).unwrap(),
                BatchSize::LargeInput,
            );
        });
    }
}

criterion_group!(regression, closure_and_order);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = trimming
}
criterion_main!(regression, reporting);
