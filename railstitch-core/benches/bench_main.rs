use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use railstitch_core::loading::RawElement;
use railstitch_core::prelude::*;

/// Straight line cut into `pieces` ways with a small hole after each one
fn fragmented_line(pieces: i64) -> Vec<RawElement> {
    let mut elements = Vec::new();
    for piece in 0..pieces {
        let a = piece * 2 + 1;
        #[allow(clippy::cast_precision_loss)]
        let base = 47.0 + piece as f64 * 0.001;
        elements.push(RawElement::Node {
            id: a,
            lat: base,
            lon: 8.0,
        });
        elements.push(RawElement::Node {
            id: a + 1,
            lat: base + 0.0009,
            lon: 8.0,
        });
        elements.push(RawElement::Way {
            id: 1000 + piece,
            nodes: vec![a, a + 1],
        });
    }
    elements
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("gap_closing");
    for pieces in [10, 40] {
        let elements = fragmented_line(pieces);
        group.bench_function(format!("reduce_{pieces}_fragments"), |b| {
            b.iter_batched(
                || GraphModel::build(elements.clone()),
                |mut graph| black_box(reduce(&mut graph)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
