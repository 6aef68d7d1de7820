//! Benchmark insert-or-accumulate over realistic price scatter

use common::{Px, Qty};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depth::DepthTree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn bench_accumulate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let prices: Vec<i64> = (0..10_000)
        .map(|_| rng.gen_range(1_000_000..2_000_000))
        .collect();

    c.bench_function("accumulate_10k_scattered", |b| {
        b.iter(|| {
            let mut tree = DepthTree::new();
            for &p in &prices {
                black_box(tree.accumulate(Px::from_ticks(p), Qty::from_i64(1)));
            }
            tree
        });
    });

    c.bench_function("accumulate_hot_level", |b| {
        let mut tree = DepthTree::new();
        for &p in &prices {
            tree.accumulate(Px::from_ticks(p), Qty::from_i64(1));
        }
        let hot = Px::from_ticks(prices[0]);
        b.iter(|| black_box(tree.accumulate(hot, Qty::from_i64(1))));
    });
}

criterion_group!(benches, bench_accumulate);
criterion_main!(benches);
