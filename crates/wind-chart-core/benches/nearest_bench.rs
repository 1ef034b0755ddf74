use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wind_chart_core::Timeline;

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_nearest");
    for &n in &[72usize, 10_000, 1_000_000] {
        let tl = Timeline::new((0..n).map(|i| i as f64 * 600.0).collect());
        let span = n as f64 * 600.0;
        group.bench_function(format!("n_{n}"), |b| {
            let mut t = 0.0;
            b.iter(|| {
                t = (t + 7_919.5) % span;
                black_box(tl.nearest(black_box(t)))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest);
criterion_main!(benches);
