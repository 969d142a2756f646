//! Criterion benchmarks for the shapes canvas: build, re-fit and point lookup.
//! Grids of k × k unit squares, k in {8, 32, 64}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use svgmodel::adjacency::extract_adjacent_shapes;
use svgmodel::gen::grid_shapes;
use svgmodel::key::IdAllocator;
use svgmodel::spatial::{CanvasSize, ShapesCanvas};

fn bench_canvas(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas");
    for &k in &[8usize, 32, 64] {
        let shapes = grid_shapes(k, k, 1.0, 0.2, &mut IdAllocator::default()).unwrap();

        group.bench_with_input(BenchmarkId::new("build", k), &shapes, |b, shapes| {
            b.iter_batched(
                || shapes.clone(),
                |s| {
                    let _c = ShapesCanvas::new(s, Some(CanvasSize::new(800.0, 600.0)), 0.05)
                        .unwrap();
                },
                BatchSize::LargeInput,
            )
        });

        let mut canvas =
            ShapesCanvas::new(shapes.clone(), Some(CanvasSize::new(800.0, 600.0)), 0.05).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let queries: Vec<(f64, f64)> = (0..1024)
            .map(|_| (rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0)))
            .collect();
        group.bench_with_input(BenchmarkId::new("find_shape_x1024", k), &queries, |b, qs| {
            b.iter(|| qs.iter().filter(|(x, y)| canvas.find_shape(*x, *y).is_some()).count())
        });

        group.bench_function(BenchmarkId::new("reset_shape", k), |b| {
            b.iter(|| canvas.reset_shape(Some(CanvasSize::new(1024.0, 768.0)), 0.1).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("stretch_adjacency", k), &shapes, |b, shapes| {
            b.iter(|| extract_adjacent_shapes(shapes.iter().map(|(i, p)| (i, p)), 0.15).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_canvas);
criterion_main!(benches);
