//! Criterion benchmarks for the per-frame particle step.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fireworks::{
    engine::AnimationEngine, options::Options, surface::PixelCanvas,
};
use rand::{rngs::StdRng, SeedableRng};

/// Engine already holding `bursts` live bursts of staggered age.
fn warmed_engine(
    width: u32,
    height: u32,
    bursts: usize,
    canvas: &mut PixelCanvas,
) -> AnimationEngine<StdRng> {
    let mut options = Options::default();
    options.burst.spawn_probability = 0.0;
    let mut engine =
        AnimationEngine::with_rng(options, StdRng::seed_from_u64(42));
    engine.initialize(width, height);
    for _ in 0..bursts {
        let _ = engine.spawn_burst();
        engine.step(canvas);
    }
    engine
}

fn trail_only_benchmark(c: &mut Criterion) {
    let mut canvas = PixelCanvas::new(1280, 720);
    let mut engine = warmed_engine(1280, 720, 0, &mut canvas);
    c.bench_function("step_empty_1280x720", |b| {
        b.iter(|| engine.step(black_box(&mut canvas)));
    });
}

fn population_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_population");

    // 3 bursts is the steady state at the default 3% per-frame spawn
    // rate; 100 is the most a 100-frame lifetime can hold at one per frame.
    for bursts in [3usize, 30, 100] {
        group.bench_function(format!("{}_particles", bursts * 30), |b| {
            b.iter_batched_ref(
                || {
                    let mut canvas = PixelCanvas::new(1280, 720);
                    let engine =
                        warmed_engine(1280, 720, bursts, &mut canvas);
                    (engine, canvas)
                },
                |(engine, canvas)| engine.step(black_box(canvas)),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, trail_only_benchmark, population_benchmark);
criterion_main!(benches);
