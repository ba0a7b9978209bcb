use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rgb_quiz_core::{PuzzleGenerator, QuizConfig, QuizEngine, RandomPuzzleGenerator};

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_puzzle", |b| {
        let mut generator = RandomPuzzleGenerator::new(42);
        b.iter(|| black_box(generator.generate()))
    });
}

fn bench_strike_cycle(c: &mut Criterion) {
    c.bench_function("strike_and_regenerate", |b| {
        let mut engine = QuizEngine::with_seed(QuizConfig::default(), 42);
        b.iter(|| {
            engine.activate();
            engine.activate();
            engine.toggle_cell(0).ok();
            black_box(engine.activate())
        })
    });
}

criterion_group!(benches, bench_generate, bench_strike_cycle);
criterion_main!(benches);
