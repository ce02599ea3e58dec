//! Benchmarks for whole-frame session stepping.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use danmaku::prelude::*;

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_step");

    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.name()),
            &difficulty,
            |b, &difficulty| {
                let mut session =
                    Session::new(difficulty, Assets::placeholder(), Bounds::FIELD).with_seed(7);
                let mut input = Input::new();
                input.set_aim(Vec2::new(100.0, 750.0));
                // Warm up so the field is populated.
                for _ in 0..120 {
                    input.begin_frame();
                    session.step(&input, 33.0);
                }
                b.iter(|| {
                    input.begin_frame();
                    black_box(session.step(&input, black_box(33.0)))
                })
            },
        );
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut session =
        Session::new(Difficulty::Lunatic, Assets::placeholder(), Bounds::FIELD).with_seed(8);
    let input = Input::new();
    for _ in 0..120 {
        session.step(&input, 33.0);
    }
    let mut target = image::RgbImage::new(Bounds::FIELD.width, Bounds::FIELD.height);

    c.bench_function("session_draw", |b| {
        b.iter(|| {
            session.draw(black_box(&mut target));
        })
    });
}

criterion_group!(benches, bench_step, bench_draw);
criterion_main!(benches);
