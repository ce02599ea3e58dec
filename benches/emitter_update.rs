//! Benchmarks for per-frame emitter work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use danmaku::{Bounds, Emitter, EmitterKind, ParticleKind, SpriteGroup, Vec2};
use danmaku::sprite::solid_image;

fn filled(mut emitter: Emitter, frames: u32) -> Emitter {
    for _ in 0..frames {
        emitter.update(33.0, &mut ());
    }
    emitter
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_update");
    let center = Vec2::new(300.0, 400.0);

    for per_frame in [3u32, 30, 120] {
        group.bench_with_input(BenchmarkId::new("plain", per_frame), &per_frame, |b, &per_frame| {
            let emitter = Emitter::new(ParticleKind::Plain, center, 50, per_frame, Bounds::FIELD);
            let mut emitter = filled(emitter.with_seed(1), 60);
            b.iter(|| {
                emitter.update(black_box(33.0), &mut ());
                black_box(emitter.population())
            })
        });
    }

    group.bench_function("stars", |b| {
        let mut emitter = filled(
            Emitter::new(ParticleKind::Star, Vec2::ZERO, 6400, 3, Bounds::FIELD)
                .with_kind(EmitterKind::RandomPositioning)
                .with_seed(2),
            300,
        );
        b.iter(|| {
            emitter.update(black_box(33.0), &mut ());
            black_box(emitter.population())
        })
    });

    group.bench_function("explosion_burst", |b| {
        b.iter(|| {
            let mut emitter = Emitter::new(ParticleKind::Explosion, center, 50, 120, Bounds::FIELD)
                .with_kind(EmitterKind::explosion())
                .with_seed(3);
            emitter.trigger(10);
            for _ in 0..20 {
                emitter.update(33.0, &mut ());
            }
            black_box(emitter.population())
        })
    });

    group.bench_function("firework_sprites", |b| {
        let mut sprites = SpriteGroup::new();
        let mut emitter = Emitter::new(ParticleKind::Firework, center, 1000, 4, Bounds::FIELD)
            .with_kind(EmitterKind::firework())
            .with_sprite(solid_image(8, [255, 64, 64, 255]))
            .with_seed(4);
        emitter.set_max_per_frame(120);
        for _ in 0..200 {
            emitter.update(33.0, &mut sprites);
        }
        b.iter(|| {
            emitter.update(black_box(33.0), &mut sprites);
            black_box(sprites.len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
