use std::hint::black_box;

use bevy::math::Vec2;
use bevy_hill_strip::{
    ControlPoint, LayerProfile, NoiseConfig, Path, PerlinNoise, StripMeshBuilder, SurfaceConfig,
    generate_surface, synthesize,
};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_path() -> Path {
    let anchors: Vec<ControlPoint> = (0..8)
        .map(|i| {
            let x = i as f32 * 50.0;
            let y = (i as f32 * 0.9).sin() * 10.0;
            ControlPoint::new(Vec2::new(x, y), Vec2::new(x + 15.0, y))
        })
        .collect();
    Path::from_anchors(Vec2::ZERO, &anchors)
}

fn bench_surface_generation(c: &mut Criterion) {
    let path = bench_path();
    let noise = PerlinNoise::default();
    let noise_config = NoiseConfig::default();
    let config = SurfaceConfig::default().with_segment_count(2000);

    c.bench_function("generate_surface 2000 segments", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            generate_surface(
                Some(black_box(&path)),
                &noise,
                &noise_config,
                &config,
                &mut rng,
            )
        });
    });
}

fn bench_mesh_generation(c: &mut Criterion) {
    let points: Vec<Vec2> = (0..2001)
        .map(|i| Vec2::new(i as f32 * 0.5, (i as f32 * 0.1).sin()))
        .collect();

    c.bench_function("StripMeshBuilder 2001 points", |b| {
        b.iter(|| StripMeshBuilder::new().build(black_box(&points)));
    });
}

fn bench_texture_synthesis(c: &mut Criterion) {
    let profile = LayerProfile::hill_road();

    c.bench_function("synthesize 256x256", |b| {
        b.iter(|| synthesize(black_box(&profile), 256, 256));
    });
}

criterion_group!(
    benches,
    bench_surface_generation,
    bench_mesh_generation,
    bench_texture_synthesis
);
criterion_main!(benches);
