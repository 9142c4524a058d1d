use bevy::math::Vec2;
use bevy_hill_strip::{
    ControlPoint, Noise2D, NoiseConfig, Path, PerlinNoise, SeedMode, StripMeshBuilder,
    SurfaceConfig, TerrainError, generate_surface,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Primitive pinned at its maximum, so every noisy point sits at
/// `base + amplitude`.
struct Peak;

impl Noise2D for Peak {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        1.0
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(99)
}

fn hilly_path() -> Path {
    Path::from_anchors(
        Vec2::ZERO,
        &[
            ControlPoint::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0)),
            ControlPoint::new(Vec2::new(50.0, 8.0), Vec2::new(60.0, 8.0)),
            ControlPoint::new(Vec2::new(100.0, -4.0), Vec2::new(110.0, -9.0)),
        ],
    )
}

#[test]
fn point_count_is_segments_plus_one() {
    let config = SurfaceConfig::default().with_segment_count(64);
    let surface = generate_surface(
        None,
        &PerlinNoise::default(),
        &NoiseConfig::default(),
        &config,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(surface.len(), 65);
    assert_eq!(surface.boundary(), surface.points.as_slice());
}

#[test]
fn fixed_seed_is_deterministic() {
    let config = SurfaceConfig::default().with_seed(SeedMode::Fixed(777));
    let noise = PerlinNoise::default();
    let a = generate_surface(None, &noise, &NoiseConfig::default(), &config, &mut rng()).unwrap();
    let b = generate_surface(
        None,
        &noise,
        &NoiseConfig::default(),
        &config,
        &mut ChaCha8Rng::seed_from_u64(1),
    )
    .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.seed, 777);
}

#[test]
fn different_seeds_give_different_hills() {
    let noise = PerlinNoise::default();
    let a = generate_surface(
        None,
        &noise,
        &NoiseConfig::default(),
        &SurfaceConfig::default().with_seed(SeedMode::Fixed(1)),
        &mut rng(),
    )
    .unwrap();
    let b = generate_surface(
        None,
        &noise,
        &NoiseConfig::default(),
        &SurfaceConfig::default().with_seed(SeedMode::Fixed(2)),
        &mut rng(),
    )
    .unwrap();
    assert_ne!(a.points, b.points);
}

#[test]
fn random_seed_is_recorded_and_reproducible() {
    let noise = PerlinNoise::default();
    let config = SurfaceConfig::default().with_seed(SeedMode::Random);
    let random = generate_surface(None, &noise, &NoiseConfig::default(), &config, &mut rng()).unwrap();

    let replay = generate_surface(
        None,
        &noise,
        &NoiseConfig::default(),
        &config.clone().with_seed(SeedMode::Fixed(random.seed)),
        &mut rng(),
    )
    .unwrap();
    assert_eq!(random.points, replay.points);
}

#[test]
fn fallback_line_uses_segment_width() {
    let config = SurfaceConfig {
        segment_count: 10,
        segment_width: 2.5,
        ..Default::default()
    };
    let surface = generate_surface(
        None,
        &PerlinNoise::default(),
        &NoiseConfig::default(),
        &config,
        &mut rng(),
    )
    .unwrap();
    for (i, p) in surface.points.iter().enumerate() {
        assert_eq!(p.x, i as f32 * 2.5);
    }
}

#[test]
fn flat_start_stays_on_baseline() {
    let config = SurfaceConfig {
        segment_count: 40,
        base_height: 3.0,
        amplitude: 12.0,
        flat_start: 10,
        blend_len: 5,
        ..Default::default()
    };
    let surface = generate_surface(
        None,
        &PerlinNoise::default(),
        &NoiseConfig::default(),
        &config,
        &mut rng(),
    )
    .unwrap();
    for p in &surface.points[..10] {
        assert_eq!(p.y, 3.0);
    }
}

#[test]
fn flat_start_follows_path_exactly() {
    let path = hilly_path();
    let config = SurfaceConfig {
        segment_count: 50,
        flat_start: 20,
        blend_len: 0,
        ..Default::default()
    };
    let surface = generate_surface(
        Some(&path),
        &PerlinNoise::default(),
        &NoiseConfig::default(),
        &config,
        &mut rng(),
    )
    .unwrap();

    for (i, p) in surface.points.iter().enumerate().take(20) {
        assert_eq!(*p, path.evaluate(i as f32 / 50.0));
    }
    assert_eq!(surface.points[0], Vec2::new(0.0, 0.0));
    assert_eq!(surface.points[50].x, 100.0);
}

#[test]
fn blend_zone_rises_monotonically() {
    let config = SurfaceConfig {
        segment_count: 30,
        base_height: 0.0,
        amplitude: 8.0,
        flat_start: 5,
        blend_len: 10,
        ..Default::default()
    };
    let surface = generate_surface(None, &Peak, &NoiseConfig::default(), &config, &mut rng()).unwrap();
    let ys: Vec<f32> = surface.points.iter().map(|p| p.y).collect();

    for pair in ys.windows(2) {
        assert!(pair[1] >= pair[0], "surface not monotonic: {ys:?}");
    }
    for (i, y) in ys.iter().enumerate().skip(5).take(10) {
        let expected = 8.0 * (i - 5) as f32 / 10.0;
        assert!((y - expected).abs() < 1e-5, "blend point {i}: {y} vs {expected}");
    }
    assert!(ys[15..].iter().all(|y| (*y - 8.0).abs() < 1e-5));
}

#[test]
fn zero_blend_length_jumps_straight_to_noise() {
    let config = SurfaceConfig {
        segment_count: 10,
        amplitude: 4.0,
        flat_start: 3,
        blend_len: 0,
        ..Default::default()
    };
    let surface = generate_surface(None, &Peak, &NoiseConfig::default(), &config, &mut rng()).unwrap();
    assert_eq!(surface.points[2].y, 0.0);
    assert_eq!(surface.points[3].y, 4.0);
}

#[test]
fn flat_scenario_builds_small_strip() {
    let config = SurfaceConfig {
        segment_count: 4,
        amplitude: 0.0,
        flat_start: 2,
        blend_len: 0,
        ..Default::default()
    };
    let surface = generate_surface(
        None,
        &PerlinNoise::default(),
        &NoiseConfig::default(),
        &config,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(surface.len(), 5);
    assert!(surface.points.iter().all(|p| p.y == 0.0));

    let strip = StripMeshBuilder::new()
        .with_baseline(config.base_height)
        .with_bottom_depth(config.bottom_depth)
        .build(&surface.points)
        .unwrap();
    assert_eq!(strip.vertex_count(), 10);
    assert_eq!(strip.indices.len(), 18);
}

#[test]
fn zero_segments_yield_single_point() {
    let config = SurfaceConfig::default().with_segment_count(0);
    let surface = generate_surface(
        None,
        &PerlinNoise::default(),
        &NoiseConfig::default(),
        &config,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(surface.len(), 1);

    let err = StripMeshBuilder::new().build(&surface.points).unwrap_err();
    assert!(matches!(err, TerrainError::InsufficientPoints { found: 1 }));
}

#[test]
fn non_finite_amplitude_is_rejected() {
    let config = SurfaceConfig::default().with_amplitude(f32::NAN);
    let err = generate_surface(
        None,
        &PerlinNoise::default(),
        &NoiseConfig::default(),
        &config,
        &mut rng(),
    )
    .unwrap_err();
    assert!(matches!(err, TerrainError::InvalidConfig(_)));
    assert!(err.is_configuration());
}

#[test]
fn non_positive_persistence_is_rejected() {
    let noise_config = NoiseConfig {
        persistence: 0.0,
        ..Default::default()
    };
    let err = generate_surface(
        None,
        &PerlinNoise::default(),
        &noise_config,
        &SurfaceConfig::default(),
        &mut rng(),
    )
    .unwrap_err();
    assert!(matches!(err, TerrainError::InvalidConfig(_)));
}
