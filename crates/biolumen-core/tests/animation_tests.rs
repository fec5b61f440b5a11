// Host-side tests for the per-particle transform and the frame driver.

use biolumen_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn head() -> Particle {
    Particle {
        class: ParticleClass::Head,
        position: Vec3::new(0.0, 1.0, 0.0),
        size: 2.0,
        phase: 0.0,
        random: Vec3::new(0.5, 0.5, 0.5),
    }
}

fn tentacle() -> Particle {
    Particle {
        class: ParticleClass::Tentacle,
        position: Vec3::new(0.2, -0.25, 0.1),
        size: 1.0,
        phase: 1.0,
        random: Vec3::new(0.3, 0.8, 0.1),
    }
}

fn shape() -> ShapeUniforms {
    ShapeUniforms::of(&initial_configuration())
}

#[test]
fn head_alpha_endpoints() {
    let s = shape();
    let calm = transform(&head(), &s, 0.0, 0.0);
    let tense = transform(&head(), &s, 0.0, 1.0);
    assert!((calm.alpha - 0.8).abs() < 1e-6);
    assert!((tense.alpha - 0.6).abs() < 1e-6);
}

#[test]
fn head_alpha_is_linear_and_decreasing() {
    let s = shape();
    let mut prev = f32::MAX;
    for i in 0..=20 {
        let tau = i as f32 / 20.0;
        let a = transform(&head(), &s, 3.0, tau).alpha;
        assert!((a - (0.8 - 0.2 * tau)).abs() < 1e-6);
        assert!(a < prev);
        prev = a;
    }
}

#[test]
fn calm_head_breathes_around_core_radius() {
    let s = shape();
    // t = 0, phase = 0 => breath = 0, no dispersion
    let r = transform(&head(), &s, 0.0, 0.0);
    assert!((r.position.length() - s.core_radius).abs() < 1e-5);
    assert_eq!(r.size, 2.0);
}

#[test]
fn tension_expands_head_and_point_size() {
    let s = shape();
    let calm = transform(&head(), &s, 0.0, 0.0);
    let tense = transform(&head(), &s, 0.0, 1.0);
    assert!(tense.position.length() > calm.position.length());
    assert!((tense.size - 2.0 * 2.5).abs() < 1e-5);
}

#[test]
fn tentacles_hang_below_head_and_fade_towards_tip() {
    let s = shape();
    let r = transform(&tentacle(), &s, 1.3, 0.0);
    assert!(r.position.y < -s.tentacle_length * 0.8 + 0.0);
    let fraction = 1.0 - (-0.25 + 1.0) / 2.0;
    assert!((r.alpha - (1.0 - fraction) * 0.6).abs() < 1e-6);
}

#[test]
fn tension_stretches_tentacles() {
    let s = shape();
    let calm = transform(&tentacle(), &s, 0.0, 0.0);
    let tense = transform(&tentacle(), &s, 0.0, 1.0);
    assert!(tense.position.y < calm.position.y);
    let h = |p: Vec3| (p.x * p.x + p.z * p.z).sqrt();
    assert!(h(tense.position) > h(calm.position));
}

#[test]
fn transform_is_pure_and_order_independent() {
    let mut rng = StdRng::seed_from_u64(77);
    let field = ParticleField::generate(300, &mut rng);
    let s = shape();
    let forward: Vec<Renderable> = field
        .particles()
        .iter()
        .map(|p| transform(p, &s, 2.5, 0.4))
        .collect();
    let mut backward: Vec<Renderable> = field
        .particles()
        .iter()
        .rev()
        .map(|p| transform(p, &s, 2.5, 0.4))
        .collect();
    backward.reverse();
    assert_eq!(forward, backward);
    for r in &forward {
        assert!(r.position.is_finite());
        assert!((0.0..=1.0).contains(&r.alpha));
    }
}

#[test]
fn driver_scales_time_by_movement_speed() {
    let config = select_preset("solar-flare").expect("preset");
    let mut driver = AnimationDriver::new();
    driver.advance(0.5, 0.0, &config);
    let u = driver.advance(0.5, 0.0, &config);
    assert!((driver.elapsed() - 1.0).abs() < 1e-6);
    assert!((u.time - config.movement_speed).abs() < 1e-5);
}

#[test]
fn driver_spin_accumulates_faster_under_tension() {
    let config = initial_configuration();
    let mut calm = AnimationDriver::new();
    let mut tense = AnimationDriver::new();
    for _ in 0..10 {
        calm.advance(1.0 / 60.0, 0.0, &config);
        tense.advance(1.0 / 60.0, 1.0, &config);
    }
    let expected_calm = 10.0 * 0.001 * config.movement_speed;
    let expected_tense = 10.0 * 0.006 * config.movement_speed;
    assert!((calm.spin() - expected_calm).abs() < 1e-5);
    assert!((tense.spin() - expected_tense).abs() < 1e-5);
}

#[test]
fn driver_tension_uniform_follows_target_with_render_alpha() {
    let config = initial_configuration();
    let mut driver = AnimationDriver::new();
    let u = driver.advance(0.016, 1.0, &config);
    assert!((u.tension - RENDER_SMOOTHING_ALPHA).abs() < 1e-6);
    assert_eq!(u.color, config.color.to_linear_rgb());
    assert_eq!(u.shape, ShapeUniforms::of(&config));
}
