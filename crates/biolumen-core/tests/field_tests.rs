// Host-side tests for particle field generation and regeneration policy.

use biolumen_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn produces_exactly_requested_count() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in [1u32, 2, 17, 1000, 4321] {
        let field = ParticleField::generate(n, &mut rng);
        assert_eq!(field.len(), n as usize);
    }
}

#[test]
fn roughly_thirty_percent_heads() {
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = ParticleField::generate(20_000, &mut rng);
        let share = field.head_count() as f32 / field.len() as f32;
        // 5 sigma for n = 20k is about 0.016
        assert!((share - 0.3).abs() < 0.02, "seed {seed}: head share {share}");
    }
}

#[test]
fn same_seed_gives_same_field() {
    let a = ParticleField::generate(500, &mut StdRng::seed_from_u64(42));
    let b = ParticleField::generate(500, &mut StdRng::seed_from_u64(42));
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn colour_change_keeps_structure() {
    let base = initial_configuration();
    let recoloured = base.with_color(Color::new(0xff, 0x00, 0x80));
    assert_eq!(FieldKey::of(&base), FieldKey::of(&recoloured));

    let a = Specimen::new(base, 7);
    let b = Specimen::new(recoloured.clone(), 7);
    assert_eq!(a.field().particles(), b.field().particles());

    let mut s = Specimen::new(initial_configuration(), 9);
    let before = s.field().particles().to_vec();
    s.set_color(Color::new(1, 2, 3));
    assert!(!s.replace(s.config().with_color(Color::new(9, 9, 9))));
    assert_eq!(s.field().particles(), &before[..]);
    assert_eq!(s.generation(), 0);
    assert_eq!(s.config().color, Color::new(9, 9, 9));
}

#[test]
fn speed_change_keeps_structure() {
    let mut s = Specimen::new(initial_configuration(), 3);
    let mut faster = s.config().clone();
    faster.movement_speed = 2.0;
    faster.noise_strength = 0.9;
    assert!(!s.replace(faster));
    assert_eq!(s.generation(), 0);
}

#[test]
fn preset_switch_regenerates_whole_field() {
    let neon = select_preset("neon-pulse").expect("neon pulse");
    assert_eq!(neon.particle_count, 3000);
    let mut s = Specimen::new(neon, 2024);
    assert_eq!(s.field().len(), 3000);
    let before = s.field().particles().to_vec();

    let void = select_preset("deep-void").expect("deep void");
    assert!(s.replace(void));
    assert_eq!(s.generation(), 1);
    assert_eq!(s.field().len(), 2000);
    assert_eq!(s.config().name, "Deep Void");
    for p in s.field().particles() {
        assert!(
            !before.iter().any(|q| q.position == p.position && q.phase == p.phase),
            "particle reused from previous field"
        );
    }
}

#[test]
fn same_count_different_shape_regenerates() {
    let mut s = Specimen::new(initial_configuration(), 5);
    let mut wider = s.config().clone();
    wider.tentacle_spread = 1.4;
    assert!(s.replace(wider));
    assert_eq!(s.field().len(), 3000);
}
