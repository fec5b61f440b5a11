//! Procedural particle field: the static per-particle attributes from which
//! the animation driver computes every frame.
//!
//! Positions are unit-scale; core radius and tentacle length are applied
//! later by [`crate::animation::transform`], so the field depends on nothing
//! but the particle count and the random source.

use crate::config::Configuration;
use crate::constants::{
    HEAD_PROBABILITY, HEAD_SIZE_RANGE, TENTACLE_ROOT_DEPTH, TENTACLE_ROOT_RADIUS,
    TENTACLE_SIZE_RANGE,
};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleClass {
    Head,
    Tentacle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub class: ParticleClass,
    pub position: Vec3,
    pub size: f32,
    pub phase: f32,
    pub random: Vec3,
}

impl Particle {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let is_head = rng.gen::<f32>() < HEAD_PROBABILITY;
        let (class, position, size) = if is_head {
            // Upper cap of the unit sphere: polar angle folded into [0, pi/2]
            let theta = rng.gen::<f32>() * TAU;
            let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos() * 0.5;
            let position = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            let size = rng.gen_range(HEAD_SIZE_RANGE.0..HEAD_SIZE_RANGE.1);
            (ParticleClass::Head, position, size)
        } else {
            let theta = rng.gen::<f32>() * TAU;
            let radius = rng.gen::<f32>() * TENTACLE_ROOT_RADIUS;
            let position = Vec3::new(
                theta.cos() * radius,
                -rng.gen::<f32>() * TENTACLE_ROOT_DEPTH,
                theta.sin() * radius,
            );
            let size = rng.gen_range(TENTACLE_SIZE_RANGE.0..TENTACLE_SIZE_RANGE.1);
            (ParticleClass::Tentacle, position, size)
        };
        let phase = rng.gen::<f32>() * 2.0 * PI;
        let random = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        Self {
            class,
            position,
            size,
            phase,
            random,
        }
    }
}

/// Structural identity of a field. Two configurations with equal keys share
/// a field; colour and speed are deliberately absent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldKey {
    pub particle_count: u32,
    pub core_radius: f32,
    pub tentacle_length: f32,
    pub tentacle_spread: f32,
}

impl FieldKey {
    pub fn of(config: &Configuration) -> Self {
        Self {
            particle_count: config.particle_count,
            core_radius: config.core_radius,
            tentacle_length: config.tentacle_length,
            tentacle_spread: config.tentacle_spread,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Full resample of `count` particles; nothing is carried over.
    pub fn generate<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| Particle::sample(rng)).collect();
        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn head_count(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| p.class == ParticleClass::Head)
            .count()
    }
}
