//! Procedural jellyfish animation.
//!
//! [`transform`] is the CPU reference of the vertex stage in
//! `shaders/jelly.wgsl`: a pure function of (particle, shape, time, tension)
//! with no cross-particle dependency. [`AnimationDriver`] owns the only
//! per-frame state: elapsed time, the render-side tension uniform and the
//! accumulated whole-field spin.

use crate::config::Configuration;
use crate::constants::{
    POINT_SIZE_SCALE, RENDER_SMOOTHING_ALPHA, SPIN_BASE_PER_FRAME, SPIN_TENSION_PER_FRAME,
};
use crate::field::{Particle, ParticleClass};
use crate::noise::simplex3;
use crate::tension::Smoother;
use glam::{Vec2, Vec3};

/// Geometry uniforms taken from the active configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeUniforms {
    pub core_radius: f32,
    pub tentacle_length: f32,
    pub tentacle_spread: f32,
}

impl ShapeUniforms {
    pub fn of(config: &Configuration) -> Self {
        Self {
            core_radius: config.core_radius,
            tentacle_length: config.tentacle_length,
            tentacle_spread: config.tentacle_spread,
        }
    }
}

/// Model-space placement of one particle for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderable {
    pub position: Vec3,
    pub alpha: f32,
    /// Size before perspective division, see [`perspective_point_size`].
    pub size: f32,
}

pub fn breath(t: f32, tension: f32, phase: f32) -> f32 {
    (t * (1.5 + 5.0 * tension) + phase).sin() * (0.1 + 0.2 * tension)
}

pub fn dispersion(tension: f32) -> f32 {
    3.5 * tension
}

pub fn head_alpha(tension: f32) -> f32 {
    0.8 - 0.2 * tension
}

pub fn tentacle_alpha(fraction: f32, tension: f32) -> f32 {
    (1.0 - fraction) * (0.6 + 0.4 * tension)
}

/// Rotate the horizontal components by `tension * y * 0.5`.
pub fn twist(pos: Vec3, tension: f32) -> Vec3 {
    let (s, c) = (tension * pos.y * 0.5).sin_cos();
    Vec3::new(c * pos.x + s * pos.z, pos.y, -s * pos.x + c * pos.z)
}

pub fn transform(particle: &Particle, shape: &ShapeUniforms, t: f32, tension: f32) -> Renderable {
    let tension = tension.clamp(0.0, 1.0);
    let d = dispersion(tension);
    let mut pos = twist(particle.position, tension);

    let alpha = match particle.class {
        ParticleClass::Head => {
            let b = breath(t, tension, particle.phase);
            pos += pos.normalize_or_zero() * (b + d * 0.3);
            pos *= shape.core_radius * (1.0 + tension * 0.5);
            head_alpha(tension)
        }
        ParticleClass::Tentacle => {
            // 0 at the bell rim, growing towards the tip
            let fraction = 1.0 - (pos.y + 1.0) / 2.0;

            let wave_amp = (0.5 + tension * 2.0) * shape.tentacle_spread;
            let wave_freq = 0.5 + tension;
            let wave = simplex3(Vec3::new(
                pos.x * 0.5,
                pos.y * 0.5 - t * wave_freq,
                t * 0.2 + particle.random.x,
            ));
            pos.x += wave * wave_amp;
            pos.z += wave * wave_amp;

            pos.y -= shape.tentacle_length * particle.random.y + tension * 1.5;

            let radial = Vec2::new(pos.x, pos.z).normalize_or_zero();
            let push = d * fraction * 1.5;
            pos.x += radial.x * push;
            pos.z += radial.y * push;

            tentacle_alpha(fraction, tension)
        }
    };

    Renderable {
        position: pos,
        alpha,
        size: particle.size * (1.0 + tension * 1.5),
    }
}

/// Screen-space diameter in pixels for a point at `view_depth` in front of
/// the camera.
pub fn perspective_point_size(size: f32, view_depth: f32) -> f32 {
    if view_depth <= f32::EPSILON {
        return 0.0;
    }
    size * POINT_SIZE_SCALE / view_depth
}

/// Soft disc falloff for a fragment at distance `r` from the point centre
/// (point spans r in [0, 0.5]). `None` means the fragment is discarded.
pub fn disc_alpha(r: f32) -> Option<f32> {
    if r > 0.5 {
        return None;
    }
    let glow = 1.0 - r * 2.0;
    Some(glow * glow)
}

/// Everything the GPU needs for one frame besides the particle buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub tension: f32,
    pub spin: f32,
    pub color: [f32; 3],
    pub shape: ShapeUniforms,
}

#[derive(Clone, Debug)]
pub struct AnimationDriver {
    elapsed: f32,
    tension: Smoother,
    spin: f32,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            tension: Smoother::new(RENDER_SMOOTHING_ALPHA),
            spin: 0.0,
        }
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tension(&self) -> f32 {
        self.tension.value()
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Advance one rendered frame. `target_tension` is the latest value of
    /// the shared signal; the uniform follows it through its own filter.
    pub fn advance(
        &mut self,
        dt_sec: f32,
        target_tension: f32,
        config: &Configuration,
    ) -> FrameUniforms {
        if dt_sec.is_finite() {
            self.elapsed += dt_sec.max(0.0);
        }
        let target = target_tension.clamp(0.0, 1.0);
        self.spin += (SPIN_BASE_PER_FRAME + SPIN_TENSION_PER_FRAME * target) * config.movement_speed;
        self.spin %= std::f32::consts::TAU;
        let tension = self.tension.update(target);
        FrameUniforms {
            time: self.elapsed * config.movement_speed,
            tension,
            spin: self.spin,
            color: config.color.to_linear_rgb(),
            shape: ShapeUniforms::of(config),
        }
    }
}
