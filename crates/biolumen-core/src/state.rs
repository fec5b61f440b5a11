//! Camera state shared with the web frontend.
//!
//! These types avoid platform-specific APIs. The frontend feeds pointer and
//! wheel deltas into [`OrbitCamera`] and reads back a [`Camera`] each frame.

use crate::constants::{
    AUTO_ROTATE_SPEED, CAMERA_DISTANCE, CAMERA_FOVY_DEGREES, CAMERA_ZFAR, CAMERA_ZNEAR,
    ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_ROTATE_PER_PIXEL,
};
use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

const POLAR_EPSILON: f32 = 1e-3;

/// Orbit around the origin with damping, zoom limits and optional
/// auto-rotation. No panning.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    azimuth: f32,
    polar: f32,
    distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Looking down -Z from (0, 0, CAMERA_DISTANCE)
        Self {
            azimuth: 0.0,
            polar: FRAC_PI_2,
            distance: CAMERA_DISTANCE,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 1.0,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Queue a drag of `dx`, `dy` canvas pixels.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32) {
        self.pending_azimuth -= dx_px * ORBIT_ROTATE_PER_PIXEL;
        self.pending_polar -= dy_px * ORBIT_ROTATE_PER_PIXEL;
    }

    /// Queue a zoom; `factor` > 1 moves away.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.pending_zoom *= factor;
        }
    }

    /// Apply a damped share of the queued motion and, when `auto_rotate`
    /// is set, a slow constant spin.
    pub fn update(&mut self, dt_sec: f32, auto_rotate: bool) {
        if auto_rotate {
            self.azimuth += TAU / 60.0 * AUTO_ROTATE_SPEED * dt_sec.max(0.0);
        }

        self.azimuth += self.pending_azimuth * ORBIT_DAMPING;
        self.polar = (self.polar + self.pending_polar * ORBIT_DAMPING)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        self.pending_azimuth *= 1.0 - ORBIT_DAMPING;
        self.pending_polar *= 1.0 - ORBIT_DAMPING;

        self.distance =
            (self.distance * self.pending_zoom).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        self.pending_zoom = 1.0;

        self.azimuth %= TAU;
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.polar.sin();
        Vec3::new(
            self.distance * s * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            self.distance * s * self.azimuth.cos(),
        )
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_positive_z_axis() {
        let eye = OrbitCamera::new().eye();
        assert!(eye.x.abs() < 1e-5);
        assert!(eye.y.abs() < 1e-4);
        assert!((eye.z - CAMERA_DISTANCE).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut o = OrbitCamera::new();
        o.zoom(100.0);
        o.update(0.016, false);
        assert_eq!(o.distance(), ORBIT_MAX_DISTANCE);
        o.zoom(0.0001);
        o.update(0.016, false);
        assert_eq!(o.distance(), ORBIT_MIN_DISTANCE);
    }

    #[test]
    fn drag_motion_is_damped_over_frames() {
        let mut o = OrbitCamera::new();
        o.rotate(100.0, 0.0);
        o.update(0.0, false);
        let first = o.azimuth();
        o.update(0.0, false);
        let second = o.azimuth() - first;
        assert!(first < 0.0);
        assert!(second.abs() < first.abs());
    }

    #[test]
    fn auto_rotate_only_when_requested() {
        let mut o = OrbitCamera::new();
        o.update(1.0, false);
        assert_eq!(o.azimuth(), 0.0);
        o.update(1.0, true);
        assert!(o.azimuth() > 0.0);
    }

    #[test]
    fn eye_distance_matches_orbit_radius() {
        let mut o = OrbitCamera::new();
        o.rotate(250.0, -120.0);
        for _ in 0..30 {
            o.update(0.016, true);
        }
        assert!((o.eye().length() - o.distance()).abs() < 1e-3);
    }
}
