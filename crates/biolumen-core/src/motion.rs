//! Frame-differencing motion sensor.
//!
//! Each processed frame is an RGBA buffer already downsampled to the sensor
//! resolution (64x48 by default). Activity is the summed absolute RGB
//! difference against the previous frame, normalized by
//! `pixel_count * sensitivity_divisor` and clamped to 1.

use crate::constants::{SAMPLE_HEIGHT, SAMPLE_WIDTH, SENSITIVITY_DIVISOR};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SensorStatus {
    #[default]
    Idle,
    Active,
    Denied,
    Error,
}

impl SensorStatus {
    pub fn is_unavailable(self) -> bool {
        matches!(self, SensorStatus::Denied | SensorStatus::Error)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SensorError {
    #[error("motion sensor unavailable ({0:?})")]
    Unavailable(SensorStatus),
    #[error("frame holds {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
}

pub struct MotionSensor {
    width: u32,
    height: u32,
    sensitivity_divisor: f32,
    previous: Option<Vec<u8>>,
    status: SensorStatus,
}

impl Default for MotionSensor {
    fn default() -> Self {
        Self::new(SAMPLE_WIDTH, SAMPLE_HEIGHT, SENSITIVITY_DIVISOR)
    }
}

impl MotionSensor {
    pub fn new(width: u32, height: u32, sensitivity_divisor: f32) -> Self {
        Self {
            width,
            height,
            sensitivity_divisor,
            previous: None,
            status: SensorStatus::Idle,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    pub fn frame_len(&self) -> usize {
        (self.width * self.height * 4) as usize
    }

    /// Diff `rgba` against the stored frame and keep it for the next call.
    /// The first frame after construction or [`reset`](Self::reset) reads 0.
    pub fn process(&mut self, rgba: &[u8]) -> Result<f32, SensorError> {
        if self.status.is_unavailable() {
            return Err(SensorError::Unavailable(self.status));
        }
        let expected = self.frame_len();
        if rgba.len() != expected {
            return Err(SensorError::FrameSize {
                expected,
                actual: rgba.len(),
            });
        }
        self.status = SensorStatus::Active;
        let activity = match &self.previous {
            Some(prev) => frame_difference(prev, rgba, self.sensitivity_divisor),
            None => 0.0,
        };
        match &mut self.previous {
            Some(prev) => prev.copy_from_slice(rgba),
            None => self.previous = Some(rgba.to_vec()),
        }
        Ok(activity)
    }

    /// Forget the stored frame; the sensor keeps its status.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Permanently halt after capture denial or failure.
    pub fn mark_unavailable(&mut self, status: SensorStatus) {
        debug_assert!(status.is_unavailable());
        self.status = status;
        self.previous = None;
    }

    pub fn shutdown(&mut self) {
        self.previous = None;
        if !self.status.is_unavailable() {
            self.status = SensorStatus::Idle;
        }
    }
}

/// Normalized activity between two equally sized RGBA frames. Alpha is
/// ignored.
pub fn frame_difference(prev: &[u8], cur: &[u8], sensitivity_divisor: f32) -> f32 {
    let pixels = prev.len().min(cur.len()) / 4;
    if pixels == 0 {
        return 0.0;
    }
    let sum: u64 = prev
        .chunks_exact(4)
        .zip(cur.chunks_exact(4))
        .map(|(a, b)| {
            (a[0].abs_diff(b[0]) as u64) + (a[1].abs_diff(b[1]) as u64) + (a[2].abs_diff(b[2]) as u64)
        })
        .sum();
    (sum as f32 / (pixels as f32 * sensitivity_divisor)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_frame_size_is_rejected_without_touching_state() {
        let mut s = MotionSensor::new(2, 2, 25.0);
        assert_eq!(
            s.process(&[0; 8]),
            Err(SensorError::FrameSize {
                expected: 16,
                actual: 8
            })
        );
        assert_eq!(s.status(), SensorStatus::Idle);
    }

    #[test]
    fn unavailable_sensor_stays_silent() {
        let mut s = MotionSensor::new(2, 2, 25.0);
        s.mark_unavailable(SensorStatus::Denied);
        assert_eq!(
            s.process(&[0; 16]),
            Err(SensorError::Unavailable(SensorStatus::Denied))
        );
        s.shutdown();
        assert_eq!(s.status(), SensorStatus::Denied);
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let a = [10, 20, 30, 0, 10, 20, 30, 0];
        let b = [10, 20, 30, 255, 10, 20, 30, 255];
        assert_eq!(frame_difference(&a, &b, 25.0), 0.0);
    }
}
