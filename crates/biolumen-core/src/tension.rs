use std::cell::Cell;
use std::rc::Rc;

/// One-pole exponential filter: `value += (target - value) * alpha`.
///
/// Targets are clamped to [0, 1]; with `alpha` in (0, 1] the output can
/// never leave that range.
#[derive(Clone, Copy, Debug)]
pub struct Smoother {
    value: f32,
    alpha: f32,
}

impl Smoother {
    pub fn new(alpha: f32) -> Self {
        Self {
            value: 0.0,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn update(&mut self, target: f32) -> f32 {
        let target = if target.is_finite() {
            target.clamp(0.0, 1.0)
        } else {
            self.value
        };
        self.value = (self.value + (target - self.value) * self.alpha).clamp(0.0, 1.0);
        self.value
    }
}

/// Process-wide tension scalar shared by the sensor and render loops.
///
/// Both loops run on the same event loop, so a plain `Cell` gives
/// last-value-wins semantics without locking.
#[derive(Clone, Debug, Default)]
pub struct TensionSignal(Rc<Cell<f32>>);

impl TensionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> f32 {
        self.0.get()
    }

    /// Non-finite readings are dropped; the previous value stays.
    pub fn set(&self, value: f32) {
        if value.is_finite() {
            self.0.set(value.clamp(0.0, 1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_towards_target() {
        let mut s = Smoother::new(0.1);
        for _ in 0..200 {
            s.update(1.0);
        }
        assert!((s.value() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn first_step_is_alpha_fraction() {
        let mut s = Smoother::new(0.15);
        assert!((s.update(1.0) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn signal_clones_share_value() {
        let a = TensionSignal::new();
        let b = a.clone();
        a.set(0.4);
        assert_eq!(b.get(), 0.4);
        b.set(3.0);
        assert_eq!(a.get(), 1.0);
    }

    #[test]
    fn signal_ignores_non_finite_values() {
        let s = TensionSignal::new();
        s.set(0.25);
        for v in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            s.set(v);
            assert_eq!(s.get(), 0.25);
        }
    }
}
