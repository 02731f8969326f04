//! Tick-driven tween between two scalar values.
//!
//! State machines in this crate advance time explicitly with `advance(dt)`
//! instead of reading a wall clock, so a superseding transition can start
//! from whatever value is currently on screen.

use std::time::Duration;

use super::easing::EasingType;
use super::timing::{fraction, lerp};

#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingType,
}

impl Tween {
    /// A tween already resting at `value`
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            easing: EasingType::Linear,
        }
    }

    pub fn new(from: f64, to: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// Restart towards `to`, beginning at the current interpolated value.
    pub fn retarget(&mut self, to: f64, duration: Duration, easing: EasingType) {
        *self = Self::new(self.value(), to, duration, easing);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    pub fn value(&self) -> f64 {
        let t = self.easing.apply(fraction(self.elapsed, self.duration));
        lerp(self.from, self.to, t)
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}
