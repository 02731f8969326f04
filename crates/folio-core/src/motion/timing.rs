//! Time calculation utilities
//!
//! Pure helpers for animation progress and interpolation.

use std::time::Duration;

/// Fraction of `duration` covered by `elapsed`, clamped to [0.0, 1.0]
///
/// A zero duration counts as already complete.
#[inline]
pub fn fraction(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (scroll positions)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

/// Map `value` from the `input` range onto the `output` range, clamping to
/// the output ends instead of extrapolating.
#[inline]
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in_start, in_end) = input;
    let span = in_end - in_start;
    let t = if span.abs() < f64::EPSILON {
        if value >= in_end {
            1.0
        } else {
            0.0
        }
    } else {
        ((value - in_start) / span).clamp(0.0, 1.0)
    };
    lerp(output.0, output.1, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_u16() {
        assert_eq!(lerp_u16(0, 100, 0.0), 0);
        assert_eq!(lerp_u16(0, 100, 0.5), 50);
        assert_eq!(lerp_u16(0, 100, 1.0), 100);
    }

    #[test]
    fn test_fraction_zero_duration() {
        assert_eq!(fraction(Duration::from_millis(5), Duration::ZERO), 1.0);
    }

    #[test]
    fn test_fraction_clamps() {
        let d = Duration::from_millis(100);
        assert!((fraction(Duration::from_millis(50), d) - 0.5).abs() < 1e-9);
        assert_eq!(fraction(Duration::from_millis(500), d), 1.0);
    }

    #[test]
    fn test_map_range_clamps_both_ends() {
        assert_eq!(map_range(-1.0, (0.0, 1.0), (20.0, -10.0)), 20.0);
        assert_eq!(map_range(2.0, (0.0, 1.0), (20.0, -10.0)), -10.0);
        assert!((map_range(0.5, (0.0, 1.0), (20.0, -10.0)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_map_range_degenerate_input() {
        assert_eq!(map_range(0.2, (0.5, 0.5), (0.0, 1.0)), 0.0);
        assert_eq!(map_range(0.5, (0.5, 0.5), (0.0, 1.0)), 1.0);
    }
}
