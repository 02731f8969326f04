//! Scroll animation controller
//!
//! Frame-time driven: the main loop passes the elapsed time to `update()`
//! so animations stay deterministic under test.

use std::time::Duration;

use folio_core::motion::{fraction, lerp_u16};

use super::config::{EasingType, ScrollConfig, ScrollConfigExt};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    elapsed: Duration,
    /// Starting scroll position
    from: u16,
    /// Target scroll position
    to: u16,
    duration: Duration,
    easing: EasingType,
}

/// Scroll animation controller
///
/// Call `scroll_by()`/`scroll_to()` to begin an animation, then `update()`
/// each frame to get the current interpolated scroll position.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Current scroll position (always up-to-date)
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation or pending delta)
    /// Use this to determine if we need high frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Get the target scroll position (final position after animation)
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Set scroll position immediately (no animation)
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Animate to a target position with the regular duration
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16) {
        let duration = self.config.animation_duration();
        self.scroll_to_over(target, max_scroll, duration);
    }

    /// Animate to a target position over `duration`
    ///
    /// If smooth scrolling is disabled, jumps immediately to target.
    pub fn scroll_to_over(&mut self, target: u16, max_scroll: u16, duration: Duration) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.config.is_smooth() || duration.is_zero() {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        let from = self.current_scroll;
        if from == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            elapsed: Duration::ZERO,
            from,
            to: target,
            duration,
            easing: self.config.easing,
        });
    }

    /// Scroll by a delta amount (positive = down, negative = up)
    ///
    /// Multiple scroll events within the same animation frame are batched
    /// together for smoother handling of rapid key presses.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.config.is_smooth() {
            let new_scroll = (self.current_scroll as i32 + delta).clamp(0, max_scroll as i32) as u16;
            self.current_scroll = new_scroll;
            self.animation = None;
            return;
        }

        self.pending_delta += delta;
    }

    /// Scroll down by configured line count
    pub fn scroll_down(&mut self, max_scroll: u16) {
        let lines = if self.config.is_smooth() {
            1
        } else {
            self.config.scroll_lines.max(1) as i32
        };
        self.scroll_by(lines, max_scroll);
    }

    /// Scroll up by configured line count
    pub fn scroll_up(&mut self, max_scroll: u16) {
        let lines = if self.config.is_smooth() {
            1
        } else {
            self.config.scroll_lines.max(1) as i32
        };
        self.scroll_by(-lines, max_scroll);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(half_page, max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(-half_page, max_scroll);
    }

    pub fn scroll_full_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(viewport_height as i32, max_scroll);
    }

    pub fn scroll_full_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-(viewport_height as i32), max_scroll);
    }

    /// Advance by `dt` and return the current scroll position
    pub fn update(&mut self, dt: Duration, max_scroll: u16) -> u16 {
        if self.pending_delta != 0 {
            let target = self.target_scroll();
            let new_target = (target as i32 + self.pending_delta).clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    elapsed: Duration::ZERO,
                    from: self.current_scroll,
                    to: new_target,
                    duration: self.config.animation_duration(),
                    easing: self.config.easing,
                });
                // The frame that starts an animation does not move it
                return self.current_scroll;
            }
        }

        if let Some(anim) = self.animation.as_mut() {
            anim.elapsed = anim.elapsed.saturating_add(dt);
            if anim.elapsed >= anim.duration {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(fraction(anim.elapsed, anim.duration));
                self.current_scroll = lerp_u16(anim.from, anim.to, t).min(max_scroll);
            }
        } else {
            self.current_scroll = self.current_scroll.min(max_scroll);
        }

        self.current_scroll
    }

    /// Cancel any active animation and stop at current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(ms: u64) -> ScrollAnimator {
        ScrollAnimator::new(ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: ms,
            easing: EasingType::Linear,
            ..Default::default()
        })
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.scroll_to(100, 200);
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());

        animator.scroll_down(200);
        assert_eq!(animator.current_scroll(), 101);
    }

    #[test]
    fn test_animation_reaches_target() {
        let mut animator = smooth(100);
        animator.scroll_to(100, 200);
        assert!(animator.is_animating());
        assert_eq!(animator.target_scroll(), 100);

        assert_eq!(animator.update(Duration::from_millis(50), 200), 50);
        assert_eq!(animator.update(Duration::from_millis(50), 200), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_scroll_by_batching() {
        let mut animator = smooth(100);

        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);
        animator.scroll_by(10, 200);

        animator.update(Duration::ZERO, 200);
        assert_eq!(animator.target_scroll(), 30);
    }

    #[test]
    fn test_scroll_clamp_max() {
        let mut animator = smooth(100);
        animator.set_scroll(50);
        animator.scroll_to(300, 100);
        animator.update(Duration::from_millis(200), 100);
        assert_eq!(animator.current_scroll(), 100);
    }

    #[test]
    fn test_cancel_stops_in_place() {
        let mut animator = smooth(100);
        animator.scroll_to(100, 200);
        animator.update(Duration::from_millis(50), 200);
        animator.cancel();
        assert!(!animator.needs_update());
        assert_eq!(animator.update(Duration::from_millis(50), 200), 50);
    }

    #[test]
    fn test_scroll_to_over_custom_duration() {
        let mut animator = smooth(100);
        animator.scroll_to_over(80, 200, Duration::from_millis(400));
        assert_eq!(animator.update(Duration::from_millis(100), 200), 20);
    }
}
