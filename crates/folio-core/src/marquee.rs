//! Infinite marquee strip
//!
//! A lane's sequence is laid end to end `repeat` times and the strip is
//! translated by one copy's extent per cycle, looping. The copies exist only
//! in the slots produced by [`MarqueeLoop::layout`]; the sequence itself is
//! never duplicated.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Direction the strip runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

/// Effective pause: either source pauses the lane
#[inline]
pub fn combine_pause(external: bool, hovered: bool) -> bool {
    external || hovered
}

/// Size of one item plus the gap after it, along the strip axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    pub item: usize,
    pub gap: usize,
}

impl Pitch {
    pub fn new(item: usize, gap: usize) -> Self {
        Self { item, gap }
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.item + self.gap
    }

    /// Extent of one full copy of a sequence of `len` items
    #[inline]
    pub fn copy_extent(&self, len: usize) -> usize {
        len * self.step()
    }
}

/// One rendered occurrence of a sequence item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Index into the lane sequence
    pub position: usize,
    /// Which copy of the sequence this occurrence belongs to
    pub copy: usize,
    /// Leading edge relative to the viewport start; negative when clipped
    pub start: i64,
}

#[derive(Debug, Clone)]
pub struct MarqueeLoop {
    cycle: Duration,
    axis: Axis,
    reverse: bool,
    repeat: usize,
    /// Accumulated un-paused motion time
    clock: Duration,
    hovered: bool,
}

impl MarqueeLoop {
    pub const MIN_REPEAT: usize = 2;

    pub fn new(cycle: Duration, axis: Axis) -> Self {
        Self {
            cycle,
            axis,
            reverse: false,
            repeat: 4,
            clock: Duration::ZERO,
            hovered: false,
        }
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat.max(Self::MIN_REPEAT);
        self
    }

    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn repeat(&self) -> usize {
        self.repeat
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_paused(&self, external: bool) -> bool {
        combine_pause(external, self.hovered)
    }

    /// Advance the motion clock unless paused. Returns whether it moved.
    pub fn tick(&mut self, dt: Duration, external_paused: bool) -> bool {
        if self.is_paused(external_paused) || self.cycle.is_zero() || dt.is_zero() {
            return false;
        }
        // Keep the clock bounded; only its position within a cycle matters.
        let cycle = self.cycle.as_nanos();
        let next = (self.clock.as_nanos() + dt.as_nanos()) % cycle;
        self.clock = Duration::from_nanos(u64::try_from(next).unwrap_or(u64::MAX));
        true
    }

    /// Position within the current cycle, in [0, 1)
    pub fn phase(&self) -> f64 {
        let cycle = self.cycle.as_nanos();
        if cycle == 0 {
            return 0.0;
        }
        (self.clock.as_nanos() % cycle) as f64 / cycle as f64
    }

    /// Translation of the strip in cells for a copy of `copy_extent` cells
    pub fn offset(&self, copy_extent: usize) -> usize {
        let cycle = self.cycle.as_nanos();
        if copy_extent == 0 || cycle == 0 {
            return 0;
        }
        let within = self.clock.as_nanos() % cycle;
        let forward = (within * copy_extent as u128 / cycle) as usize % copy_extent;
        if self.reverse {
            (copy_extent - forward) % copy_extent
        } else {
            forward
        }
    }

    /// Copies of the sequence the strip needs so that it still covers
    /// `viewport` cells at the largest offset. Never fewer than `repeat`.
    pub fn copies(&self, len: usize, pitch: Pitch, viewport: usize) -> usize {
        let copy_extent = pitch.copy_extent(len);
        if copy_extent == 0 {
            return self.repeat;
        }
        self.repeat.max(viewport.div_ceil(copy_extent) + 1)
    }

    /// Visible slots of the duplicated strip for a viewport of `viewport`
    /// cells, in strip order.
    pub fn layout(&self, len: usize, pitch: Pitch, viewport: usize) -> Vec<Slot> {
        let step = pitch.step();
        if len == 0 || step == 0 || viewport == 0 {
            return Vec::new();
        }
        let offset = self.offset(pitch.copy_extent(len));
        let total = len * self.copies(len, pitch, viewport);
        let mut slots = Vec::new();
        let mut k = offset / step;
        while k < total {
            let start = (k * step) as i64 - offset as i64;
            if start >= viewport as i64 {
                break;
            }
            slots.push(Slot {
                position: k % len,
                copy: k / len,
                start,
            });
            k += 1;
        }
        slots
    }

    /// Sequence position rendered at `coordinate` cells from the viewport
    /// start, or `None` when that cell is a gap or past the strip.
    pub fn hit_test(&self, len: usize, pitch: Pitch, coordinate: usize) -> Option<usize> {
        let step = pitch.step();
        if len == 0 || step == 0 {
            return None;
        }
        let strip = self.offset(pitch.copy_extent(len)) + coordinate;
        let k = strip / step;
        if k >= len * self.copies(len, pitch, coordinate + 1) || strip % step >= pitch.item {
            return None;
        }
        Some(k % len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(secs: u64) -> MarqueeLoop {
        MarqueeLoop::new(Duration::from_secs(secs), Axis::Vertical)
    }

    #[test]
    fn test_combine_pause_truth_table() {
        assert!(!combine_pause(false, false));
        assert!(combine_pause(true, false));
        assert!(combine_pause(false, true));
        assert!(combine_pause(true, true));
    }

    #[test]
    fn test_pause_resumes_from_same_offset() {
        let mut marquee = lane(60);
        marquee.tick(Duration::from_secs(15), false);
        let paused_at = marquee.phase();
        assert!((paused_at - 0.25).abs() < 1e-9);

        // Paused externally: time passes, nothing moves
        assert!(!marquee.tick(Duration::from_secs(30), true));
        assert_eq!(marquee.phase(), paused_at);

        // Paused by hover
        marquee.set_hovered(true);
        assert!(!marquee.tick(Duration::from_secs(30), false));
        assert_eq!(marquee.phase(), paused_at);

        marquee.set_hovered(false);
        marquee.tick(Duration::from_secs(15), false);
        assert!((marquee.phase() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_phase_wraps() {
        let mut marquee = lane(10);
        marquee.tick(Duration::from_secs(25), false);
        assert!((marquee.phase() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cycle_is_static() {
        let mut marquee = lane(0);
        assert!(!marquee.tick(Duration::from_secs(5), false));
        assert_eq!(marquee.phase(), 0.0);
        assert_eq!(marquee.offset(100), 0);
    }

    #[test]
    fn test_offset_reverse() {
        let mut marquee = lane(4).with_reverse(true);
        assert_eq!(marquee.offset(40), 0);
        marquee.tick(Duration::from_secs(1), false);
        assert_eq!(marquee.offset(40), 30);
    }

    #[test]
    fn test_layout_at_rest() {
        let marquee = lane(60);
        let slots = marquee.layout(3, Pitch::new(4, 1), 12);
        let positions: Vec<usize> = slots.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(slots[2].start, 10);
    }

    #[test]
    fn test_layout_wraps_into_next_copy() {
        let mut marquee = lane(60);
        // copy extent = 3 * 5 = 15 cells; a third of the cycle moves 5 cells
        marquee.tick(Duration::from_secs(20), false);
        let slots = marquee.layout(3, Pitch::new(4, 1), 12);
        let seen: Vec<(usize, usize, i64)> = slots.iter().map(|s| (s.position, s.copy, s.start)).collect();
        assert_eq!(seen, vec![(1, 0, 0), (2, 0, 5), (0, 1, 10)]);
    }

    #[test]
    fn test_layout_partially_clipped_slot() {
        let mut marquee = lane(60);
        // 2 cells into the strip
        marquee.tick(Duration::from_secs(8), false);
        let slots = marquee.layout(3, Pitch::new(4, 1), 6);
        assert_eq!(slots[0].start, -2);
        assert_eq!(slots[0].position, 0);
        assert_eq!(slots[1].start, 3);
    }

    #[test]
    fn test_layout_stops_at_viewport_end() {
        let marquee = lane(60).with_repeat(2);
        let slots = marquee.layout(2, Pitch::new(2, 0), 100);
        assert_eq!(slots.len(), 50);
        assert_eq!(slots.last().map(|s| s.start), Some(98));
        assert!(marquee.layout(0, Pitch::new(2, 0), 10).is_empty());
    }

    #[test]
    fn test_layout_single_item_fills_tall_viewport() {
        let mut marquee = lane(60);
        let pitch = Pitch::new(6, 1);
        // One step short of a full cycle: the largest offset
        marquee.tick(Duration::from_secs(59), false);
        assert_eq!(marquee.offset(pitch.copy_extent(1)), 6);

        let slots = marquee.layout(1, pitch, 24);
        let last = slots.last().map(|s| s.start + 6).unwrap_or_default();
        assert!(last >= 24, "strip ends at {} inside 24 cells", last);
        assert!(slots.iter().all(|s| s.position == 0));
        assert_eq!(marquee.hit_test(1, pitch, 23), Some(0));
    }

    #[test]
    fn test_copies_grow_with_viewport() {
        let marquee = lane(60);
        let pitch = Pitch::new(6, 1);
        assert_eq!(marquee.copies(3, pitch, 10), 4);
        assert_eq!(marquee.copies(1, pitch, 24), 5);
        assert_eq!(marquee.copies(1, pitch, 70), 11);
    }

    #[test]
    fn test_tick_with_huge_cycle_saturates() {
        let mut marquee = MarqueeLoop::new(Duration::MAX, Axis::Vertical);
        assert!(marquee.tick(Duration::from_secs(3600), false));
        assert_eq!(marquee.clock(), Duration::from_secs(3600));

        marquee.tick(Duration::from_nanos(u64::MAX), false);
        assert_eq!(marquee.clock(), Duration::from_nanos(u64::MAX));
    }

    #[test]
    fn test_hit_test() {
        let mut marquee = lane(60);
        let pitch = Pitch::new(4, 1);
        assert_eq!(marquee.hit_test(3, pitch, 0), Some(0));
        assert_eq!(marquee.hit_test(3, pitch, 4), None);
        assert_eq!(marquee.hit_test(3, pitch, 5), Some(1));
        marquee.tick(Duration::from_secs(20), false);
        assert_eq!(marquee.hit_test(3, pitch, 0), Some(1));
        assert_eq!(marquee.hit_test(3, pitch, 10), Some(0));
    }

    #[test]
    fn test_repeat_has_minimum() {
        assert_eq!(lane(1).with_repeat(0).repeat(), MarqueeLoop::MIN_REPEAT);
    }
}
