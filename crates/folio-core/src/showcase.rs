//! The projects section: carousel lanes plus the detail overlay.
//!
//! `Showcase` is the only place the two are wired together. The overlay owns
//! the pause writer, the lanes read it, so the carousel is paused exactly
//! while a panel is open.

use std::sync::Arc;
use std::time::Duration;

use crate::carousel::{pause_flag, CarouselConfig, CarouselOrchestrator};
use crate::content::CarouselItem;
use crate::overlay::{DetailOverlay, OverlayConfig, PointerTarget, ScrollLock};

#[derive(Debug)]
pub struct Showcase {
    carousel: CarouselOrchestrator,
    overlay: DetailOverlay,
}

impl Showcase {
    pub fn new(
        items: Vec<Arc<CarouselItem>>,
        carousel: &CarouselConfig,
        overlay: OverlayConfig,
        lock: ScrollLock,
    ) -> Self {
        let (writer, signal) = pause_flag();
        Self {
            carousel: CarouselOrchestrator::new(items, carousel, signal),
            overlay: DetailOverlay::new(lock, writer, overlay),
        }
    }

    pub fn carousel(&self) -> &CarouselOrchestrator {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut CarouselOrchestrator {
        &mut self.carousel
    }

    pub fn overlay(&self) -> &DetailOverlay {
        &self.overlay
    }

    /// Open the item shown at `position` of `lane`
    pub fn select(&mut self, lane: usize, position: usize) -> Option<Arc<CarouselItem>> {
        let item = self.carousel.select(lane, position)?;
        self.overlay.select(item.clone());
        Some(item)
    }

    pub fn dismiss(&mut self) -> bool {
        self.overlay.dismiss()
    }

    pub fn on_pointer(&mut self, target: PointerTarget) -> bool {
        self.overlay.on_pointer(target)
    }

    pub fn tick(&mut self, dt: Duration) {
        self.carousel.tick(dt);
        self.overlay.tick(dt);
    }

    pub fn is_animating(&self) -> bool {
        self.carousel.is_animating() || self.overlay.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::LaneConfig;
    use crate::content::{ItemKey, MediaRef};
    use crate::overlay::OverlayState;

    fn items(n: usize) -> Vec<Arc<CarouselItem>> {
        (0..n)
            .map(|i| {
                Arc::new(CarouselItem {
                    title: format!("item{}", i),
                    summary: String::new(),
                    role: String::new(),
                    tasks: Vec::new(),
                    result: String::new(),
                    image: MediaRef::new(format!("/img/{}.jpg", i)),
                    video: None,
                    extra_videos: Vec::new(),
                    logo: None,
                    tags: Vec::new(),
                })
            })
            .collect()
    }

    fn showcase(list: Vec<Arc<CarouselItem>>) -> (Showcase, ScrollLock) {
        let config = CarouselConfig {
            lanes: vec![
                LaneConfig::new(0, 60.0),
                LaneConfig::new(3, 75.0),
                LaneConfig::new(6, 85.0).hidden_below(100),
            ],
            ..Default::default()
        };
        let lock = ScrollLock::new();
        let showcase = Showcase::new(list, &config, OverlayConfig::default(), lock.clone());
        (showcase, lock)
    }

    #[test]
    fn test_select_from_second_lane_opens_canonical_item() {
        let list = items(6);
        let (mut showcase, lock) = showcase(list.clone());
        assert_eq!(showcase.carousel().visible_lanes(80), vec![0, 1]);
        assert_eq!(showcase.carousel().key_at(1, 1), Some(ItemKey(4)));

        showcase.select(1, 1).unwrap();
        match showcase.overlay().state() {
            OverlayState::Open(item) => assert!(Arc::ptr_eq(item, &list[4])),
            OverlayState::Closed => panic!("overlay should be open"),
        }
        assert!(showcase.carousel().is_paused());
        assert!(lock.is_locked());
    }

    #[test]
    fn test_paused_exactly_while_open() {
        let (mut showcase, lock) = showcase(items(6));
        showcase.tick(Duration::from_secs(6));
        let before: Vec<Duration> = showcase
            .carousel()
            .lanes()
            .iter()
            .map(|l| l.marquee().clock())
            .collect();

        showcase.select(0, 2).unwrap();
        showcase.tick(Duration::from_secs(6));
        let during: Vec<Duration> = showcase
            .carousel()
            .lanes()
            .iter()
            .map(|l| l.marquee().clock())
            .collect();
        assert_eq!(before, during);

        assert!(showcase.on_pointer(PointerTarget::Backdrop));
        assert!(!showcase.carousel().is_paused());
        assert!(!lock.is_locked());
        showcase.tick(Duration::from_secs(6));
        assert_eq!(showcase.carousel().lanes()[0].marquee().clock(), Duration::from_secs(12));
    }

    #[test]
    fn test_hover_survives_overlay_close() {
        let (mut showcase, _lock) = showcase(items(6));
        showcase.carousel_mut().set_hover(0, true);
        showcase.select(0, 0).unwrap();
        showcase.dismiss();
        assert!(!showcase.carousel().is_paused());
        assert!(showcase.carousel().lane_paused(0));
        assert!(!showcase.carousel().lane_paused(1));
    }

    #[test]
    fn test_select_out_of_range_leaves_overlay_closed() {
        let (mut showcase, lock) = showcase(items(2));
        assert!(showcase.select(0, 5).is_none());
        assert!(!showcase.overlay().is_open());
        assert!(!lock.is_locked());
    }
}
