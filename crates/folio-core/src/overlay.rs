//! Detail side panel and the page scroll lock
//!
//! The overlay is a two-state machine (`Closed`, `Open(item)`). Opening
//! acquires the page scroll lock and pauses the carousel; closing releases
//! both. The lock is held through a [`ScrollLockGuard`], so dropping the
//! overlay while it is open still unlocks the page.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::carousel::PauseWriter;
use crate::content::{CarouselItem, MediaRef, MediaResolver};
use crate::motion::{EasingType, Tween};

#[derive(Debug, Default)]
struct LockState {
    held: Cell<bool>,
    acquisitions: Cell<usize>,
}

/// Page-wide background scroll lock
///
/// Anyone holding a clone can observe the lock; only the overlay can take it.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    state: Rc<LockState>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.state.held.get()
    }

    /// Number of times the lock went from released to held
    pub fn acquisitions(&self) -> usize {
        self.state.acquisitions.get()
    }

    /// Take the lock, or `None` if it is already held
    pub(crate) fn try_acquire(&self) -> Option<ScrollLockGuard> {
        if self.state.held.replace(true) {
            return None;
        }
        self.state.acquisitions.set(self.state.acquisitions.get() + 1);
        debug!("page scroll locked");
        Some(ScrollLockGuard {
            state: self.state.clone(),
        })
    }
}

/// Releases the scroll lock when dropped
#[derive(Debug)]
pub struct ScrollLockGuard {
    state: Rc<LockState>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.state.held.set(false);
        debug!("page scroll unlocked");
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum OverlayState {
    #[default]
    Closed,
    Open(Arc<CarouselItem>),
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        matches!(self, OverlayState::Open(_))
    }

    pub fn item(&self) -> Option<&Arc<CarouselItem>> {
        match self {
            OverlayState::Open(item) => Some(item),
            OverlayState::Closed => None,
        }
    }
}

/// Where a pointer press landed while the panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Panel,
    Backdrop,
    CloseControl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Panel width as a percent of the viewport
    #[serde(default = "default_panel_width_percent")]
    pub panel_width_percent: u16,
    /// Slide transition length; 0 disables the animation
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    #[serde(default = "default_overlay_easing")]
    pub easing: EasingType,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            panel_width_percent: default_panel_width_percent(),
            animation_ms: default_animation_ms(),
            easing: default_overlay_easing(),
        }
    }
}

impl OverlayConfig {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

fn default_panel_width_percent() -> u16 {
    60
}

fn default_animation_ms() -> u64 {
    300
}

fn default_overlay_easing() -> EasingType {
    EasingType::Cubic
}

#[derive(Debug)]
pub struct DetailOverlay {
    state: OverlayState,
    /// Item drawn while the slide-out runs
    exiting: Option<Arc<CarouselItem>>,
    lock: ScrollLock,
    guard: Option<ScrollLockGuard>,
    pause: PauseWriter,
    /// 0 = off screen, 1 = fully shown
    slide: Tween,
    config: OverlayConfig,
}

impl DetailOverlay {
    pub fn new(lock: ScrollLock, pause: PauseWriter, config: OverlayConfig) -> Self {
        Self {
            state: OverlayState::Closed,
            exiting: None,
            lock,
            guard: None,
            pause,
            slide: Tween::settled(0.0),
            config,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn lock(&self) -> &ScrollLock {
        &self.lock
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Open on `item`, replacing whatever is open. The latest call wins.
    pub fn select(&mut self, item: Arc<CarouselItem>) {
        debug!(title = %item.title, replacing = self.is_open(), "overlay open");
        self.state = OverlayState::Open(item);
        self.exiting = None;
        if self.guard.is_none() {
            self.guard = self.lock.try_acquire();
        }
        self.pause.set(true);
        if self.slide.target() < 1.0 {
            self.slide
                .retarget(1.0, self.config.animation(), self.config.easing);
        }
    }

    /// Close the panel. Returns false when it was already closed.
    pub fn dismiss(&mut self) -> bool {
        let OverlayState::Open(item) = std::mem::take(&mut self.state) else {
            return false;
        };
        debug!(title = %item.title, "overlay dismissed");
        self.exiting = Some(item);
        self.guard = None;
        self.pause.set(false);
        self.slide
            .retarget(0.0, self.config.animation(), self.config.easing);
        true
    }

    /// Route a pointer press. Returns true when it closed the panel.
    pub fn on_pointer(&mut self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Panel => false,
            PointerTarget::Backdrop | PointerTarget::CloseControl => self.dismiss(),
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.slide.advance(dt);
        if self.slide.is_complete() && !self.is_open() {
            self.exiting = None;
        }
    }

    /// How far the panel has slid in, in [0, 1]
    pub fn reveal(&self) -> f64 {
        self.slide.value()
    }

    pub fn is_animating(&self) -> bool {
        !self.slide.is_complete()
    }

    /// Item to draw: the open one, or the one sliding out
    pub fn visible_item(&self) -> Option<&Arc<CarouselItem>> {
        self.state.item().or(self.exiting.as_ref())
    }

    pub fn detail(&self, resolver: &dyn MediaResolver) -> Option<DetailView> {
        self.visible_item()
            .map(|item| DetailView::build(item, resolver))
    }
}

impl Drop for DetailOverlay {
    fn drop(&mut self) {
        if self.is_open() {
            debug!("overlay dropped while open");
            self.pause.set(false);
        }
    }
}

/// Media slot in the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaView {
    /// Playable embed with a poster image
    Video { embed: String, thumbnail: MediaRef },
    /// Static image only
    Thumbnail(MediaRef),
}

impl MediaView {
    pub fn embed(&self) -> Option<&str> {
        match self {
            MediaView::Video { embed, .. } => Some(embed),
            MediaView::Thumbnail(_) => None,
        }
    }
}

/// Everything the panel shows for one item
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub summary: String,
    pub logo: Option<MediaRef>,
    pub primary: MediaView,
    pub role: String,
    pub tasks: Vec<String>,
    pub result: String,
    /// `None` when the item has no extra media
    pub gallery: Option<Vec<MediaView>>,
    pub tags: Option<Vec<String>>,
}

impl DetailView {
    pub fn build(item: &CarouselItem, resolver: &dyn MediaResolver) -> Self {
        let primary = item
            .video
            .as_ref()
            .and_then(|video| resolver.resolve_video(video))
            .map(|embed| MediaView::Video {
                embed,
                thumbnail: item.image.clone(),
            })
            .unwrap_or_else(|| MediaView::Thumbnail(item.image.clone()));

        let gallery: Vec<MediaView> = item
            .extra_videos
            .iter()
            .filter(|media| !media.is_empty())
            .filter_map(|media| match resolver.resolve_video(media) {
                Some(embed) => Some(MediaView::Video {
                    embed,
                    thumbnail: item.image.clone(),
                }),
                None => {
                    warn!(title = %item.title, media = %media, "skipping unresolvable extra media");
                    None
                }
            })
            .collect();

        Self {
            title: item.title.clone(),
            summary: item.summary.clone(),
            logo: item.logo.clone().filter(|logo| !logo.is_empty()),
            primary,
            role: item.role.clone(),
            tasks: item.tasks.clone(),
            result: item.result.clone(),
            gallery: (!gallery.is_empty()).then_some(gallery),
            tags: (!item.tags.is_empty()).then(|| item.tags.clone()),
        }
    }

    /// Primary media first, then the gallery
    pub fn media(&self) -> Vec<&MediaView> {
        std::iter::once(&self.primary)
            .chain(self.gallery.iter().flatten())
            .collect()
    }
}
