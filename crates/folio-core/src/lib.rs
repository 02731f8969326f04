pub mod anchors;
pub mod carousel;
pub mod config;
pub mod content;
pub mod error;
pub mod marquee;
pub mod motion;
pub mod overlay;
pub mod parallax;
pub mod progress;
pub mod reveal;
pub mod showcase;

pub use carousel::{CarouselConfig, CarouselOrchestrator, LaneConfig, PauseSignal, PauseWriter};
pub use config::{AppConfig, KeymapConfig, ScrollConfig, ThemeColorOverrides, ThemeConfig};
pub use content::{CarouselItem, ContentCatalog, EmbedResolver, ItemKey, MediaRef, MediaResolver};
pub use error::{Error, Result};
pub use motion::EasingType;
pub use overlay::{DetailOverlay, DetailView, MediaView, OverlayState, PointerTarget, ScrollLock};
pub use progress::{Progress, ProgressReceiver, ScrollProgressTracker, ScrollWindow};
pub use reveal::{RevealConfig, RevealProfile, WordRevealAnimator};
pub use showcase::Showcase;
