//! Smooth page scrolling
//!
//! Vim-like smooth scrolling for the page. Easing and
//! interpolation come from `folio_core::motion`; this module only adds the
//! scroll controller and terminal-specific config helpers.
//!
//! ```ignore
//! use folio_tui::scroll::ScrollAnimator;
//!
//! let mut animator = ScrollAnimator::with_defaults();
//! animator.scroll_by(10, max_scroll);
//!
//! // In the main loop, advance by the frame time
//! let scroll = animator.update(dt, max_scroll);
//! ```

pub mod animation;
pub mod config;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
