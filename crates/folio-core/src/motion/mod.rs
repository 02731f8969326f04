//! Animation primitives shared by the core state machines and the TUI.
//!
//! - `easing` - pure easing curves
//! - `timing` - progress and interpolation helpers
//! - `tween` - tick-driven scalar transitions

pub mod easing;
pub mod timing;
pub mod tween;

pub use easing::EasingType;
pub use timing::{fraction, lerp, lerp_u16, map_range};
pub use tween::Tween;
