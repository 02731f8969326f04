//! Scroll progress tracking
//!
//! A [`ScrollProgressTracker`] observes one element's geometry against the
//! viewport and publishes a normalized [`Progress`] whenever the scroll
//! position, the viewport size or the element layout changes. Consumers hold a
//! [`ProgressReceiver`] and only ever read the latest published value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::trace;

use crate::error::{Error, Result};

/// Normalized progress through a scroll window, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    pub const START: Progress = Progress(0.0);
    pub const END: Progress = Progress(1.0);

    /// Clamp a raw (possibly out of range) value into a progress.
    /// NaN is treated as the start of the window.
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::START;
        }
        Self(raw.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// A reference point along an element or the viewport, as a fraction of its
/// extent measured from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Start,
    Center,
    End,
    Fraction(f64),
}

impl Edge {
    pub fn as_fraction(self) -> f64 {
        match self {
            Edge::Start => 0.0,
            Edge::Center => 0.5,
            Edge::End => 1.0,
            Edge::Fraction(f) => f,
        }
    }
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(Edge::Start),
            "center" => Ok(Edge::Center),
            "end" => Ok(Edge::End),
            other => {
                let f: f64 = other
                    .parse()
                    .map_err(|_| Error::InvalidWindow(format!("unknown edge '{}'", s)))?;
                if !(0.0..=1.0).contains(&f) {
                    return Err(Error::InvalidWindow(format!(
                        "edge fraction {} outside 0..=1",
                        f
                    )));
                }
                Ok(Edge::Fraction(f))
            }
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Start => f.write_str("start"),
            Edge::Center => f.write_str("center"),
            Edge::End => f.write_str("end"),
            Edge::Fraction(v) => write!(f, "{}", v),
        }
    }
}

/// "element edge meets viewport edge", written as `"<element> <viewport>"`
/// (e.g. `"start end"`: the element's top reaches the viewport's bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Trigger {
    pub element: Edge,
    pub viewport: Edge,
}

impl Trigger {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this trigger fires for the given geometry
    pub fn scroll_offset(&self, element: &ElementGeometry, viewport_height: f64) -> f64 {
        element.top + self.element.as_fraction() * element.height
            - self.viewport.as_fraction() * viewport_height
    }
}

impl FromStr for Trigger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Self {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(Error::InvalidWindow(format!(
                "expected '<element> <viewport>', got '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Trigger {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Trigger> for String {
    fn from(trigger: Trigger) -> Self {
        trigger.to_string()
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

/// The pair of triggers delimiting a progress window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollWindow {
    pub enter: Trigger,
    pub exit: Trigger,
}

impl ScrollWindow {
    pub const fn new(enter: Trigger, exit: Trigger) -> Self {
        Self { enter, exit }
    }

    /// `"start end"` through `"end start"`: the whole time any part of the
    /// element is on screen.
    pub const fn on_screen() -> Self {
        Self::new(
            Trigger::new(Edge::Start, Edge::End),
            Trigger::new(Edge::End, Edge::Start),
        )
    }

    /// `"start center"` through `"end center"`: the element passing the
    /// middle of the viewport.
    pub const fn through_center() -> Self {
        Self::new(
            Trigger::new(Edge::Start, Edge::Center),
            Trigger::new(Edge::End, Edge::Center),
        )
    }

    pub fn parse(enter: &str, exit: &str) -> Result<Self> {
        Ok(Self::new(enter.parse()?, exit.parse()?))
    }

    /// Unclamped progress; may fall outside [0, 1].
    pub fn raw_progress(&self, element: &ElementGeometry, viewport: &Viewport) -> f64 {
        let from = self.enter.scroll_offset(element, viewport.height);
        let to = self.exit.scroll_offset(element, viewport.height);
        let span = to - from;
        if span.abs() < f64::EPSILON {
            return if viewport.scroll >= to { 1.0 } else { 0.0 };
        }
        (viewport.scroll - from) / span
    }

    pub fn progress(&self, element: &ElementGeometry, viewport: &Viewport) -> Progress {
        Progress::new(self.raw_progress(element, viewport))
    }
}

/// Element position in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeometry {
    pub top: f64,
    pub height: f64,
}

impl ElementGeometry {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }
}

/// Viewport scroll position and size in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll: f64, height: f64) -> Self {
        Self {
            scroll,
            height: height.max(0.0),
        }
    }
}

/// Read side of a tracker
#[derive(Debug, Clone)]
pub struct ProgressReceiver {
    rx: watch::Receiver<Option<Progress>>,
}

impl ProgressReceiver {
    /// Latest published progress, `None` while the element is unmounted
    pub fn get(&self) -> Option<Progress> {
        *self.rx.borrow()
    }

    /// Whether a new value was published since the last `mark_seen`
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    pub fn mark_seen(&mut self) {
        self.rx.mark_unchanged();
    }
}

/// Push-based progress source for one observed element
#[derive(Debug)]
pub struct ScrollProgressTracker {
    window: ScrollWindow,
    element: Option<ElementGeometry>,
    viewport: Viewport,
    tx: watch::Sender<Option<Progress>>,
}

impl ScrollProgressTracker {
    pub fn new(window: ScrollWindow) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            window,
            element: None,
            viewport: Viewport::default(),
            tx,
        }
    }

    pub fn window(&self) -> &ScrollWindow {
        &self.window
    }

    pub fn subscribe(&self) -> ProgressReceiver {
        ProgressReceiver {
            rx: self.tx.subscribe(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.element.is_some()
    }

    /// Current value, `None` while unmounted
    pub fn progress(&self) -> Option<Progress> {
        *self.tx.borrow()
    }

    pub fn mount(&mut self, element: ElementGeometry) {
        self.element = Some(element);
        self.publish();
    }

    pub fn unmount(&mut self) {
        self.element = None;
        self.publish();
    }

    pub fn on_scroll(&mut self, scroll: f64) {
        self.viewport.scroll = scroll;
        self.publish();
    }

    pub fn on_resize(&mut self, viewport_height: f64) {
        self.viewport.height = viewport_height.max(0.0);
        self.publish();
    }

    /// Element moved or changed size (content reflow)
    pub fn on_reflow(&mut self, element: ElementGeometry) {
        if self.element.is_some() {
            self.element = Some(element);
            self.publish();
        }
    }

    /// Apply a full viewport snapshot in one step
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.publish();
    }

    fn publish(&mut self) {
        let next = self
            .element
            .as_ref()
            .map(|element| self.window.progress(element, &self.viewport));
        self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                trace!(?next, "scroll progress updated");
                *current = next;
                true
            }
        });
    }
}
