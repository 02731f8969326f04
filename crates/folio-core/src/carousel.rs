//! Multi-lane project carousel
//!
//! Every lane shows the same canonical item list under a different cyclic
//! rotation and cycle duration. Lanes store indices into the list, so a
//! selection from any lane resolves to the one shared `Arc<CarouselItem>`.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{CarouselItem, ItemKey};
use crate::marquee::{combine_pause, Axis, MarqueeLoop};

/// Read side of the carousel-wide pause flag
#[derive(Debug, Clone)]
pub struct PauseSignal(Rc<Cell<bool>>);

impl PauseSignal {
    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// The single writer of the carousel-wide pause flag
#[derive(Debug)]
pub struct PauseWriter(Rc<Cell<bool>>);

impl PauseWriter {
    pub fn set(&self, paused: bool) {
        if self.0.replace(paused) != paused {
            debug!(paused, "carousel pause flag changed");
        }
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// Create a pause flag, initially running
pub fn pause_flag() -> (PauseWriter, PauseSignal) {
    let cell = Rc::new(Cell::new(false));
    (PauseWriter(cell.clone()), PauseSignal(cell))
}

/// One lane of the carousel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneConfig {
    /// Cyclic shift applied to the shared list
    #[serde(default)]
    pub rotation: usize,
    /// Seconds for the strip to travel one copy of the list
    #[serde(default = "default_cycle_secs")]
    pub cycle_secs: f64,
    /// Hide the lane when the viewport is narrower than this many columns
    #[serde(default)]
    pub min_width: Option<u16>,
    #[serde(default)]
    pub reverse: bool,
}

impl LaneConfig {
    pub fn new(rotation: usize, cycle_secs: f64) -> Self {
        Self {
            rotation,
            cycle_secs,
            min_width: None,
            reverse: false,
        }
    }

    pub fn hidden_below(mut self, width: u16) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn cycle(&self) -> Duration {
        Duration::try_from_secs_f64(self.cycle_secs).unwrap_or(Duration::ZERO)
    }
}

fn default_cycle_secs() -> f64 {
    60.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_lanes")]
    pub lanes: Vec<LaneConfig>,
    #[serde(default)]
    pub axis: Axis,
    /// Copies of the list laid end to end
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    /// Card height in rows (vertical) or width in columns (horizontal)
    #[serde(default = "default_card_extent")]
    pub card_extent: u16,
    #[serde(default = "default_gap")]
    pub gap: u16,
    /// Rows reserved for the carousel on the page
    #[serde(default = "default_viewport_rows")]
    pub viewport_rows: u16,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            lanes: default_lanes(),
            axis: Axis::default(),
            repeat: default_repeat(),
            card_extent: default_card_extent(),
            gap: default_gap(),
            viewport_rows: default_viewport_rows(),
        }
    }
}

fn default_lanes() -> Vec<LaneConfig> {
    vec![
        LaneConfig::new(0, 60.0),
        LaneConfig::new(3, 75.0),
        LaneConfig::new(6, 85.0).hidden_below(100),
    ]
}

fn default_repeat() -> usize {
    4
}

fn default_card_extent() -> u16 {
    6
}

fn default_gap() -> u16 {
    1
}

fn default_viewport_rows() -> u16 {
    24
}

/// Indices `0..len` cyclically shifted left by `shift`
pub fn rotation(len: usize, shift: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    (0..len).map(|i| (i + shift) % len).collect()
}

#[derive(Debug, Clone)]
pub struct Lane {
    id: usize,
    order: Vec<usize>,
    marquee: MarqueeLoop,
    min_width: Option<u16>,
}

impl Lane {
    pub fn id(&self) -> usize {
        self.id
    }

    /// Canonical item indices in lane order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn marquee(&self) -> &MarqueeLoop {
        &self.marquee
    }

    pub fn key_at(&self, position: usize) -> Option<ItemKey> {
        self.order.get(position).copied().map(ItemKey)
    }

    pub fn fits(&self, viewport_width: u16) -> bool {
        self.min_width.map_or(true, |min| viewport_width >= min)
    }
}

#[derive(Debug)]
pub struct CarouselOrchestrator {
    items: Vec<Arc<CarouselItem>>,
    lanes: Vec<Lane>,
    paused: PauseSignal,
}

impl CarouselOrchestrator {
    pub fn new(items: Vec<Arc<CarouselItem>>, config: &CarouselConfig, paused: PauseSignal) -> Self {
        let lane_configs = if config.lanes.is_empty() {
            vec![LaneConfig::new(0, default_cycle_secs())]
        } else {
            config.lanes.clone()
        };
        let lanes = lane_configs
            .iter()
            .enumerate()
            .map(|(id, lane)| Lane {
                id,
                order: rotation(items.len(), lane.rotation),
                marquee: MarqueeLoop::new(lane.cycle(), config.axis)
                    .with_reverse(lane.reverse)
                    .with_repeat(config.repeat),
                min_width: lane.min_width,
            })
            .collect();
        Self {
            items,
            lanes,
            paused,
        }
    }

    pub fn items(&self) -> &[Arc<CarouselItem>] {
        &self.items
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, id: usize) -> Option<&Lane> {
        self.lanes.get(id)
    }

    /// Lanes shown at this viewport width; never empty while lanes exist
    pub fn visible_lanes(&self, viewport_width: u16) -> Vec<usize> {
        let visible: Vec<usize> = self
            .lanes
            .iter()
            .filter(|lane| lane.fits(viewport_width))
            .map(Lane::id)
            .collect();
        if visible.is_empty() && !self.lanes.is_empty() {
            vec![0]
        } else {
            visible
        }
    }

    /// Carousel-wide flag
    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    /// Effective pause of one lane
    pub fn lane_paused(&self, id: usize) -> bool {
        self.lanes
            .get(id)
            .map_or(true, |lane| combine_pause(self.paused.get(), lane.marquee.is_hovered()))
    }

    pub fn set_hover(&mut self, id: usize, hovered: bool) {
        if let Some(lane) = self.lanes.get_mut(id) {
            lane.marquee.set_hovered(hovered);
        }
    }

    /// Hover exactly one lane (or none)
    pub fn hover_only(&mut self, id: Option<usize>) {
        for lane in &mut self.lanes {
            let hovered = Some(lane.id) == id;
            lane.marquee.set_hovered(hovered);
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        let external = self.paused.get();
        for lane in &mut self.lanes {
            lane.marquee.tick(dt, external);
        }
    }

    /// Whether any lane is moving
    pub fn is_animating(&self) -> bool {
        !self.items.is_empty()
            && self
                .lanes
                .iter()
                .any(|lane| !lane.marquee.cycle().is_zero() && !self.lane_paused(lane.id))
    }

    pub fn key_at(&self, lane: usize, position: usize) -> Option<ItemKey> {
        self.lanes.get(lane)?.key_at(position)
    }

    /// Canonical item shown at `position` of `lane`
    pub fn select(&self, lane: usize, position: usize) -> Option<Arc<CarouselItem>> {
        let key = self.key_at(lane, position)?;
        self.items.get(key.0).cloned()
    }
}
