//! Horizontal drift of the key strengths lines
//!
//! Each line slides from one horizontal offset to another as its section
//! scrolls across the viewport. Offsets are percents of the available width.

use serde::{Deserialize, Serialize};

use crate::motion::map_range;
use crate::progress::{Progress, ScrollWindow};

/// One drifting line: offset at progress 0 and at progress 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLine {
    pub from_percent: f64,
    pub to_percent: f64,
}

impl ParallaxLine {
    pub const fn new(from_percent: f64, to_percent: f64) -> Self {
        Self {
            from_percent,
            to_percent,
        }
    }

    /// Offset in percent; unknown progress rests at 0
    pub fn offset_percent(&self, progress: Option<Progress>) -> f64 {
        match progress {
            Some(p) => map_range(p.value(), (0.0, 1.0), (self.from_percent, self.to_percent)),
            None => 0.0,
        }
    }

    /// Offset in whole cells for a line `width` cells wide
    pub fn offset_cells(&self, progress: Option<Progress>, width: u16) -> i32 {
        (self.offset_percent(progress) / 100.0 * f64::from(width)).round() as i32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "default_parallax_window")]
    pub window: ScrollWindow,
    #[serde(default = "default_parallax_lines")]
    pub lines: Vec<ParallaxLine>,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            window: default_parallax_window(),
            lines: default_parallax_lines(),
        }
    }
}

impl ParallaxConfig {
    /// Line settings for row `index`, cycling when there are more rows
    pub fn line(&self, index: usize) -> ParallaxLine {
        if self.lines.is_empty() {
            return ParallaxLine::new(0.0, 0.0);
        }
        self.lines[index % self.lines.len()]
    }
}

fn default_parallax_window() -> ScrollWindow {
    ScrollWindow::on_screen()
}

fn default_parallax_lines() -> Vec<ParallaxLine> {
    vec![
        ParallaxLine::new(20.0, -10.0),
        ParallaxLine::new(-10.0, 10.0),
        ParallaxLine::new(30.0, -10.0),
        ParallaxLine::new(20.0, -15.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_follows_progress() {
        let line = ParallaxLine::new(20.0, -10.0);
        assert_eq!(line.offset_percent(Some(Progress::START)), 20.0);
        assert_eq!(line.offset_percent(Some(Progress::END)), -10.0);
        assert!((line.offset_percent(Some(Progress::new(0.5))) - 5.0).abs() < 1e-9);
        assert_eq!(line.offset_percent(None), 0.0);
    }

    #[test]
    fn test_offset_cells() {
        let line = ParallaxLine::new(-10.0, 10.0);
        assert_eq!(line.offset_cells(Some(Progress::START), 80), -8);
        assert_eq!(line.offset_cells(Some(Progress::END), 80), 8);
    }

    #[test]
    fn test_lines_cycle() {
        let config = ParallaxConfig::default();
        assert_eq!(config.line(4), config.line(0));
        let empty = ParallaxConfig {
            lines: Vec::new(),
            ..Default::default()
        };
        assert_eq!(empty.line(3), ParallaxLine::new(0.0, 0.0));
    }
}
