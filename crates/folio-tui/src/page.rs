//! Page document layout
//!
//! The page is one tall document measured in terminal rows. Layout is pure:
//! given a width, the viewport height and the content it returns where every
//! section, paragraph line, link and carousel lane sits in document rows.

use folio_core::anchors::{CONTACT, MY_WORKS};
use folio_core::content::Messages;
use folio_core::progress::ElementGeometry;
use folio_core::reveal::{split_words, Word};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Horizontal margin on both sides of the page
pub const MARGIN: u16 = 4;
/// Columns between carousel lanes
pub const LANE_GAP: u16 = 2;

/// Message keys of the key strengths lines, in order
pub const SKILL_KEYS: [&str; 6] = [
    "KeyStrengths.skill1",
    "KeyStrengths.skill2",
    "KeyStrengths.skill3",
    "KeyStrengths.skill4",
    "KeyStrengths.skill5",
    "KeyStrengths.skill6",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Overview,
    Strengths,
    Projects,
    Contact,
}

impl SectionKind {
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero",
            SectionKind::Overview => "Overview",
            SectionKind::Strengths => "Strengths",
            SectionKind::Projects => "Works",
            SectionKind::Contact => "Contact",
        }
    }
}

/// A run of document rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Band {
    pub top: u16,
    pub height: u16,
}

impl Band {
    pub fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    pub fn contains(&self, row: u16) -> bool {
        row >= self.top && row < self.bottom()
    }

    /// Whether any row of the band is inside `[scroll, scroll + rows)`
    pub fn intersects(&self, scroll: u16, rows: u16) -> bool {
        self.top < scroll.saturating_add(rows) && self.bottom() > scroll
    }

    pub fn geometry(&self) -> ElementGeometry {
        ElementGeometry::new(f64::from(self.top), f64::from(self.height))
    }
}

/// One line of the hero block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroLine {
    Blank,
    Label(String),
    Title(String),
    Text(String),
    /// Text followed by a bracketed in-page link
    Link {
        prefix: String,
        label: String,
        target: &'static str,
    },
}

impl HeroLine {
    pub fn link_text(label: &str) -> String {
        format!("[ {} ]", label)
    }
}

/// Hero lines built from the catalog messages
pub fn hero_lines(messages: &Messages) -> Vec<HeroLine> {
    let m = |key: &'static str| messages.label(key).to_string();
    vec![
        HeroLine::Label(m("Hero.projectLabel")),
        HeroLine::Blank,
        HeroLine::Title(m("Hero.titleLine1")),
        HeroLine::Title(m("Hero.titleLine2")),
        HeroLine::Blank,
        HeroLine::Text(format!("{} {}", m("Hero.iTalk"), m("Hero.language"))),
        HeroLine::Link {
            prefix: m("Hero.enjoy"),
            label: m("Hero.viewWork"),
            target: MY_WORKS,
        },
        HeroLine::Link {
            prefix: m("Hero.welcome"),
            label: m("Hero.contactMe"),
            target: CONTACT,
        },
    ]
}

/// Clickable region of an in-page link, in document rows and screen columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBox {
    pub row: u16,
    pub start_col: u16,
    pub end_col: u16,
    pub target: &'static str,
}

/// Greedy word wrap. Returns the word indices of each line.
///
/// Words wider than the line get a line of their own.
pub fn wrap_words(words: &[Word], width: usize) -> Vec<Vec<usize>> {
    let width = width.max(1);
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0usize;

    for word in words {
        let w = word.text.width();
        let needed = if current.is_empty() { w } else { used + 1 + w };
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        used = if current.is_empty() { w } else { used + 1 + w };
        current.push(word.index);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap free text to `width` columns
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let words = split_words(text);
    wrap_words(&words, width)
        .into_iter()
        .map(|line| {
            line.iter()
                .map(|&i| words[i].text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Cross-axis placement of one visible carousel lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneGeometry {
    pub lane: usize,
    pub cross_start: u16,
    pub cross_size: u16,
}

/// Split the cross axis evenly between the visible lanes
pub fn lane_geometry(cross_extent: u16, lanes: &[usize]) -> Vec<LaneGeometry> {
    if lanes.is_empty() {
        return Vec::new();
    }
    let n = lanes.len() as u16;
    let gaps = LANE_GAP.saturating_mul(n - 1);
    let size = cross_extent.saturating_sub(gaps) / n;
    lanes
        .iter()
        .enumerate()
        .map(|(i, &lane)| LaneGeometry {
            lane,
            cross_start: i as u16 * (size + LANE_GAP),
            cross_size: size,
        })
        .collect()
}

/// Below this width the panel takes the whole screen
pub const NARROW_WIDTH: u16 = 60;
const MIN_PANEL_WIDTH: u16 = 24;

/// Detail panel placement for one frame of its slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Where the panel rests when fully open
    pub full: Rect,
    /// Columns still off screen to the right
    pub offset: u16,
}

impl PanelGeometry {
    pub fn compute(area: Rect, width_percent: u16, reveal: f64) -> Self {
        let width = if area.width < NARROW_WIDTH {
            area.width
        } else {
            let percent = u32::from(width_percent.clamp(10, 100));
            (u32::from(area.width) * percent / 100) as u16
        }
        .max(MIN_PANEL_WIDTH)
        .min(area.width);
        let full = Rect::new(area.right() - width, area.y, width, area.height);
        let offset = ((1.0 - reveal.clamp(0.0, 1.0)) * f64::from(width)).round() as u16;
        Self { full, offset }
    }

    /// Part of the panel currently on screen
    pub fn visible(&self) -> Rect {
        Rect {
            x: self.full.x + self.offset.min(self.full.width),
            width: self.full.width.saturating_sub(self.offset),
            ..self.full
        }
    }

    /// Close control drawn right-aligned in the top border
    pub fn close_control(&self, label: &str) -> Rect {
        let width = label.width() as u16;
        let right = self.full.right().saturating_sub(1).saturating_add(self.offset);
        Rect::new(right.saturating_sub(width), self.full.y, width, 1).intersection(self.visible())
    }
}

/// Text of the close control
pub fn close_label(messages: &Messages) -> String {
    format!(" x {} ", messages.label("Projects.close").to_lowercase())
}

/// Inputs of the layout that come from content and config
#[derive(Debug, Clone, Copy)]
pub struct PageContent<'a> {
    pub messages: &'a Messages,
    pub intro: &'a [Word],
    pub details: &'a [Word],
    pub carousel_rows: u16,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub width: u16,
    pub viewport_height: u16,
    pub hero: Band,
    pub overview: Band,
    pub strengths: Band,
    pub projects: Band,
    pub contact: Band,
    /// Paragraph bands tracked for the word reveal
    pub intro: Band,
    pub details: Band,
    pub intro_lines: Vec<Vec<usize>>,
    pub details_lines: Vec<Vec<usize>>,
    /// First row of the hero lines
    pub hero_text_top: u16,
    pub links: Vec<LinkBox>,
    pub carousel: Band,
    pub total_height: u16,
}

impl PageLayout {
    pub fn compute(width: u16, viewport_height: u16, content: &PageContent<'_>) -> Self {
        let text_width = content_width(width) as usize;
        let mut row: u16 = 0;

        // Hero fills the first screen
        let hero_lines = hero_lines(content.messages);
        let hero_height = viewport_height.max(hero_lines.len() as u16 + 2);
        let hero = Band::new(row, hero_height);
        let hero_text_top = hero.top + (hero_height - hero_lines.len() as u16) / 2;
        let links = hero_lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| match line {
                HeroLine::Link {
                    prefix,
                    label,
                    target,
                } => {
                    let start_col = MARGIN + prefix.width() as u16 + 1;
                    let end_col = start_col + HeroLine::link_text(label).width() as u16;
                    Some(LinkBox {
                        row: hero_text_top + i as u16,
                        start_col,
                        end_col,
                        target,
                    })
                }
                _ => None,
            })
            .collect();
        row = hero.bottom();

        // Overview: title, blank, intro, blank, details, blank
        let intro_lines = wrap_words(content.intro, text_width);
        let details_lines = wrap_words(content.details, text_width);
        let intro = Band::new(row + 3, intro_lines.len() as u16);
        let details = Band::new(intro.bottom() + 1, details_lines.len() as u16);
        let overview = Band::new(row, details.bottom() + 2 - row);
        row = overview.bottom();

        // Key strengths: one row per skill with a blank row between
        let strengths = Band::new(row, 2 + SKILL_KEYS.len() as u16 * 2);
        row = strengths.bottom();

        // Projects: title, subtitle, blank, carousel, blank
        let carousel = Band::new(row + 3, content.carousel_rows.max(3));
        let projects = Band::new(row, carousel.bottom() + 1 - row);
        row = projects.bottom();

        let contact = Band::new(row, 8);
        row = contact.bottom();

        Self {
            width,
            viewport_height,
            hero,
            overview,
            strengths,
            projects,
            contact,
            intro,
            details,
            intro_lines,
            details_lines,
            hero_text_top,
            links,
            carousel,
            total_height: row,
        }
    }

    pub fn max_scroll(&self) -> u16 {
        self.total_height.saturating_sub(self.viewport_height)
    }

    pub fn sections(&self) -> [(SectionKind, Band); 5] {
        [
            (SectionKind::Hero, self.hero),
            (SectionKind::Overview, self.overview),
            (SectionKind::Strengths, self.strengths),
            (SectionKind::Projects, self.projects),
            (SectionKind::Contact, self.contact),
        ]
    }

    /// Section containing the viewport's top row
    pub fn section_at(&self, row: u16) -> SectionKind {
        self.sections()
            .iter()
            .find(|(_, band)| band.contains(row))
            .map(|(kind, _)| *kind)
            .unwrap_or(SectionKind::Contact)
    }

    pub fn link_at(&self, row: u16, col: u16) -> Option<&LinkBox> {
        self.links
            .iter()
            .find(|link| link.row == row && col >= link.start_col && col < link.end_col)
    }

    pub fn content_width(&self) -> u16 {
        content_width(self.width)
    }
}

/// Width available to text between the margins
pub fn content_width(width: u16) -> u16 {
    width.saturating_sub(MARGIN * 2).max(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ContentCatalog;

    fn messages() -> Messages {
        let catalog = ContentCatalog::from_toml_str(
            r#"
            [messages.Hero]
            enjoy = "Enjoy"
            viewWork = "viewing my work"
            welcome = "You are welcome to"
            contactMe = "contact me"
            "#,
        )
        .unwrap();
        catalog.messages
    }

    #[test]
    fn test_wrap_words() {
        let words = split_words("aa bb cc dddd e");
        let lines = wrap_words(&words, 5);
        assert_eq!(lines, vec![vec![0, 1], vec![2], vec![3], vec![4]]);
        assert_eq!(wrap_words(&words, 6), vec![vec![0, 1], vec![2], vec![3, 4]]);
        assert!(wrap_words(&[], 10).is_empty());
    }

    #[test]
    fn test_wrap_text_joins_lines() {
        let lines = wrap_text("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_wrap_overlong_word() {
        let words = split_words("a extraordinarily b");
        let lines = wrap_words(&words, 5);
        assert_eq!(lines, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_layout_stacks_sections() {
        let messages = messages();
        let intro = split_words("one two three four five six");
        let details = split_words("seven eight");
        let content = PageContent {
            messages: &messages,
            intro: &intro,
            details: &details,
            carousel_rows: 20,
        };
        let layout = PageLayout::compute(80, 30, &content);

        assert_eq!(layout.hero, Band::new(0, 30));
        assert_eq!(layout.overview.top, 30);
        assert_eq!(layout.intro.top, 33);
        assert_eq!(layout.intro.height, 1);
        assert_eq!(layout.details.top, 35);
        assert_eq!(layout.strengths.top, layout.overview.bottom());
        assert_eq!(layout.carousel.height, 20);
        assert!(layout.projects.contains(layout.carousel.top));
        assert_eq!(layout.total_height, layout.contact.bottom());
        assert_eq!(layout.max_scroll(), layout.total_height - 30);
        assert_eq!(layout.section_at(0), SectionKind::Hero);
        assert_eq!(layout.section_at(layout.carousel.top), SectionKind::Projects);
    }

    #[test]
    fn test_hero_links_are_clickable() {
        let messages = messages();
        let content = PageContent {
            messages: &messages,
            intro: &[],
            details: &[],
            carousel_rows: 10,
        };
        let layout = PageLayout::compute(80, 20, &content);
        assert_eq!(layout.links.len(), 2);
        let works = &layout.links[0];
        assert_eq!(works.target, MY_WORKS);
        // "Enjoy" is 5 columns, then a space
        assert_eq!(works.start_col, MARGIN + 6);
        assert_eq!(
            layout.link_at(works.row, works.start_col).map(|l| l.target),
            Some(MY_WORKS)
        );
        assert!(layout.link_at(works.row, works.end_col).is_none());
    }

    #[test]
    fn test_lane_geometry() {
        let lanes = lane_geometry(62, &[0, 1, 2]);
        assert_eq!(lanes.len(), 3);
        assert_eq!(lanes[0].cross_size, 19);
        assert_eq!(lanes[1].cross_start, 21);
        assert_eq!(lanes[2].lane, 2);
        assert!(lane_geometry(40, &[]).is_empty());
    }

    #[test]
    fn test_close_control_on_zero_width_area() {
        let geometry = PanelGeometry::compute(Rect::new(0, 0, 0, 10), 60, 1.0);
        assert!(geometry.visible().is_empty());
        assert!(geometry.close_control(" x close ").is_empty());
    }

    #[test]
    fn test_panel_slides_in_from_the_right() {
        let area = Rect::new(0, 0, 100, 30);
        let closed = PanelGeometry::compute(area, 60, 0.0);
        assert_eq!(closed.full, Rect::new(40, 0, 60, 30));
        assert_eq!(closed.visible().width, 0);

        let half = PanelGeometry::compute(area, 60, 0.5);
        assert_eq!(half.visible(), Rect::new(70, 0, 30, 30));

        let open = PanelGeometry::compute(area, 60, 1.0);
        assert_eq!(open.visible(), open.full);
        let close = open.close_control(" x close ");
        assert_eq!(close, Rect::new(90, 0, 9, 1));
    }

    #[test]
    fn test_narrow_panel_is_full_width() {
        let area = Rect::new(0, 0, 50, 20);
        let panel = PanelGeometry::compute(area, 60, 1.0);
        assert_eq!(panel.full, area);
    }

    #[test]
    fn test_band_intersects() {
        let band = Band::new(10, 5);
        assert!(band.intersects(12, 1));
        assert!(band.intersects(0, 11));
        assert!(!band.intersects(0, 10));
        assert!(!band.intersects(15, 10));
    }
}
