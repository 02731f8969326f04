use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use folio_core::anchors::{AnchorMap, CONTACT, MY_WORKS};
use folio_core::content::{MediaResolver, REVEAL_KEYS};
use folio_core::marquee::{Axis, Pitch};
use folio_core::progress::{ProgressReceiver, ScrollProgressTracker};
use folio_core::{
    AppConfig, ContentCatalog, DetailView, EmbedResolver, MediaView, PointerTarget, ScrollLock,
    Showcase, WordRevealAnimator,
};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info, warn};

use crate::input::Action;
use crate::page::{self, LaneGeometry, PageContent, PageLayout, PanelGeometry, MARGIN};
use crate::scroll::{ScrollAnimator, ScrollConfigExt};
use crate::theme::Theme;
use crate::themes::load_theme;

/// Rows scrolled per mouse wheel notch
const WHEEL_LINES: i32 = 3;

/// Which part of the page receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    Carousel,
    Panel,
}

/// Keyboard position in the carousel: a lane and an index into its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselCursor {
    pub lane: usize,
    pub position: usize,
}

/// Scroll-driven progress sources of the page
struct PageTrackers {
    intro: ScrollProgressTracker,
    details: ScrollProgressTracker,
    strengths: ScrollProgressTracker,
}

impl PageTrackers {
    fn all_mut(&mut self) -> [&mut ScrollProgressTracker; 3] {
        [&mut self.intro, &mut self.details, &mut self.strengths]
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub catalog: ContentCatalog,
    pub resolver: EmbedResolver,
    pub showcase: Showcase,
    lock: ScrollLock,
    /// Page scroll position in document rows
    pub scroll: ScrollAnimator,
    pub intro: WordRevealAnimator,
    pub details: WordRevealAnimator,
    trackers: PageTrackers,
    pub intro_progress: ProgressReceiver,
    pub details_progress: ProgressReceiver,
    pub strengths_progress: ProgressReceiver,
    anchors: AnchorMap,
    pub layout: PageLayout,
    /// Whole terminal
    area: Rect,
    pub focus: Focus,
    /// Focus to restore when the panel closes
    return_focus: Focus,
    pub cursor: CarouselCursor,
    mouse_lane: Option<usize>,
    pub panel_scroll: u16,
    pub media_cursor: usize,
    /// Pending key for multi-key sequences like 'gg'
    pub pending_key: Option<char>,
    pub should_quit: bool,
    pub status_message: Option<String>,
    open_request: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, catalog: ContentCatalog) -> Result<Self> {
        let theme = load_theme(&config.ui.theme);
        let intro =
            WordRevealAnimator::from_message(&catalog.messages, REVEAL_KEYS[0], &config.reveal.intro)?;
        let details = WordRevealAnimator::from_message(
            &catalog.messages,
            REVEAL_KEYS[1],
            &config.reveal.details,
        )?;

        let lock = ScrollLock::new();
        let showcase = Showcase::new(
            catalog.items().to_vec(),
            &config.carousel,
            config.overlay.clone(),
            lock.clone(),
        );

        let trackers = PageTrackers {
            intro: ScrollProgressTracker::new(config.reveal.intro.window),
            details: ScrollProgressTracker::new(config.reveal.details.window),
            strengths: ScrollProgressTracker::new(config.parallax.window),
        };
        let intro_progress = trackers.intro.subscribe();
        let details_progress = trackers.details.subscribe();
        let strengths_progress = trackers.strengths.subscribe();

        let mut app = Self {
            scroll: ScrollAnimator::new(config.ui.scroll.clone()),
            config,
            theme,
            catalog,
            resolver: EmbedResolver,
            showcase,
            lock,
            intro,
            details,
            trackers,
            intro_progress,
            details_progress,
            strengths_progress,
            anchors: AnchorMap::new(),
            layout: PageLayout::default(),
            area: Rect::default(),
            focus: Focus::Page,
            return_focus: Focus::Page,
            cursor: CarouselCursor::default(),
            mouse_lane: None,
            panel_scroll: 0,
            media_cursor: 0,
            pending_key: None,
            should_quit: false,
            status_message: None,
            open_request: None,
        };
        app.resize(80, 24);
        Ok(app)
    }

    /// Area the page is drawn in, above the status bar
    pub fn page_area(&self) -> Rect {
        Rect {
            height: self.area.height.saturating_sub(1),
            ..self.area
        }
    }

    pub fn status_area(&self) -> Rect {
        Rect {
            y: self.area.bottom().saturating_sub(1),
            height: self.area.height.min(1),
            ..self.area
        }
    }

    /// Terminal size changed: lay the page out again and re-measure every
    /// observed element
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.area.width == width && self.area.height == height {
            return;
        }
        self.area = Rect::new(0, 0, width, height);
        self.relayout();
    }

    fn relayout(&mut self) {
        let page = self.page_area();
        let content = PageContent {
            messages: &self.catalog.messages,
            intro: self.intro.words(),
            details: self.details.words(),
            carousel_rows: self.config.carousel.viewport_rows,
        };
        self.layout = PageLayout::compute(page.width, page.height, &content);
        debug!(
            width = page.width,
            height = page.height,
            total = self.layout.total_height,
            "page laid out"
        );

        self.anchors.clear();
        self.anchors
            .register(MY_WORKS, usize::from(self.layout.projects.top));
        self.anchors
            .register(CONTACT, usize::from(self.layout.contact.top));

        let bands = [
            self.layout.intro,
            self.layout.details,
            self.layout.strengths,
        ];
        let viewport_height = f64::from(page.height);
        for (tracker, band) in self.trackers.all_mut().into_iter().zip(bands) {
            tracker.on_resize(viewport_height);
            tracker.mount(band.geometry());
        }

        let max = self.layout.max_scroll();
        if self.scroll.current_scroll() > max {
            self.scroll.set_scroll(max);
        }
        self.publish_scroll();
        self.clamp_cursor();
    }

    fn publish_scroll(&mut self) {
        let scroll = f64::from(self.scroll.current_scroll());
        for tracker in self.trackers.all_mut() {
            tracker.on_scroll(scroll);
        }
    }

    /// Advance every animation by `dt`
    pub fn tick(&mut self, dt: Duration) {
        let before = self.scroll.current_scroll();
        let after = self.scroll.update(dt, self.layout.max_scroll());
        if before != after {
            self.publish_scroll();
        }
        self.showcase.tick(dt);
    }

    /// Whether any reveal or parallax progress was published since the last
    /// call
    pub fn take_progress_changes(&mut self) -> bool {
        let mut changed = false;
        for rx in [
            &mut self.intro_progress,
            &mut self.details_progress,
            &mut self.strengths_progress,
        ] {
            if rx.has_changed() {
                rx.mark_seen();
                changed = true;
            }
        }
        changed
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.scroll.needs_update()
            || self.showcase.overlay().is_animating()
            || (self.carousel_on_screen() && self.showcase.carousel().is_animating())
    }

    pub fn carousel_on_screen(&self) -> bool {
        self.layout
            .carousel
            .intersects(self.scroll.current_scroll(), self.page_area().height)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Media URL the user asked to open, if any
    pub fn take_open_request(&mut self) -> Option<String> {
        self.open_request.take()
    }

    pub fn handle_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        if action != Action::None {
            self.clear_status();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::PendingG => self.pending_key = Some('g'),
            Action::ToggleFocus => self.toggle_focus(),
            Action::GotoWorks => self.goto_anchor(MY_WORKS),
            Action::GotoContact => self.goto_anchor(CONTACT),
            Action::Close => match self.focus {
                Focus::Panel => {
                    self.close_panel();
                }
                Focus::Carousel => self.set_focus(Focus::Page),
                Focus::Page => {}
            },
            _ => match self.focus {
                Focus::Page => self.page_action(action),
                Focus::Carousel => self.carousel_action(action),
                Focus::Panel => self.panel_action(action),
            },
        }
    }

    fn page_action(&mut self, action: Action) {
        match action {
            Action::MoveDown => self.scroll_page_by(1),
            Action::MoveUp => self.scroll_page_by(-1),
            Action::ScrollHalfPageDown => self.scroll_page_by(self.half_page()),
            Action::ScrollHalfPageUp => self.scroll_page_by(-self.half_page()),
            Action::ScrollPageDown => self.scroll_page_by(self.full_page()),
            Action::ScrollPageUp => self.scroll_page_by(-self.full_page()),
            Action::JumpToTop => self.scroll_page_to(0),
            Action::JumpToBottom => self.scroll_page_to(self.layout.max_scroll()),
            _ => {}
        }
    }

    fn carousel_action(&mut self, action: Action) {
        match action {
            Action::MoveDown => self.move_cursor(1),
            Action::MoveUp => self.move_cursor(-1),
            Action::LaneRight => self.step_lane(1),
            Action::LaneLeft => self.step_lane(-1),
            Action::Select => {
                self.open_at(self.cursor.lane, self.cursor.position);
            }
            _ => self.page_action(action),
        }
    }

    fn panel_action(&mut self, action: Action) {
        let half = self.half_page();
        match action {
            Action::MoveDown => self.scroll_panel_by(1),
            Action::MoveUp => self.scroll_panel_by(-1),
            Action::ScrollHalfPageDown => self.scroll_panel_by(half),
            Action::ScrollHalfPageUp => self.scroll_panel_by(-half),
            Action::ScrollPageDown => self.scroll_panel_by(half * 2),
            Action::ScrollPageUp => self.scroll_panel_by(-half * 2),
            Action::JumpToTop => self.panel_scroll = 0,
            Action::JumpToBottom => self.panel_scroll = u16::MAX,
            Action::NextMedia => self.step_media(1),
            Action::PrevMedia => self.step_media(-1),
            Action::OpenMedia => match self.current_media_url() {
                Some(url) => self.open_request = Some(url),
                None => self.set_status("No playable media"),
            },
            _ => {}
        }
    }

    fn half_page(&self) -> i32 {
        i32::from((self.page_area().height / 2).max(1))
    }

    fn full_page(&self) -> i32 {
        i32::from(self.page_area().height.max(1))
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sync_hover();
    }

    fn toggle_focus(&mut self) {
        match self.focus {
            Focus::Page => {
                self.set_focus(Focus::Carousel);
                if !self.carousel_on_screen() {
                    self.goto_anchor(MY_WORKS);
                }
            }
            Focus::Carousel => self.set_focus(Focus::Page),
            Focus::Panel => {}
        }
    }

    /// Page scroll is refused while a panel holds the scroll lock
    fn page_locked(&self) -> bool {
        if self.lock.is_locked() {
            debug!("page scroll blocked by the open panel");
            true
        } else {
            false
        }
    }

    pub fn scroll_page_by(&mut self, delta: i32) {
        if self.page_locked() {
            return;
        }
        let lines = i32::from(self.config.ui.scroll.scroll_lines.max(1));
        let delta = if delta.abs() == 1 { delta * lines } else { delta };
        self.scroll.scroll_by(delta, self.layout.max_scroll());
    }

    pub fn scroll_page_to(&mut self, row: u16) {
        if self.page_locked() {
            return;
        }
        self.scroll.scroll_to(row, self.layout.max_scroll());
    }

    /// Smooth scroll to an in-page link target such as `#contact`
    pub fn goto_anchor(&mut self, target: &str) {
        if self.page_locked() {
            return;
        }
        let Some(row) = self.anchors.resolve(target) else {
            warn!(target, "unknown page anchor");
            return;
        };
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        debug!(target, row, "scrolling to anchor");
        let duration = self.config.ui.scroll.anchor_duration();
        self.scroll
            .scroll_to_over(row, self.layout.max_scroll(), duration);
    }

    fn scroll_panel_by(&mut self, delta: i32) {
        self.panel_scroll = (i32::from(self.panel_scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
    }

    /// Keep the panel scroll inside its content; called by the renderer
    pub fn clamp_panel_scroll(&mut self, content_rows: u16, visible_rows: u16) {
        self.panel_scroll = self
            .panel_scroll
            .min(content_rows.saturating_sub(visible_rows));
    }

    pub fn visible_lanes(&self) -> Vec<usize> {
        self.showcase
            .carousel()
            .visible_lanes(self.page_area().width)
    }

    fn clamp_cursor(&mut self) {
        let lanes = self.visible_lanes();
        if !lanes.contains(&self.cursor.lane) {
            self.cursor.lane = lanes.first().copied().unwrap_or(0);
        }
        let len = self
            .showcase
            .carousel()
            .lane(self.cursor.lane)
            .map(|lane| lane.len())
            .unwrap_or(0);
        self.cursor.position = self.cursor.position.min(len.saturating_sub(1));
        self.sync_hover();
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self
            .showcase
            .carousel()
            .lane(self.cursor.lane)
            .map(|lane| lane.len())
            .unwrap_or(0);
        if len == 0 {
            return;
        }
        self.cursor.position = (self.cursor.position as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn step_lane(&mut self, delta: isize) {
        let lanes = self.visible_lanes();
        let current = lanes
            .iter()
            .position(|&lane| lane == self.cursor.lane)
            .unwrap_or(0);
        let next = (current as isize + delta).clamp(0, lanes.len() as isize - 1) as usize;
        if let Some(&lane) = lanes.get(next) {
            self.cursor.lane = lane;
        }
        self.clamp_cursor();
    }

    /// The hovered lane is the one under the mouse, else the keyboard lane
    fn sync_hover(&mut self) {
        let keyboard = (self.focus == Focus::Carousel).then_some(self.cursor.lane);
        self.showcase
            .carousel_mut()
            .hover_only(self.mouse_lane.or(keyboard));
    }

    /// Open the item shown at `position` of `lane`
    pub fn open_at(&mut self, lane: usize, position: usize) -> bool {
        let Some(item) = self.showcase.select(lane, position) else {
            warn!(lane, position, "no item at carousel position");
            return false;
        };
        info!(title = %item.title, lane, position, "opened project");
        self.scroll.cancel();
        self.panel_scroll = 0;
        self.media_cursor = 0;
        if self.focus != Focus::Panel {
            self.return_focus = self.focus;
        }
        self.focus = Focus::Panel;
        true
    }

    pub fn close_panel(&mut self) -> bool {
        if !self.showcase.dismiss() {
            return false;
        }
        self.focus = self.return_focus;
        self.sync_hover();
        true
    }

    pub fn detail_view(&self) -> Option<DetailView> {
        self.showcase.overlay().detail(&self.resolver)
    }

    fn step_media(&mut self, delta: isize) {
        let count = self
            .detail_view()
            .map(|view| view.media().len())
            .unwrap_or(0);
        if count == 0 {
            return;
        }
        self.media_cursor = (self.media_cursor as isize + delta).rem_euclid(count as isize) as usize;
    }

    /// Playable or viewable location of the media under the media cursor
    pub fn current_media_url(&self) -> Option<String> {
        let view = self.detail_view()?;
        let media = view.media().get(self.media_cursor).copied()?.clone();
        match media {
            MediaView::Video { embed, .. } => Some(embed),
            MediaView::Thumbnail(media) => self
                .resolver
                .resolve(&media)
                .map(|resolved| resolved.location().to_string()),
        }
    }

    pub fn panel_geometry(&self) -> PanelGeometry {
        let overlay = self.showcase.overlay();
        PanelGeometry::compute(
            self.page_area(),
            overlay.config().panel_width_percent,
            overlay.reveal(),
        )
    }

    pub fn close_label(&self) -> String {
        page::close_label(&self.catalog.messages)
    }

    /// Classify a press while the panel is open
    pub fn pointer_target(&self, column: u16, row: u16) -> PointerTarget {
        let panel = self.panel_geometry();
        let position = Position::new(column, row);
        if panel.close_control(&self.close_label()).contains(position) {
            PointerTarget::CloseControl
        } else if panel.visible().contains(position) {
            PointerTarget::Panel
        } else {
            PointerTarget::Backdrop
        }
    }

    pub fn pitch(&self) -> Pitch {
        Pitch::new(
            usize::from(self.config.carousel.card_extent.max(1)),
            usize::from(self.config.carousel.gap),
        )
    }

    pub fn axis(&self) -> Axis {
        self.config.carousel.axis
    }

    /// Lane placement across the carousel band
    pub fn lane_geometry(&self) -> Vec<LaneGeometry> {
        let cross_extent = match self.axis() {
            Axis::Vertical => self.layout.content_width(),
            Axis::Horizontal => self.layout.carousel.height,
        };
        page::lane_geometry(cross_extent, &self.visible_lanes())
    }

    /// Length of the carousel viewport along the motion axis
    pub fn carousel_main_extent(&self) -> u16 {
        match self.axis() {
            Axis::Vertical => self.layout.carousel.height,
            Axis::Horizontal => self.layout.content_width(),
        }
    }

    /// Document row under a screen row
    fn document_row(&self, row: u16) -> Option<u16> {
        let page = self.page_area();
        if row < page.y || row >= page.bottom() {
            return None;
        }
        Some(self.scroll.current_scroll().saturating_add(row - page.y))
    }

    /// Lane under a screen cell and the coordinate along the motion axis
    fn lane_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let doc_row = self.document_row(row)?;
        let band = self.layout.carousel;
        if !band.contains(doc_row) {
            return None;
        }
        let local_y = doc_row - band.top;
        let local_x = column.checked_sub(MARGIN)?;
        if local_x >= self.layout.content_width() {
            return None;
        }
        let (cross, main) = match self.axis() {
            Axis::Vertical => (local_x, local_y),
            Axis::Horizontal => (local_y, local_x),
        };
        self.lane_geometry()
            .into_iter()
            .find(|g| cross >= g.cross_start && cross < g.cross_start + g.cross_size)
            .map(|g| (g.lane, usize::from(main)))
    }

    /// Carousel item under a screen cell as (lane, position)
    pub fn carousel_hit(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let (lane_id, main) = self.lane_at(column, row)?;
        let lane = self.showcase.carousel().lane(lane_id)?;
        let position = lane.marquee().hit_test(lane.len(), self.pitch(), main)?;
        Some((lane_id, position))
    }

    pub fn on_mouse(&mut self, event: MouseEvent) {
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_click(column, row),
            MouseEventKind::Moved => {
                // Tracked under the panel too; applied once it closes
                self.mouse_lane = self.lane_at(column, row).map(|(lane, _)| lane);
                if !self.showcase.overlay().is_open() {
                    self.sync_hover();
                }
            }
            MouseEventKind::ScrollDown => self.on_wheel(WHEEL_LINES),
            MouseEventKind::ScrollUp => self.on_wheel(-WHEEL_LINES),
            _ => {}
        }
    }

    fn on_wheel(&mut self, delta: i32) {
        if self.showcase.overlay().is_open() {
            self.scroll_panel_by(delta);
        } else if !self.page_locked() {
            self.scroll.scroll_by(delta, self.layout.max_scroll());
        }
    }

    fn on_click(&mut self, column: u16, row: u16) {
        if self.showcase.overlay().is_open() {
            let target = self.pointer_target(column, row);
            if self.showcase.on_pointer(target) {
                self.focus = self.return_focus;
                self.sync_hover();
            }
            return;
        }

        let link = self
            .document_row(row)
            .and_then(|doc_row| self.layout.link_at(doc_row, column))
            .map(|link| link.target);
        if let Some(target) = link {
            self.goto_anchor(target);
            return;
        }

        if let Some((lane, position)) = self.carousel_hit(column, row) {
            self.cursor = CarouselCursor { lane, position };
            self.open_at(lane, position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use folio_core::content::ItemKey;

    fn app() -> App {
        let catalog = ContentCatalog::builtin().unwrap();
        let mut app = App::new(Arc::new(AppConfig::default()), catalog).unwrap();
        app.resize(120, 40);
        app
    }

    fn settle(app: &mut App) {
        for _ in 0..100 {
            app.tick(Duration::from_millis(50));
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_new_lays_out_page() {
        let app = app();
        assert_eq!(app.page_area(), Rect::new(0, 0, 120, 39));
        assert_eq!(app.status_area(), Rect::new(0, 39, 120, 1));
        assert_eq!(app.layout.hero.height, 39);
        assert!(app.layout.total_height > 39);
        assert_eq!(app.focus, Focus::Page);
        assert!(!app.is_scroll_locked());
    }

    #[test]
    fn test_reveal_progress_follows_scroll() {
        let mut app = app();
        let start = app.intro_progress.get().unwrap().value();
        app.handle_action(Action::JumpToBottom);
        settle(&mut app);
        let end = app.intro_progress.get().unwrap().value();
        assert!(end > start);
        assert_eq!(end, 1.0);
    }

    #[test]
    fn test_goto_anchor_scrolls_to_section() {
        let mut app = app();
        app.handle_action(Action::GotoWorks);
        settle(&mut app);
        assert_eq!(
            app.scroll.current_scroll(),
            app.layout.projects.top.min(app.layout.max_scroll())
        );
    }

    #[test]
    fn test_keyboard_open_locks_page_scroll() {
        let mut app = app();
        app.handle_action(Action::ToggleFocus);
        assert_eq!(app.focus, Focus::Carousel);
        settle(&mut app);
        let before = app.scroll.current_scroll();

        app.handle_action(Action::Select);
        assert_eq!(app.focus, Focus::Panel);
        assert!(app.is_scroll_locked());
        assert!(app.showcase.carousel().is_paused());

        // Keys now move the panel, never the page
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::ScrollPageDown);
        settle(&mut app);
        assert_eq!(app.scroll.current_scroll(), before);
        assert!(app.panel_scroll > 0);

        assert!(app.close_panel());
        assert_eq!(app.focus, Focus::Carousel);
        assert!(!app.is_scroll_locked());
        assert!(!app.close_panel());
    }

    #[test]
    fn test_cursor_selects_canonical_item() {
        let mut app = app();
        app.handle_action(Action::ToggleFocus);
        app.handle_action(Action::LaneRight);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.cursor, CarouselCursor { lane: 1, position: 1 });
        app.handle_action(Action::Select);
        let item = app.showcase.overlay().state().item().cloned().unwrap();
        let expected = app.catalog.item(ItemKey(4)).unwrap();
        assert_eq!(item.title, expected.title);
    }

    #[test]
    fn test_cursor_wraps_and_lane_clamps() {
        let mut app = app();
        app.handle_action(Action::ToggleFocus);
        app.handle_action(Action::MoveUp);
        assert_eq!(app.cursor.position, app.catalog.items().len() - 1);
        app.handle_action(Action::LaneLeft);
        assert_eq!(app.cursor.lane, 0);
        app.handle_action(Action::LaneRight);
        app.handle_action(Action::LaneRight);
        app.handle_action(Action::LaneRight);
        assert_eq!(app.cursor.lane, 2);
    }

    #[test]
    fn test_narrow_resize_moves_cursor_off_hidden_lane() {
        let mut app = app();
        app.cursor.lane = 2;
        app.resize(90, 30);
        assert_eq!(app.visible_lanes(), vec![0, 1]);
        assert_eq!(app.cursor.lane, 0);
    }

    #[test]
    fn test_mouse_click_opens_item_under_pointer() {
        let mut app = app();
        app.scroll.set_scroll(app.layout.carousel.top);
        app.publish_scroll();

        // First card of the first lane starts at the top of the band
        let column = MARGIN + 2;
        let hit = app.carousel_hit(column, 1);
        assert_eq!(hit.map(|(lane, _)| lane), Some(0));

        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, 1));
        assert!(app.showcase.overlay().is_open());
        assert_eq!(app.focus, Focus::Panel);

        // Clicking inside the panel keeps it open
        settle(&mut app);
        let panel = app.panel_geometry().visible();
        app.on_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            panel.x + 2,
            panel.y + 2,
        ));
        assert!(app.showcase.overlay().is_open());

        // The backdrop closes it
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 5));
        assert!(!app.showcase.overlay().is_open());
        assert_eq!(app.focus, Focus::Page);
    }

    #[test]
    fn test_close_control_target() {
        let mut app = app();
        app.open_at(0, 0);
        settle(&mut app);
        let close = app.panel_geometry().close_control(&app.close_label());
        assert_eq!(
            app.pointer_target(close.x, close.y),
            PointerTarget::CloseControl
        );
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), close.x, close.y));
        assert!(!app.showcase.overlay().is_open());
    }

    #[test]
    fn test_mouse_hover_pauses_lane() {
        let mut app = app();
        app.scroll.set_scroll(app.layout.carousel.top);
        app.on_mouse(mouse(MouseEventKind::Moved, MARGIN + 1, 2));
        assert!(app.showcase.carousel().lane_paused(0));
        assert!(!app.showcase.carousel().lane_paused(1));

        app.on_mouse(mouse(MouseEventKind::Moved, 0, 0));
        assert!(!app.showcase.carousel().lane_paused(0));
    }

    #[test]
    fn test_hover_follows_pointer_moved_under_panel() {
        let mut app = app();
        app.scroll.set_scroll(app.layout.carousel.top);
        app.on_mouse(mouse(MouseEventKind::Moved, MARGIN + 1, 2));
        assert!(app.showcase.carousel().lane_paused(0));

        assert!(app.open_at(0, 0));
        // Pointer leaves the carousel while the panel is up
        app.on_mouse(mouse(MouseEventKind::Moved, 0, 0));
        assert!(app.close_panel());
        assert!(!app.showcase.carousel().lane_paused(0));
        assert!(!app.showcase.carousel().lane_paused(1));
    }

    #[test]
    fn test_progress_changes_drain() {
        let mut app = app();
        app.take_progress_changes();
        assert!(!app.take_progress_changes());

        app.handle_action(Action::JumpToBottom);
        settle(&mut app);
        assert!(app.take_progress_changes());
        assert!(!app.take_progress_changes());
    }

    #[test]
    fn test_wheel_scrolls_page_until_locked() {
        let mut app = app();
        app.on_mouse(mouse(MouseEventKind::ScrollDown, 10, 10));
        settle(&mut app);
        assert_eq!(app.scroll.current_scroll(), WHEEL_LINES as u16);

        app.open_at(0, 0);
        app.on_mouse(mouse(MouseEventKind::ScrollDown, 10, 10));
        settle(&mut app);
        assert_eq!(app.scroll.current_scroll(), WHEEL_LINES as u16);
        assert_eq!(app.panel_scroll, WHEEL_LINES as u16);
    }

    #[test]
    fn test_hero_link_click_scrolls_to_contact() {
        let mut app = app();
        let link = app
            .layout
            .links
            .iter()
            .find(|link| link.target == CONTACT)
            .cloned()
            .unwrap();
        app.on_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            link.start_col,
            link.row,
        ));
        settle(&mut app);
        assert_eq!(
            app.scroll.current_scroll(),
            app.layout.contact.top.min(app.layout.max_scroll())
        );
    }

    #[test]
    fn test_media_cursor_and_open_request() {
        let mut app = app();
        app.open_at(0, 0);
        let count = app.detail_view().unwrap().media().len();
        assert!(count > 1);

        app.handle_action(Action::PrevMedia);
        assert_eq!(app.media_cursor, count - 1);
        app.handle_action(Action::NextMedia);
        assert_eq!(app.media_cursor, 0);

        app.handle_action(Action::OpenMedia);
        let url = app.take_open_request().unwrap();
        assert!(url.starts_with("https://www.youtube.com/embed/"));
        assert!(app.take_open_request().is_none());
    }

    #[test]
    fn test_fast_updates_while_animating() {
        let mut app = app();
        assert!(!app.needs_fast_update());
        app.handle_action(Action::GotoWorks);
        assert!(app.needs_fast_update());
        settle(&mut app);
        // The carousel keeps moving while it is on screen
        assert!(app.carousel_on_screen());
        assert!(app.needs_fast_update());
    }
}
