use folio_core::content::CarouselItem;
use folio_core::marquee::Axis;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use super::blit;
use crate::app::{App, Focus};
use crate::page::MARGIN;
use crate::theme::Theme;

pub struct CarouselWidget;

impl CarouselWidget {
    /// Draw the lanes over the carousel band of the page in `area`
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let band = app.layout.carousel;
        let scroll = app.scroll.current_scroll();
        if !band.intersects(scroll, area.height) {
            return;
        }

        // Screen row of the band's first row; negative when scrolled past
        let band_y = i32::from(area.y) + i32::from(band.top) - i32::from(scroll);
        let content_x = area.x + MARGIN;
        let content_width = app.layout.content_width().min(area.width.saturating_sub(MARGIN));
        let top = band_y.max(i32::from(area.y)) as u16;
        let bottom = (band_y + i32::from(band.height)).min(i32::from(area.bottom())) as u16;
        let clip = Rect::new(content_x, top, content_width, bottom.saturating_sub(top));

        let carousel = app.showcase.carousel();
        let pitch = app.pitch();
        let extent = app.config.carousel.card_extent.max(1);
        let main_extent = usize::from(app.carousel_main_extent());

        for geometry in app.lane_geometry() {
            let Some(lane) = carousel.lane(geometry.lane) else {
                continue;
            };
            let hovered = lane.marquee().is_hovered();
            for slot in lane.marquee().layout(lane.len(), pitch, main_extent) {
                let Some(item) = lane
                    .key_at(slot.position)
                    .and_then(|key| carousel.items().get(key.0))
                else {
                    continue;
                };
                let focused = app.focus == Focus::Carousel
                    && app.cursor.lane == geometry.lane
                    && app.cursor.position == slot.position;

                let (x, y, width, height) = match app.axis() {
                    Axis::Vertical => (
                        i64::from(geometry.cross_start),
                        slot.start,
                        geometry.cross_size,
                        extent,
                    ),
                    Axis::Horizontal => (
                        slot.start,
                        i64::from(geometry.cross_start),
                        extent,
                        geometry.cross_size,
                    ),
                };
                if width == 0 || height == 0 {
                    continue;
                }

                let mut card = Buffer::empty(Rect::new(0, 0, width, height));
                Self::render_card(&mut card, item, focused, hovered, &app.theme);
                blit(
                    &card,
                    frame.buffer_mut(),
                    i32::from(content_x) + x as i32,
                    band_y + y as i32,
                    clip,
                );
            }
        }
    }

    fn render_card(
        buf: &mut Buffer,
        item: &CarouselItem,
        focused: bool,
        hovered: bool,
        theme: &Theme,
    ) {
        let area = buf.area;
        let border = if focused {
            Style::default().fg(theme.accent)
        } else if hovered {
            Style::default().fg(theme.fg1)
        } else {
            Style::default().fg(theme.grey0)
        };
        let title_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", item.title), title_style))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(Style::default().bg(if focused { theme.bg2 } else { theme.bg1 }));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        if !item.role.is_empty() {
            lines.push(Line::from(Span::styled(
                item.role.clone(),
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        if !item.summary.is_empty() {
            lines.push(Line::from(Span::styled(
                item.summary.clone(),
                Style::default().fg(theme.fg1),
            )));
        }
        if item.video.is_some() {
            lines.push(Line::from(Span::styled(
                "▶ video",
                Style::default().fg(theme.info),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
