use folio_core::{DetailView, MediaView};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use super::blit;
use crate::app::App;
use crate::page::wrap_text;
use crate::theme::Theme;

/// Project detail panel sliding in from the right over a dimmed page
pub struct DetailPanelWidget;

impl DetailPanelWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let Some(view) = app.detail_view() else {
            return;
        };
        let geometry = app.panel_geometry();
        if geometry.visible().width == 0 {
            return;
        }

        // Backdrop
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));

        let full = geometry.full;
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", view.title),
                Style::default()
                    .fg(app.theme.heading)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_top(
                Line::from(Span::styled(
                    app.close_label(),
                    Style::default().fg(app.theme.accent),
                ))
                .right_aligned(),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent))
            .style(Style::default().fg(app.theme.fg0).bg(app.theme.bg1));

        let local = Rect::new(0, 0, full.width, full.height);
        let inner = block.inner(local);
        let content = Self::content(app, &view, inner.width.saturating_sub(2));
        app.clamp_panel_scroll(content.len() as u16, inner.height);

        let mut panel = Buffer::empty(local);
        block.render(local, &mut panel);
        let body = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        Paragraph::new(content)
            .scroll((app.panel_scroll, 0))
            .render(body, &mut panel);

        blit(
            &panel,
            frame.buffer_mut(),
            i32::from(full.x) + i32::from(geometry.offset),
            i32::from(full.y),
            area,
        );
    }

    /// Panel body, pre-wrapped to `width` columns
    fn content(app: &App, view: &DetailView, width: u16) -> Vec<Line<'static>> {
        let theme = &app.theme;
        let messages = &app.catalog.messages;
        let width = usize::from(width.max(1));
        let mut lines: Vec<Line<'static>> = Vec::new();

        let text = |lines: &mut Vec<Line<'static>>, text: &str, style: Style| {
            for row in wrap_text(text, width) {
                lines.push(Line::from(Span::styled(row, style)));
            }
        };
        let heading = |lines: &mut Vec<Line<'static>>, label: &str| {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                label.to_string(),
                Style::default()
                    .fg(theme.heading)
                    .add_modifier(Modifier::BOLD),
            )));
        };

        if let Some(logo) = &view.logo {
            lines.push(Line::from(Span::styled(
                format!("◆ {}", logo),
                Style::default().fg(theme.muted),
            )));
        }
        text(&mut lines, &view.summary, Style::default().fg(theme.fg1));

        // Media: the primary slot, then the gallery
        let media = view.media();
        lines.push(Line::default());
        if let Some(primary) = media.first() {
            let label = match primary {
                MediaView::Video { .. } => messages.label("Projects.playVideo"),
                MediaView::Thumbnail(_) => "Poster",
            };
            lines.push(Self::media_line(
                primary,
                label,
                app.media_cursor == 0,
                theme,
            ));
        }
        if let Some(gallery) = &view.gallery {
            heading(&mut lines, messages.label("Projects.projectGallery"));
            for (i, item) in gallery.iter().enumerate() {
                let label = format!("#{}", i + 1);
                lines.push(Self::media_line(
                    item,
                    &label,
                    app.media_cursor == i + 1,
                    theme,
                ));
            }
        }
        if media.len() > 1 {
            lines.push(Line::from(Span::styled(
                "n/N switch  o open",
                Style::default().fg(theme.grey1),
            )));
        }

        if !view.role.is_empty() {
            heading(&mut lines, messages.label("Projects.projectRole"));
            text(&mut lines, &view.role, Style::default().fg(theme.fg0));
        }
        if !view.tasks.is_empty() {
            heading(&mut lines, messages.label("Projects.projectTasks"));
            for task in &view.tasks {
                let rows = wrap_text(task, width.saturating_sub(2));
                for (i, row) in rows.into_iter().enumerate() {
                    let bullet = if i == 0 { "• " } else { "  " };
                    lines.push(Line::from(vec![
                        Span::styled(bullet, Style::default().fg(theme.accent)),
                        Span::styled(row, Style::default().fg(theme.fg0)),
                    ]));
                }
            }
        }
        if !view.result.is_empty() {
            heading(&mut lines, messages.label("Projects.projectResult"));
            text(&mut lines, &view.result, Style::default().fg(theme.success));
        }
        if let Some(tags) = &view.tags {
            lines.push(Line::default());
            let tags = tags
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(" ");
            text(&mut lines, &tags, Style::default().fg(theme.info));
        }

        lines
    }

    fn media_line(media: &MediaView, label: &str, selected: bool, theme: &Theme) -> Line<'static> {
        let (marker, location) = match media {
            MediaView::Video { embed, .. } => ("▶", embed.clone()),
            MediaView::Thumbnail(image) => ("▣", image.to_string()),
        };
        let style = if selected {
            Style::default().fg(theme.fg0).bg(theme.selection)
        } else {
            Style::default().fg(theme.fg1)
        };
        Line::from(vec![
            Span::styled(
                format!("{} {} ", marker, label),
                style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(location, style.fg(theme.info)),
        ])
    }
}
