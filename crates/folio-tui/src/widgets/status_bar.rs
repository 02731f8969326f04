use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let section = app.layout.section_at(app.scroll.current_scroll());

        let focus_str = match app.focus {
            Focus::Page => "PAGE",
            Focus::Carousel => "WORKS",
            Focus::Panel => "DETAIL",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let lock = if app.is_scroll_locked() { " | locked" } else { "" };
            let carousel = app.showcase.carousel();
            let pause = if carousel.is_paused() {
                " | paused"
            } else if app
                .visible_lanes()
                .iter()
                .any(|&lane| carousel.lane_paused(lane))
            {
                " | hold"
            } else {
                ""
            };
            format!(
                " {} | {} | {}/{}{}{}",
                focus_str,
                section.label(),
                app.scroll.current_scroll(),
                app.layout.max_scroll(),
                lock,
                pause
            )
        };

        let help_hint = match app.focus {
            Focus::Page => " q:quit j/k:scroll w:works c:contact Tab:carousel ",
            Focus::Carousel => " h/l:lane j/k:card Enter:open Esc:back ",
            Focus::Panel => " j/k:scroll n/N:media o:open Esc:close ",
        };
        let padding_len = usize::from(area.width)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
