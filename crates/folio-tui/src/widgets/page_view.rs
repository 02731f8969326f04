use folio_core::parallax::ParallaxConfig;
use folio_core::progress::Progress;
use folio_core::WordRevealAnimator;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::page::{hero_lines, HeroLine, PageLayout, MARGIN, SKILL_KEYS};
use crate::theme::Theme;

/// Renders the scrolling document: hero, overview reveal, key strengths,
/// the projects heading and the contact footer. The carousel band is left
/// blank for `CarouselWidget`.
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let document = Self::document(app);
        let scroll = usize::from(app.scroll.current_scroll());
        let visible: Vec<Line> = document
            .into_iter()
            .skip(scroll)
            .take(usize::from(area.height))
            .collect();

        let paragraph =
            Paragraph::new(visible).style(Style::default().fg(app.theme.fg0).bg(app.theme.bg0));
        frame.render_widget(paragraph, area);
    }

    /// Every row of the page, one `Line` per document row
    fn document(app: &App) -> Vec<Line<'static>> {
        let layout = &app.layout;
        let theme = &app.theme;
        let messages = &app.catalog.messages;
        let mut rows = vec![Line::default(); usize::from(layout.total_height)];
        let mut put = |row: u16, line: Line<'static>| {
            if let Some(slot) = rows.get_mut(usize::from(row)) {
                *slot = line;
            }
        };

        // Hero
        for (i, line) in hero_lines(messages).into_iter().enumerate() {
            put(layout.hero_text_top + i as u16, Self::hero_line(line, theme));
        }

        // Overview
        put(
            layout.overview.top + 1,
            Self::indented(vec![Span::styled(
                messages.label("Hero.overviewTitle").to_string(),
                Style::default()
                    .fg(theme.heading)
                    .add_modifier(Modifier::BOLD),
            )]),
        );
        let paragraphs = [
            (
                &app.intro,
                app.intro_progress.get(),
                layout.intro.top,
                &layout.intro_lines,
            ),
            (
                &app.details,
                app.details_progress.get(),
                layout.details.top,
                &layout.details_lines,
            ),
        ];
        for (animator, progress, top, lines) in paragraphs {
            for (i, words) in lines.iter().enumerate() {
                put(
                    top + i as u16,
                    Self::reveal_line(animator, progress, words, theme),
                );
            }
        }

        // Key strengths drift sideways with their section's progress
        let strengths = app.strengths_progress.get();
        for (i, key) in SKILL_KEYS.iter().enumerate() {
            put(
                layout.strengths.top + 1 + i as u16 * 2,
                Self::parallax_line(
                    messages.label(key),
                    i,
                    strengths,
                    &app.config.parallax,
                    layout,
                    theme,
                ),
            );
        }

        // Projects heading; the band below belongs to the carousel
        put(
            layout.projects.top,
            Self::indented(vec![Span::styled(
                messages.label("Projects.title").to_string(),
                Style::default()
                    .fg(theme.heading)
                    .add_modifier(Modifier::BOLD),
            )]),
        );
        put(
            layout.projects.top + 1,
            Self::indented(vec![Span::styled(
                messages.label("Projects.subtitle").to_string(),
                Style::default().fg(theme.muted),
            )]),
        );

        // Contact
        let contact = layout.contact.top;
        put(
            contact + 1,
            Self::indented(vec![Span::styled(
                messages.label("Footer.title").to_string(),
                Style::default()
                    .fg(theme.heading)
                    .add_modifier(Modifier::BOLD),
            )]),
        );
        put(
            contact + 3,
            Self::indented(vec![Span::styled(
                messages.label("Footer.email").to_string(),
                Style::default().fg(theme.accent),
            )]),
        );
        put(
            contact + 4,
            Self::indented(vec![Span::styled(
                messages.label("Footer.location").to_string(),
                Style::default().fg(theme.fg1),
            )]),
        );
        put(
            contact + 6,
            Self::indented(vec![Span::styled(
                messages.label("Footer.copyright").to_string(),
                Style::default().fg(theme.muted),
            )]),
        );

        rows
    }

    fn indented(mut spans: Vec<Span<'static>>) -> Line<'static> {
        spans.insert(0, Span::raw(" ".repeat(usize::from(MARGIN))));
        Line::from(spans)
    }

    fn hero_line(line: HeroLine, theme: &Theme) -> Line<'static> {
        match line {
            HeroLine::Blank => Line::default(),
            HeroLine::Label(text) => Self::indented(vec![Span::styled(
                text,
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )]),
            HeroLine::Title(text) => Self::indented(vec![Span::styled(
                text,
                Style::default()
                    .fg(theme.heading)
                    .add_modifier(Modifier::BOLD),
            )]),
            HeroLine::Text(text) => {
                Self::indented(vec![Span::styled(text, Style::default().fg(theme.fg1))])
            }
            HeroLine::Link { prefix, label, .. } => Self::indented(vec![
                Span::styled(format!("{} ", prefix), Style::default().fg(theme.fg1)),
                Span::styled(
                    HeroLine::link_text(&label),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
            ]),
        }
    }

    /// One wrapped line of a revealing paragraph, each word at its own
    /// emphasis
    fn reveal_line(
        animator: &WordRevealAnimator,
        progress: Option<Progress>,
        indices: &[usize],
        theme: &Theme,
    ) -> Line<'static> {
        let words = animator.words();
        let mut spans = Vec::with_capacity(indices.len() * 2);
        for (n, &index) in indices.iter().enumerate() {
            let Some(word) = words.get(index) else {
                continue;
            };
            if n > 0 {
                spans.push(Span::raw(" "));
            }
            let level = animator.emphasis(index, progress);
            spans.push(Span::styled(
                word.text.clone(),
                Style::default().fg(theme.emphasis(level)),
            ));
        }
        Self::indented(spans)
    }

    /// A centered strengths line shifted by its parallax offset
    fn parallax_line(
        text: &str,
        index: usize,
        progress: Option<Progress>,
        config: &ParallaxConfig,
        layout: &PageLayout,
        theme: &Theme,
    ) -> Line<'static> {
        let content = layout.content_width();
        let text_width = text.width() as i32;
        let centered = i32::from(MARGIN) + (i32::from(content) - text_width).max(0) / 2;
        let shift = config.line(index).offset_cells(progress, content);
        let column = centered + shift;

        let style = if index % 2 == 0 {
            Style::default()
                .fg(theme.heading)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accent)
        };

        if column >= 0 {
            Line::from(vec![
                Span::raw(" ".repeat(column as usize)),
                Span::styled(text.to_string(), style),
            ])
        } else {
            // Clip the part pushed past the left edge
            let hidden = column.unsigned_abs() as usize;
            let visible: String = text.chars().skip(hidden).collect();
            Line::from(Span::styled(visible, style))
        }
    }
}
