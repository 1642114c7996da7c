//! Simulated terminal: command info bar plus the styled transcript.

use clitutor_util::classify_entry;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::app::{App, Effect};
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

/// Lines moved by one PgUp/PgDn.
const PAGE: usize = 10;

#[derive(Debug, Default)]
pub struct TerminalComponent;

/// Expand transcript entries into styled physical lines.
pub fn transcript_lines(entries: &[String], theme: &dyn Theme) -> Vec<Line<'static>> {
    entries
        .iter()
        .flat_map(|entry| classify_entry(entry))
        .map(|(line, kind)| Line::styled(line.to_string(), theme.line_style(kind)))
        .collect()
}

impl TerminalComponent {
    fn render_info_bar(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let line = match app.selected_command() {
            Some(command) => {
                let category = app
                    .ctx
                    .catalog
                    .category(&command.category)
                    .map(|category| category.name.clone())
                    .unwrap_or_else(|| command.category.clone());
                Line::from(vec![
                    Span::styled(command.name, theme.accent_emphasis_style()),
                    Span::styled(" · ", theme.text_muted_style()),
                    Span::styled(category, theme.text_secondary_style()),
                ])
            }
            None => Line::styled("No command selected", theme.text_muted_style()),
        };
        frame.render_widget(Paragraph::new(line).style(th::panel_style(theme)), area);
    }
}

impl Component for TerminalComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::PageUp => app.transcript.scroll_up(PAGE),
            KeyCode::PageDown => app.transcript.scroll_down(PAGE),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let block = th::block(&*app.ctx.theme, Some("Terminal"), false);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let areas = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(inner);
        self.render_info_bar(frame, areas[0], app);

        let theme = &*app.ctx.theme;
        let (mut lines, running) = app.ctx.store.read(|state| {
            (transcript_lines(state.terminal_output(), theme), state.is_executing())
        });
        if running || app.executing {
            lines.push(Line::styled(
                format!("Running... {}", app.throbber()),
                theme.accent_emphasis_style().add_modifier(Modifier::ITALIC),
            ));
        }

        let list_area = areas[1];
        let height = list_area.height as usize;
        let total = lines.len();
        let window = app.transcript.window(total, height);
        let top = window.start;
        let visible: Vec<Line> = lines.drain(window).collect();
        frame.render_widget(Paragraph::new(visible).style(th::panel_style(theme)), list_area);

        if total > height && height > 0 {
            let max_scroll_offset = total.saturating_sub(height);
            let mut sb_state = ScrollbarState::new(max_scroll_offset)
                .position(top)
                .viewport_content_length(height);
            let sb = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(Style::default().fg(theme.roles().scrollbar_thumb))
                .track_style(Style::default().fg(theme.roles().scrollbar_track));
            frame.render_stateful_widget(sb, list_area, &mut sb_state);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[("PgUp/PgDn", " Scroll  ")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;

    #[test]
    fn multi_line_entries_are_split_and_styled() {
        let theme = DraculaTheme::new();
        let entries = vec![
            "$ claude --help".to_string(),
            "Usage: claude\n✅ success".to_string(),
            String::new(),
        ];
        let lines = transcript_lines(&entries, &theme);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].style, theme.accent_emphasis_style());
        assert_eq!(lines[2].style, theme.status_success());
        assert_eq!(lines[3].to_string(), "");
    }
}
