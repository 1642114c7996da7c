//! Catalog browser: progress gauge plus the category/command tree.

use clitutor_store::selectors;
use clitutor_util::truncate_with_ellipsis;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, ListItem},
};
use unicode_width::UnicodeWidthStr;

use super::state::SidebarRow;
use crate::app::{App, Effect};
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct SidebarComponent;

impl SidebarComponent {
    fn render_progress(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let catalog = &app.ctx.catalog;
        let (completed, ratio, percent) = app.ctx.store.read(|state| {
            (
                selectors::completed_count(state),
                selectors::progress_fraction(state, catalog),
                selectors::progress_percent(state, catalog),
            )
        });
        let total = selectors::total_command_count(catalog);

        let gauge = Gauge::default()
            .block(th::block(theme, Some("Progress"), false))
            .gauge_style(
                Style::default()
                    .fg(theme.roles().accent_secondary)
                    .bg(theme.roles().surface_muted),
            )
            .ratio(ratio)
            .label(Span::styled(
                format!("{completed}/{total} ({percent}%)"),
                theme.text_primary_style().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(gauge, area);
    }

    fn row_line(&self, app: &App, row: &SidebarRow, width: usize) -> Line<'static> {
        let theme = &*app.ctx.theme;
        let catalog = &app.ctx.catalog;
        match row {
            SidebarRow::Category(category_id) => {
                let Some(category) = catalog.category(category_id) else {
                    return Line::from(category_id.clone());
                };
                let open = app.open_category().as_deref() == Some(category_id.as_str());
                let (done, total) = app.ctx.store.read(|state| {
                    (
                        selectors::category_completed_count(state, catalog, category_id),
                        catalog.commands_in(category_id).count(),
                    )
                });
                let marker = if open { "▾" } else { "▸" };
                let counter = format!(" {done}/{total}");
                let head = format!("{marker} {} ", category.icon);
                let room = width.saturating_sub(head.width() + counter.width());
                let counter_style = if total > 0 && done == total {
                    theme.status_success()
                } else {
                    theme.text_muted_style()
                };
                Line::from(vec![
                    Span::styled(head, theme.accent_primary_style()),
                    Span::styled(
                        truncate_with_ellipsis(&category.name, room),
                        theme.text_secondary_style().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(counter, counter_style),
                ])
            }
            SidebarRow::Command(command_id) => {
                let Some(command) = catalog.find(command_id) else {
                    return Line::from(command_id.clone());
                };
                let (completed, selected) = app.ctx.store.read(|state| {
                    (
                        selectors::is_command_completed(state, command_id),
                        state.selected_command().is_some_and(|current| current.id == *command_id),
                    )
                });
                let (glyph, glyph_style) = if completed {
                    ("✓", theme.status_success())
                } else {
                    ("○", theme.text_muted_style())
                };
                let badge = format!(" {}", command.difficulty.label());
                let room = width.saturating_sub(4 + badge.width());
                let name_style = if selected {
                    theme.accent_emphasis_style()
                } else {
                    theme.text_primary_style()
                };
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{glyph} "), glyph_style),
                    Span::styled(truncate_with_ellipsis(&command.name, room), name_style),
                    Span::styled(badge, theme.difficulty_style(command.difficulty)),
                ])
            }
        }
    }
}

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up => app.sidebar.move_up(),
            KeyCode::Down => app.sidebar.move_down(),
            KeyCode::Home => app.sidebar.move_to_start(),
            KeyCode::End => app.sidebar.move_to_end(),
            KeyCode::Enter => app.activate_sidebar_row(),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        app.sync_sidebar();
        let areas = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(rect);
        self.render_progress(frame, areas[0], app);

        let block = th::block(&*app.ctx.theme, Some("Claude Code Tutorial"), true);
        let inner = block.inner(areas[1]);
        // highlight symbol takes two columns
        let width = inner.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = app
            .sidebar
            .rows()
            .iter()
            .map(|row| ListItem::new(self.row_line(app, row, width)))
            .collect();
        let list = th::create_list_with_highlight(items, &*app.ctx.theme, true).block(block);
        frame.render_stateful_widget(list, areas[1], &mut app.sidebar.list_state);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[("↑/↓", " Move  "), ("Enter", " Open/Select  ")])
    }
}
