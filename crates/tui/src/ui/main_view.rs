//! Top-level view: lays out the panels, routes keys and draws the hint bar.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Effect, Msg, StatusKind};
use crate::ui::components::{Component, DocsComponent, SidebarComponent, TerminalComponent};
use crate::ui::theme::theme_helpers as th;

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 40;

#[derive(Debug, Default)]
pub struct MainView {
    sidebar: SidebarComponent,
    terminal: TerminalComponent,
    docs: DocsComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a message to the app and every component.
    pub fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        let mut effects = app.update(&msg);
        effects.extend(self.sidebar.update(app, &msg));
        effects.extend(self.terminal.update(app, &msg));
        effects.extend(self.docs.update(app, &msg));
        effects
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let outer = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let columns = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)]).split(outer[0]);
        let show_documentation = app.ctx.store.read(|state| state.show_documentation());
        let constraints = if show_documentation {
            [Constraint::Percentage(60), Constraint::Percentage(40)]
        } else {
            [Constraint::Percentage(100), Constraint::Length(0)]
        };
        // wide screens put the docs beside the terminal, narrow ones below it
        let content = if columns[1].width >= 100 {
            Layout::horizontal(constraints).split(columns[1])
        } else {
            Layout::vertical(constraints).split(columns[1])
        };

        vec![
            columns[0], // sidebar
            content[0], // terminal
            content[1], // documentation (zero-sized when hidden)
            outer[1],   // hints
        ]
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Quit];
        }
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Home | KeyCode::End | KeyCode::Enter => {
                self.sidebar.handle_key_events(app, key)
            }
            KeyCode::PageUp | KeyCode::PageDown => self.terminal.handle_key_events(app, key),
            KeyCode::Char('q') => vec![Effect::Quit],
            KeyCode::Char('r') => app.run_selected().into_iter().collect(),
            KeyCode::Char('y') => app.copy_selected_example().into_iter().collect(),
            KeyCode::Char('c') => {
                app.clear_terminal();
                Vec::new()
            }
            KeyCode::Char('d') => {
                app.toggle_documentation();
                Vec::new()
            }
            KeyCode::Char('R') => {
                app.reset_progress();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.sidebar.render(frame, layout[0], app);
        self.terminal.render(frame, layout[1], app);
        if layout[2].area() > 0 {
            self.docs.render(frame, layout[2], app);
        }

        let hints_widget = Paragraph::new(Line::from(self.get_hint_spans(app))).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[3]);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.ctx.theme;
        let mut spans = vec![Span::styled("Hints: ", theme.text_muted_style())];
        spans.extend(self.sidebar.get_hint_spans(app));
        spans.extend(th::build_hint_spans(
            theme,
            &[
                ("r", " Run  "),
                ("c", " Clear  "),
                ("d", " Docs  "),
                ("y", " Copy  "),
                ("R", " Reset  "),
            ],
        ));
        spans.extend(self.terminal.get_hint_spans(app));
        spans.extend(th::build_hint_spans(theme, &[("q", " Quit")]));

        if let Some(status) = app.status.as_ref() {
            let style = match status.kind {
                StatusKind::Info => theme.status_info(),
                StatusKind::Success => theme.status_success(),
                StatusKind::Error => theme.status_error(),
            };
            spans.push(Span::styled("  │ ", theme.text_muted_style()));
            spans.push(Span::styled(status.text.clone(), style));
        }
        spans
    }
}
