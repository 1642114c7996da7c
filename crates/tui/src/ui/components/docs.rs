//! Documentation panel for the selected command.

use clitutor_catalog::Catalog;
use clitutor_types::Command;
use clitutor_util::classify_entry;
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

#[derive(Debug, Default)]
pub struct DocsComponent;

fn heading(theme: &dyn Theme, title: &'static str) -> Line<'static> {
    Line::styled(title, theme.text_secondary_style().add_modifier(Modifier::BOLD))
}

fn bullets(theme: &dyn Theme, items: &[String], lines: &mut Vec<Line<'static>>) {
    for item in items {
        lines.push(Line::from(vec![
            Span::styled("  • ", theme.accent_primary_style()),
            Span::styled(item.clone(), theme.text_primary_style()),
        ]));
    }
}

/// Documentation body for `command`. Empty sections are left out; related
/// references that do not resolve are shown as written, muted.
pub fn documentation_lines(catalog: &Catalog, command: &Command, theme: &dyn Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(command.name.clone(), theme.accent_emphasis_style()),
        Line::from(th::labeled_span(
            theme,
            "Difficulty: ",
            command.difficulty.label().to_string(),
            theme.difficulty_style(command.difficulty),
        )),
        Line::default(),
        Line::styled(command.description.clone(), theme.text_primary_style()),
        Line::default(),
        heading(theme, "Syntax"),
        Line::styled(format!("  {}", command.syntax), theme.status_info()),
        heading(theme, "Example"),
        Line::styled(format!("  $ {}", command.example), theme.accent_primary_style()),
    ];

    if !command.output.is_empty() {
        lines.push(Line::default());
        lines.push(heading(theme, "Expected Output"));
        for (line, kind) in classify_entry(&command.output) {
            lines.push(Line::styled(format!("  {line}"), theme.line_style(kind)));
        }
    }

    if !command.best_practices.is_empty() {
        lines.push(Line::default());
        lines.push(heading(theme, "Best practices"));
        bullets(theme, &command.best_practices, &mut lines);
    }
    if !command.common_mistakes.is_empty() {
        lines.push(Line::default());
        lines.push(heading(theme, "Common mistakes"));
        bullets(theme, &command.common_mistakes, &mut lines);
    }

    let related = catalog.related(command);
    if !related.is_empty() {
        lines.push(Line::default());
        lines.push(heading(theme, "Related commands"));
        for entry in related {
            let span = match entry.command {
                Some(target) => Span::styled(target.name.clone(), theme.text_primary_style()),
                None => Span::styled(entry.reference.to_string(), theme.text_muted_style()),
            };
            lines.push(Line::from(vec![Span::styled("  → ", theme.accent_primary_style()), span]));
        }
    }
    lines
}

impl Component for DocsComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Documentation"), false);
        let lines = match app.selected_command() {
            Some(command) => documentation_lines(&app.ctx.catalog, &command, theme),
            None => vec![Line::styled(
                "Select a command to see its documentation.",
                theme.text_muted_style(),
            )],
        };
        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(th::panel_style(theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, rect);
    }
}
