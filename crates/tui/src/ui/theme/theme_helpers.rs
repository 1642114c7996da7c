use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(
            t,
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        ));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// List with the theme's selection highlight and a leading marker.
pub fn create_list_with_highlight<'a, T: Theme + ?Sized>(items: Vec<ListItem<'a>>, theme: &T, focused: bool) -> List<'a> {
    let highlight = if focused {
        theme.selection_style().add_modifier(Modifier::BOLD)
    } else {
        theme.selection_style()
    };
    List::new(items)
        .style(panel_style(theme))
        .highlight_style(highlight)
        .highlight_symbol("› ")
}

/// Key/label pairs rendered as `key` in emphasis followed by a muted label.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(key.to_string(), theme.accent_emphasis_style()));
        spans.push(Span::styled(label.to_string(), theme.text_muted_style()));
    }
    spans
}

/// Label with a trailing value, both styled.
pub fn labeled_span<'a, T: Theme + ?Sized>(theme: &T, label: &'a str, value: String, value_style: Style) -> Vec<Span<'a>> {
    vec![
        Span::styled(label, theme.text_secondary_style().add_modifier(Modifier::BOLD)),
        Span::styled(value, value_style),
    ]
}
