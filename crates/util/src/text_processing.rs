use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `text` so it occupies at most `max_width` terminal columns,
/// appending an ellipsis when anything was cut.
///
/// Widths are measured in display columns, so CJK text (two columns per
/// glyph) is cut at the right place.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
