//! Display classification for terminal transcript lines.
//!
//! Lines are classified with cheap substring heuristics only. The checks run
//! in a fixed order and the first match wins, so a prompt mentioning an error
//! is still a prompt.

/// Prefix that marks a synthetic prompt line.
pub const PROMPT_PREFIX: &str = "$ ";

/// Styling class for a single physical transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Starts with `$ `
    Prompt,
    /// Mentions "success" or carries ✅
    Success,
    /// Mentions "warning" or carries ⚠️
    Warning,
    /// Mentions "error" or carries ❌
    Error,
    /// Looks like it references a path or a source file
    FileReference,
    Plain,
}

/// Classify one physical line (no embedded newlines expected).
pub fn classify_line(line: &str) -> LineKind {
    if line.starts_with(PROMPT_PREFIX) {
        return LineKind::Prompt;
    }

    let lower = line.to_lowercase();
    if line.contains('✅') || lower.contains("success") {
        return LineKind::Success;
    }
    if line.contains("⚠️") || line.contains('⚠') || lower.contains("warning") {
        return LineKind::Warning;
    }
    if lower.contains("error") || line.contains('❌') {
        return LineKind::Error;
    }
    if line.contains('/') || line.contains(".py") || line.contains(".js") || line.contains(".ts") {
        return LineKind::FileReference;
    }
    LineKind::Plain
}

/// Split a transcript entry into physical lines, classifying each.
///
/// Transcript entries may hold multi-line canned output; an empty entry
/// still yields a single blank line so separators survive rendering.
pub fn classify_entry(entry: &str) -> Vec<(&str, LineKind)> {
    entry.split('\n').map(|line| (line, classify_line(line))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_prefix_wins_over_keywords() {
        assert_eq!(classify_line("$ claude --help"), LineKind::Prompt);
        assert_eq!(classify_line("$ grep error log.txt"), LineKind::Prompt);
    }

    #[test]
    fn status_keywords_are_case_insensitive() {
        assert_eq!(classify_line("Task completed SUCCESSFULLY."), LineKind::Success);
        assert_eq!(classify_line("✅ JSON input processed"), LineKind::Success);
        assert_eq!(classify_line("Warning: deprecated flag"), LineKind::Warning);
        assert_eq!(classify_line("⚠️  Potential issue"), LineKind::Warning);
        assert_eq!(classify_line("Error: boom"), LineKind::Error);
        assert_eq!(classify_line("❌ failed"), LineKind::Error);
    }

    #[test]
    fn success_is_checked_before_error() {
        assert_eq!(classify_line("No errors, success"), LineKind::Success);
    }

    #[test]
    fn file_references_and_plain_text() {
        assert_eq!(classify_line("- /project/apps"), LineKind::FileReference);
        assert_eq!(classify_line("Updated main.py"), LineKind::FileReference);
        assert_eq!(classify_line("index.ts changed"), LineKind::FileReference);
        assert_eq!(classify_line("Usage: claude [options]"), LineKind::Plain);
        assert_eq!(classify_line(""), LineKind::Plain);
    }

    #[test]
    fn multi_line_entries_are_split() {
        let classified = classify_entry("Reading input...\n✅ done\n");
        assert_eq!(
            classified,
            vec![
                ("Reading input...", LineKind::Plain),
                ("✅ done", LineKind::Success),
                ("", LineKind::Plain),
            ]
        );
    }
}
