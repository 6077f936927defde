//! Preview text rules.

/// Shown in the preview when the input is blank.
pub const PLACEHOLDER_TEXT: &str = "Empty";

/// Text to display for `input`: trimmed, or [`PLACEHOLDER_TEXT`] when blank.
#[must_use]
pub fn display_text(input: &str) -> &str {
    export_text(input).unwrap_or(PLACEHOLDER_TEXT)
}

/// Text to export for `input`: trimmed, or `None` when blank.
///
/// A screenshot of blank input is skipped rather than rendering the placeholder.
#[must_use]
pub fn export_text(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(display_text("  hello \n"), "hello");
        assert_eq!(display_text(""), PLACEHOLDER_TEXT);
        assert_eq!(display_text(" \t\n"), PLACEHOLDER_TEXT);
    }

    #[test]
    fn test_export_text() {
        assert_eq!(export_text(" a\nb "), Some("a\nb"));
        assert_eq!(export_text("   "), None);
    }
}
