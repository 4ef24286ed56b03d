/// Preview length used when quoting a rejected payload line in warnings.
pub const PAYLOAD_PREVIEW_MAX_CHARS: usize = 50;

/// Truncates `text` to at most `max_chars` characters, appending `...` when
/// anything was cut. Char-based so multi-byte content never splits.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut excerpt: String = text.chars().take(max_chars).collect();
    excerpt.push_str("...");
    excerpt
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn short_text_passes_through_unchanged() {
        assert_eq!(preview("{\"a\":1}", 50), "{\"a\":1}");
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        let long = "x".repeat(60);
        let truncated = preview(&long, 50);
        assert_eq!(truncated.chars().count(), 53);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "ééééé";
        assert_eq!(preview(text, 3), "ééé...");
    }

    #[test]
    fn zero_budget_yields_empty_preview() {
        assert_eq!(preview("anything", 0), "");
    }
}
