//! Deterministic content summarizer.
//!
//! # Invariants
//! - Pure and infallible for every input, including the empty string.
//! - Lengths are counted in characters, never bytes.

const SHORT_TEXT_THRESHOLD: usize = 50;
const FALLBACK_PREFIX_CHARS: usize = 50;

/// Produces a one-line summary of `text`.
///
/// Rules:
/// - fewer than 50 chars: `Summary: {text} (Short text)`.
/// - otherwise the first `.`-terminated segment, or the first 50 chars plus
///   `...` when the text has no `.`, wrapped as
///   `AI Generated Summary: {first} [Analyzed {n} chars]`.
pub fn summarize(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count < SHORT_TEXT_THRESHOLD {
        return format!("Summary: {text} (Short text)");
    }

    let first = match text.split_once('.') {
        Some((sentence, _)) => format!("{sentence}."),
        None => {
            let prefix: String = text.chars().take(FALLBACK_PREFIX_CHARS).collect();
            format!("{prefix}...")
        }
    };

    format!("AI Generated Summary: {first} [Analyzed {char_count} chars]")
}

#[cfg(test)]
mod tests {
    use super::summarize;

    #[test]
    fn short_text_is_wrapped_verbatim() {
        assert_eq!(summarize("Buy milk."), "Summary: Buy milk. (Short text)");
    }

    #[test]
    fn empty_text_is_short() {
        assert_eq!(summarize(""), "Summary:  (Short text)");
    }

    #[test]
    fn exactly_fifty_chars_takes_long_branch() {
        let text = "a".repeat(49) + ".";
        assert_eq!(text.chars().count(), 50);
        let summary = summarize(&text);
        assert!(summary.starts_with("AI Generated Summary: "));
        assert!(summary.ends_with("[Analyzed 50 chars]"));
    }

    #[test]
    fn long_text_keeps_first_sentence() {
        let text = "Sentence one is here. Sentence two follows. Sentence three ends it.";
        assert_eq!(
            summarize(text),
            format!(
                "AI Generated Summary: Sentence one is here. [Analyzed {} chars]",
                text.chars().count()
            )
        );
    }

    #[test]
    fn long_text_without_period_is_truncated() {
        let text = "x".repeat(80);
        let summary = summarize(&text);
        assert!(summary.contains(&format!("{}...", "x".repeat(50))));
        assert!(summary.ends_with("[Analyzed 80 chars]"));
    }

    #[test]
    fn multibyte_text_counts_characters() {
        let text = "é".repeat(60);
        let summary = summarize(&text);
        assert!(summary.contains(&format!("{}...", "é".repeat(50))));
        assert!(summary.ends_with("[Analyzed 60 chars]"));
    }
}
