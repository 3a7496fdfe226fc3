//! Text processing utilities.

use std::sync::OnceLock;

use regex::Regex;

static SENTENCE_BOUNDARY: OnceLock<Regex> = OnceLock::new();

/// Boundary after sentence-final punctuation (optionally followed by a
/// closing quote or bracket) and at least one whitespace character.
fn sentence_boundary() -> &'static Regex {
    SENTENCE_BOUNDARY
        .get_or_init(|| Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("valid sentence boundary regex"))
}

/// Check if content has meaningful text (not just whitespace/punctuation).
pub fn has_meaningful_content(content: &str, min_chars: usize) -> bool {
    content.chars().filter(|c| !c.is_whitespace()).count() >= min_chars
}

/// Split text into sentences on punctuation boundaries.
///
/// Deliberately simple: abbreviations like "e.g." may split early, which is
/// acceptable for relevance scoring where sentences are ranked, not parsed.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in sentence_boundary().find_iter(text) {
        let sentence = text[start..boundary.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = boundary.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Build a section title from the first `max_words` words of a chunk.
pub fn section_title(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep only the first `max_words` words of a text.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_meaningful_content() {
        assert!(!has_meaningful_content("", 50));
        assert!(!has_meaningful_content("   \n\n   ", 50));
        assert!(!has_meaningful_content("short", 50));
        assert!(!has_meaningful_content(&" ".repeat(1000), 50));
        assert!(has_meaningful_content(&"a".repeat(50), 50));
        assert!(has_meaningful_content("tiny but enough", 5));
    }

    #[test]
    fn test_split_sentences_basic() {
        let sentences = split_sentences("First sentence. Second one! Third?");
        assert_eq!(
            sentences,
            vec!["First sentence.", "Second one!", "Third?"]
        );
    }

    #[test]
    fn test_split_sentences_no_terminator() {
        let sentences = split_sentences("a fragment without punctuation");
        assert_eq!(sentences, vec!["a fragment without punctuation"]);
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_split_sentences_quotes() {
        let sentences = split_sentences("He said \"stop.\" Then left.");
        assert_eq!(sentences, vec!["He said \"stop.\"", "Then left."]);
    }

    #[test]
    fn test_section_title() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        assert_eq!(
            section_title(text, 10),
            "one two three four five six seven eight nine ten"
        );
        assert_eq!(section_title("short title", 10), "short title");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  spaced   out  "), 2);
        assert_eq!(word_count("a b c"), 3);
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("one two three", 2), "one two");
        assert_eq!(truncate_words("one", 5), "one");
    }
}
