//! Paragraph-level chunking of extracted page text.

use regex::Regex;

use crate::models::{Chunk, DocumentText, ExtractionConfig};
use crate::utils::{has_meaningful_content, word_count};

/// Minimum words for a paragraph to enter the cohesive summary pool.
const MIN_SUMMARY_WORDS: usize = 5;

/// Splits page text into paragraph chunks, the unit of ranking.
#[derive(Debug)]
pub struct ParagraphChunker {
    min_chars: usize,
    paragraph_re: Regex,
    section_re: Regex,
}

impl ParagraphChunker {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            min_chars: config.min_paragraph_chars,
            paragraph_re: Regex::new(r"\n\s*\n").expect("valid paragraph regex"),
            // Numbered headings (1.2), ALL-CAPS heading words, roman numerals (IV.)
            section_re: Regex::new(r"\n\s*\d+\.\d+|\n\s*[A-Z]+\s|\n\s*[IVX]+\.")
                .expect("valid section regex"),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&ExtractionConfig::default())
    }

    /// Chunk one document into filtered paragraphs, preserving page and
    /// paragraph order.
    pub fn chunk_document(&self, document: &DocumentText) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut sequence = 0u32;

        for page in &document.pages {
            for paragraph in self.paragraph_re.split(&page.text) {
                let paragraph = paragraph.trim();
                if paragraph.len() > self.min_chars
                    && has_meaningful_content(paragraph, self.min_chars)
                {
                    chunks.push(Chunk::new(
                        document,
                        page.page_number,
                        sequence,
                        paragraph.to_string(),
                    ));
                    sequence += 1;
                }
            }
        }

        chunks
    }

    /// Chunk all documents in discovery order.
    pub fn chunk_documents(&self, documents: &[DocumentText]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| self.chunk_document(doc))
            .collect()
    }

    /// Split page text on section heading patterns (cohesive mode).
    pub fn split_sections<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.section_re
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Chunk a document for the cohesive summary: section split first,
    /// then paragraphs, with a lighter word-count filter.
    pub fn chunk_for_summary(&self, document: &DocumentText) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut sequence = 0u32;

        for page in &document.pages {
            for section in self.split_sections(&page.text) {
                for paragraph in self.paragraph_re.split(section) {
                    let paragraph = paragraph.trim();
                    if word_count(paragraph) >= MIN_SUMMARY_WORDS {
                        chunks.push(Chunk::new(
                            document,
                            page.page_number,
                            sequence,
                            paragraph.to_string(),
                        ));
                        sequence += 1;
                    }
                }
            }
        }

        chunks
    }

    /// Chunk all documents for the cohesive summary.
    pub fn chunk_documents_for_summary(&self, documents: &[DocumentText]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| self.chunk_for_summary(doc))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageText;

    fn doc(pages: &[(u32, &str)]) -> DocumentText {
        DocumentText::new(
            "test.pdf",
            pages
                .iter()
                .map(|(n, text)| PageText {
                    page_number: *n,
                    text: text.to_string(),
                })
                .collect(),
        )
    }

    fn long_para(label: &str) -> String {
        format!(
            "{label}: this paragraph carries enough characters to pass the default length filter applied during chunking."
        )
    }

    #[test]
    fn test_chunk_splits_on_blank_lines() {
        let a = long_para("first");
        let b = long_para("second");
        let document = doc(&[(1, &format!("{a}\n\n{b}"))]);

        let chunker = ParagraphChunker::with_defaults();
        let chunks = chunker.chunk_document(&document);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, a);
        assert_eq!(chunks[1].text, b);
    }

    #[test]
    fn test_chunk_filters_short_paragraphs() {
        let keep = long_para("keep");
        let document = doc(&[(1, &format!("too short\n\n{keep}"))]);

        let chunker = ParagraphChunker::with_defaults();
        let chunks = chunker.chunk_document(&document);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, keep);
    }

    #[test]
    fn test_chunk_preserves_import_order() {
        let p1 = long_para("page one");
        let p2 = long_para("page two");
        let document = doc(&[(1, &p1), (2, &p2)]);

        let chunker = ParagraphChunker::with_defaults();
        let chunks = chunker.chunk_document(&document);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page_number, 1);
        assert_eq!(chunks[1].page_number, 2);
        assert_ne!(chunks[0].id, chunks[1].id);
    }

    #[test]
    fn test_chunk_documents_keeps_document_order() {
        let p = long_para("content");
        let first = DocumentText::new(
            "a.pdf",
            vec![PageText {
                page_number: 1,
                text: p.clone(),
            }],
        );
        let second = DocumentText::new(
            "b.pdf",
            vec![PageText {
                page_number: 1,
                text: p,
            }],
        );

        let chunker = ParagraphChunker::with_defaults();
        let chunks = chunker.chunk_documents(&[first, second]);
        assert_eq!(chunks[0].document, "a.pdf");
        assert_eq!(chunks[1].document, "b.pdf");
    }

    #[test]
    fn test_split_sections_on_numbered_headings() {
        let chunker = ParagraphChunker::with_defaults();
        let sections =
            chunker.split_sections("intro text\n1.1 first part body\n2.3 second part body");
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0], "intro text");
    }

    #[test]
    fn test_chunk_for_summary_word_filter() {
        let document = doc(&[(1, "one two three\n\nthis one has five whole words here")]);
        let chunker = ParagraphChunker::with_defaults();
        let chunks = chunker.chunk_for_summary(&document);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.starts_with("this one"));
    }

    #[test]
    fn test_empty_document_yields_no_chunks() {
        let document = doc(&[]);
        let chunker = ParagraphChunker::with_defaults();
        assert!(chunker.chunk_document(&document).is_empty());
        assert!(chunker.chunk_for_summary(&document).is_empty());
    }
}
