//! Cohesive summary generation: flowing text from ranked content.

use tracing::{debug, info};

use crate::error::ModelError;
use crate::models::{Chunk, SummaryConfig};
use crate::services::RelevanceScorer;
use crate::utils::{split_sentences, truncate_words, word_count};

/// Builds a flowing summary from scored chunks under a word budget.
///
/// Content keeps document flow: documents in discovery order, pages
/// ascending within a document, relevance descending within a page.
#[derive(Debug)]
pub struct CohesiveSummarizer {
    max_words: usize,
    min_tail_words: usize,
    top_sentences: usize,
}

impl CohesiveSummarizer {
    pub fn new(config: &SummaryConfig) -> Self {
        Self {
            max_words: config.max_words as usize,
            min_tail_words: config.min_tail_words as usize,
            top_sentences: config.top_sentences as usize,
        }
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Build the summary text.
    ///
    /// `doc_order` lists document filenames in discovery order; `scores`
    /// is parallel to `chunks`.
    pub fn build(
        &self,
        chunks: &[Chunk],
        scores: &[f32],
        doc_order: &[String],
        query: &[f32],
        scorer: &dyn RelevanceScorer,
    ) -> Result<String, ModelError> {
        let mut parts: Vec<String> = Vec::new();
        let mut current_words = 0usize;

        for filename in doc_order {
            if current_words >= self.max_words {
                break;
            }

            let mut doc_chunks: Vec<usize> = (0..chunks.len())
                .filter(|&i| &chunks[i].document == filename)
                .collect();
            if doc_chunks.is_empty() {
                continue;
            }

            // Pages ascending, then score descending
            doc_chunks.sort_by(|&a, &b| {
                chunks[a]
                    .page_number
                    .cmp(&chunks[b].page_number)
                    .then_with(|| {
                        scores[b]
                            .partial_cmp(&scores[a])
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
            });

            for idx in doc_chunks {
                if current_words >= self.max_words {
                    break;
                }

                let text = self.refine_chunk(&chunks[idx], query, scorer)?;
                let words = word_count(&text);

                if current_words + words <= self.max_words {
                    parts.push(text);
                    current_words += words;
                } else {
                    let remaining = self.max_words - current_words;
                    if remaining > self.min_tail_words {
                        parts.push(truncate_words(&text, remaining));
                        current_words = self.max_words;
                    }
                    break;
                }
            }
        }

        let mut summary = parts.join(" ");
        if current_words >= self.max_words && parts.len() > 1 {
            summary = format!("{}...", summary.trim_end());
        }

        info!(words = word_count(&summary), parts = parts.len(), "built cohesive summary");
        Ok(summary)
    }

    /// Keep the top sentences of a chunk in their original order.
    fn refine_chunk(
        &self,
        chunk: &Chunk,
        query: &[f32],
        scorer: &dyn RelevanceScorer,
    ) -> Result<String, ModelError> {
        let sentences = split_sentences(&chunk.text);
        if sentences.len() <= 1 {
            return Ok(chunk.text.clone());
        }

        let scores = scorer.score_against(&sentences, query)?;
        let mut top = super::ranker::top_indices(&scores, self.top_sentences.min(sentences.len()));
        top.sort_unstable();

        debug!(
            document = %chunk.document,
            kept = top.len(),
            total = sentences.len(),
            "refined summary paragraph"
        );

        Ok(top
            .iter()
            .map(|&i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentText, PageText};

    struct UniformScorer;

    impl RelevanceScorer for UniformScorer {
        fn score_against(&self, texts: &[String], _query: &[f32]) -> Result<Vec<f32>, ModelError> {
            Ok(vec![1.0; texts.len()])
        }
    }

    fn chunk(document: &str, page: u32, text: &str, seq: u32) -> Chunk {
        let doc = DocumentText::new(
            document,
            vec![PageText {
                page_number: page,
                text: text.to_string(),
            }],
        );
        Chunk::new(&doc, page, seq, text.to_string())
    }

    fn summarizer(max_words: usize) -> CohesiveSummarizer {
        CohesiveSummarizer::new(&SummaryConfig::default()).with_max_words(max_words)
    }

    #[test]
    fn test_build_keeps_document_flow() {
        let chunks = vec![
            chunk("b.pdf", 1, "Content from document b here", 0),
            chunk("a.pdf", 1, "Content from document a here", 0),
        ];
        let scores = vec![0.9, 0.1];
        let order = vec!["a.pdf".to_string(), "b.pdf".to_string()];

        let summary = summarizer(500)
            .build(&chunks, &scores, &order, &[1.0], &UniformScorer)
            .unwrap();

        // Document order wins over score order
        let a_pos = summary.find("document a").unwrap();
        let b_pos = summary.find("document b").unwrap();
        assert!(a_pos < b_pos);
    }

    #[test]
    fn test_build_orders_pages_within_document() {
        let chunks = vec![
            chunk("a.pdf", 2, "Second page content here", 0),
            chunk("a.pdf", 1, "First page content here", 1),
        ];
        let scores = vec![0.9, 0.1];
        let order = vec!["a.pdf".to_string()];

        let summary = summarizer(500)
            .build(&chunks, &scores, &order, &[1.0], &UniformScorer)
            .unwrap();

        assert!(summary.find("First page").unwrap() < summary.find("Second page").unwrap());
    }

    #[test]
    fn test_build_respects_word_budget() {
        let chunks = vec![
            chunk("a.pdf", 1, "one two three four five six seven eight", 0),
            chunk("a.pdf", 2, "nine ten eleven twelve thirteen fourteen fifteen sixteen", 1),
        ];
        let scores = vec![0.9, 0.8];
        let order = vec!["a.pdf".to_string()];

        let summary = summarizer(8)
            .build(&chunks, &scores, &order, &[1.0], &UniformScorer)
            .unwrap();

        assert_eq!(word_count(&summary), 8);
        assert!(!summary.contains("nine"));
    }

    #[test]
    fn test_build_partial_fill_needs_min_tail() {
        let first: String = (0..495).map(|i| format!("w{i} ")).collect();
        let chunks = vec![
            chunk("a.pdf", 1, first.trim(), 0),
            chunk("a.pdf", 2, "tail words that will not fit in remaining budget", 1),
        ];
        let scores = vec![0.9, 0.8];
        let order = vec!["a.pdf".to_string()];

        let summary = summarizer(500)
            .build(&chunks, &scores, &order, &[1.0], &UniformScorer)
            .unwrap();

        // Only 5 words of budget remain (< 20), so no partial fill
        assert_eq!(word_count(&summary), 495);
        assert!(!summary.contains("tail"));
    }

    #[test]
    fn test_build_truncated_summary_ends_with_ellipsis() {
        let chunks = vec![
            chunk("a.pdf", 1, "first paragraph with several words inside", 0),
            chunk("a.pdf", 2, &"filler ".repeat(80), 1),
        ];
        let scores = vec![0.9, 0.8];
        let order = vec!["a.pdf".to_string()];

        let summary = summarizer(40)
            .build(&chunks, &scores, &order, &[1.0], &UniformScorer)
            .unwrap();

        assert!(summary.ends_with("..."));
        assert!(word_count(&summary) <= 40);
    }

    #[test]
    fn test_build_empty_chunks() {
        let summary = summarizer(500)
            .build(&[], &[], &["a.pdf".to_string()], &[1.0], &UniformScorer)
            .unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_refine_chunk_keeps_sentence_order() {
        struct LengthScorer;
        impl RelevanceScorer for LengthScorer {
            fn score_against(
                &self,
                texts: &[String],
                _query: &[f32],
            ) -> Result<Vec<f32>, ModelError> {
                Ok(texts.iter().map(|t| t.len() as f32).collect())
            }
        }

        let text = "Alpha is first. This considerably longer sentence ranks highest of all. Beta is second longest here. Tiny end.";
        let c = chunk("a.pdf", 1, text, 0);
        let s = CohesiveSummarizer::new(&SummaryConfig::default());

        let refined = s.refine_chunk(&c, &[1.0], &LengthScorer).unwrap();
        // Top 3 by length, rejoined in original order
        assert_eq!(
            refined,
            "Alpha is first. This considerably longer sentence ranks highest of all. Beta is second longest here."
        );
    }
}
