//! Relevance ranking: query synthesis, chunk scoring, sentence refinement.

use tracing::{debug, info};

use crate::error::ModelError;
use crate::models::{Chunk, ExtractedSection, Persona, RankingConfig, SubsectionAnalysis};
use crate::services::RelevanceScorer;
use crate::utils::{section_title, split_sentences};

/// Words of a chunk used as its section title.
const TITLE_WORDS: usize = 10;

/// Synthesize the structured-analysis query from persona and job.
/// Library personas contribute their keywords as a focus line.
pub fn structured_query(persona: &Persona, job: &str) -> String {
    let mut query = format!("Role: {}\nTask: {}", persona.name, job);
    if !persona.keywords.is_empty() {
        query.push_str(&format!("\nFocus: {}", persona.keywords.join(", ")));
    }
    query
}

/// Synthesize the cohesive-summary query from persona and job.
pub fn summary_query(persona: &Persona, job: &str) -> String {
    let mut query = format!(
        "As a {}, I need to {}. Key focus areas and insights:",
        persona.name, job
    );
    if !persona.keywords.is_empty() {
        query.push_str(&format!(" {}", persona.keywords.join(", ")));
    }
    query
}

/// Dot product. Inputs are L2-normalized, so this is cosine similarity.
pub fn similarity(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Score every chunk's embedding against the query vector.
pub fn score_chunks(chunks: &[Chunk], query: &[f32]) -> Vec<f32> {
    chunks
        .iter()
        .map(|chunk| similarity(&chunk.embedding, query))
        .collect()
}

/// Indices of the top `k` scores, descending. The sort is stable: ties
/// keep the earlier chunk first, preserving import order.
pub fn top_indices(scores: &[f32], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(k);
    indices
}

/// A chunk selected by rank, with its relevance score.
#[derive(Debug, Clone, Copy)]
pub struct RankedChunk {
    pub index: usize,
    pub score: f32,
}

/// Selects top chunks and refines them to their best sentences.
#[derive(Debug)]
pub struct SectionRanker {
    top_sections: usize,
    top_sentences: usize,
}

impl SectionRanker {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            top_sections: config.top_sections as usize,
            top_sentences: config.top_sentences as usize,
        }
    }

    pub fn with_top_sections(mut self, top_sections: usize) -> Self {
        self.top_sections = top_sections;
        self
    }

    /// Select the top chunks by score. The result length never exceeds
    /// the configured section count or the number of chunks.
    pub fn rank(&self, scores: &[f32]) -> Vec<RankedChunk> {
        let k = self.top_sections.min(scores.len());
        let ranked: Vec<RankedChunk> = top_indices(scores, k)
            .into_iter()
            .map(|index| RankedChunk {
                index,
                score: scores[index],
            })
            .collect();

        info!(selected = ranked.len(), total = scores.len(), "ranked chunks");
        ranked
    }

    /// Refine ranked chunks to their most relevant sentences and build
    /// the report sections.
    pub fn refine(
        &self,
        chunks: &[Chunk],
        ranked: &[RankedChunk],
        query: &[f32],
        scorer: &dyn RelevanceScorer,
    ) -> Result<(Vec<ExtractedSection>, Vec<SubsectionAnalysis>), ModelError> {
        let mut sections = Vec::with_capacity(ranked.len());
        let mut subsections = Vec::with_capacity(ranked.len());

        for (rank, selected) in ranked.iter().enumerate() {
            let chunk = &chunks[selected.index];
            let sentences = split_sentences(&chunk.text);
            if sentences.is_empty() {
                continue;
            }

            let scores = scorer.score_against(&sentences, query)?;
            let top = top_indices(&scores, self.top_sentences);
            let refined_text = top
                .iter()
                .map(|&i| sentences[i].as_str())
                .collect::<Vec<_>>()
                .join(" ");

            debug!(
                document = %chunk.document,
                page = chunk.page_number,
                score = selected.score,
                sentences = top.len(),
                "refined section"
            );

            let title = section_title(&chunk.text, TITLE_WORDS);
            sections.push(ExtractedSection {
                document: chunk.document.clone(),
                page_number: chunk.page_number,
                section_title: title.clone(),
                importance_rank: rank + 1,
            });
            subsections.push(SubsectionAnalysis {
                document: chunk.document.clone(),
                section_title: title,
                refined_text,
                page_number: chunk.page_number,
            });
        }

        Ok((sections, subsections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentText, PageText};

    struct StubScorer;

    impl RelevanceScorer for StubScorer {
        fn score_against(&self, texts: &[String], _query: &[f32]) -> Result<Vec<f32>, ModelError> {
            // Longer sentences score higher
            Ok(texts.iter().map(|t| t.len() as f32).collect())
        }
    }

    fn chunk_with(text: &str, page: u32, embedding: Vec<f32>) -> Chunk {
        let doc = DocumentText::new(
            "doc.pdf",
            vec![PageText {
                page_number: page,
                text: text.to_string(),
            }],
        );
        let mut chunk = Chunk::new(&doc, page, 0, text.to_string());
        chunk.embedding = embedding;
        chunk
    }

    #[test]
    fn test_structured_query_freeform() {
        let persona = Persona::freeform("Investment Analyst");
        assert_eq!(
            structured_query(&persona, "Analyze revenue trends"),
            "Role: Investment Analyst\nTask: Analyze revenue trends"
        );
    }

    #[test]
    fn test_structured_query_with_keywords() {
        let persona = Persona {
            name: "Investment Analyst".to_string(),
            keywords: vec!["revenue".to_string(), "growth".to_string()],
        };
        let query = structured_query(&persona, "Analyze revenue trends");
        assert!(query.ends_with("Focus: revenue, growth"));
    }

    #[test]
    fn test_summary_query() {
        let persona = Persona::freeform("Analyst");
        let query = summary_query(&persona, "review filings");
        assert_eq!(
            query,
            "As a Analyst, I need to review filings. Key focus areas and insights:"
        );
    }

    #[test]
    fn test_similarity() {
        assert!((similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((similarity(&[0.6, 0.8], &[0.6, 0.8]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_top_indices_descending() {
        let scores = [0.1, 0.9, 0.5, 0.7];
        assert_eq!(top_indices(&scores, 3), vec![1, 3, 2]);
    }

    #[test]
    fn test_top_indices_ties_keep_import_order() {
        let scores = [0.5, 0.5, 0.9];
        assert_eq!(top_indices(&scores, 3), vec![2, 0, 1]);
    }

    #[test]
    fn test_top_indices_k_larger_than_input() {
        let scores = [0.2, 0.4];
        assert_eq!(top_indices(&scores, 10), vec![1, 0]);
    }

    #[test]
    fn test_rank_caps_at_top_sections() {
        let ranker = SectionRanker::new(&RankingConfig::default());
        let scores: Vec<f32> = (0..20).map(|i| i as f32 / 20.0).collect();
        let ranked = ranker.rank(&scores);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].index, 19);
        assert!(ranked[0].score >= ranked[4].score);
    }

    #[test]
    fn test_rank_fewer_chunks_than_sections() {
        let ranker = SectionRanker::new(&RankingConfig::default());
        let ranked = ranker.rank(&[0.3, 0.8]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 1);
    }

    #[test]
    fn test_refine_selects_top_sentences() {
        let text = "Short one. This sentence is noticeably longer than the others here. Mid sized sentence.";
        let chunks = vec![chunk_with(text, 2, vec![1.0])];
        let ranked = vec![RankedChunk { index: 0, score: 0.9 }];

        let ranker = SectionRanker::new(&RankingConfig::default());
        let (sections, subsections) = ranker
            .refine(&chunks, &ranked, &[1.0], &StubScorer)
            .unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].importance_rank, 1);
        assert_eq!(sections[0].page_number, 2);
        assert_eq!(
            sections[0].section_title,
            "Short one. This sentence is noticeably longer than the others"
        );
        // Two longest sentences, best first
        assert_eq!(
            subsections[0].refined_text,
            "This sentence is noticeably longer than the others here. Mid sized sentence."
        );
    }

    #[test]
    fn test_refine_empty_ranked() {
        let ranker = SectionRanker::new(&RankingConfig::default());
        let (sections, subsections) = ranker.refine(&[], &[], &[1.0], &StubScorer).unwrap();
        assert!(sections.is_empty());
        assert!(subsections.is_empty());
    }
}
