mod chunker;
mod embedder;
mod extractor;
mod pipeline;
mod ranker;
mod summarizer;

pub use chunker::ParagraphChunker;
pub use embedder::{Embedder, RelevanceScorer};
pub use extractor::PdfExtractor;
pub use pipeline::{elapsed_seconds, embed_chunks, input_documents};
pub use ranker::{
    RankedChunk, SectionRanker, score_chunks, similarity, structured_query, summary_query,
    top_indices,
};
pub use summarizer::CohesiveSummarizer;
