mod config;
mod document;
mod persona;
mod report;

pub use config::{
    Config, DEFAULT_EMBEDDING_DIMENSION, DEFAULT_MODEL_DIR_NAME, EmbeddingConfig,
    ExtractionConfig, OutputConfig, RankingConfig, SummaryConfig,
};
pub use document::{Chunk, DocumentText, PageText};
pub use persona::{Persona, PersonaLibrary};
pub use report::{
    AnalysisReport, ChallengeInput, DocumentSpec, ExtractedSection, OutputFormat, ReportMetadata,
    SubsectionAnalysis, SummaryMetadata, SummaryReport, utc_timestamp,
};
