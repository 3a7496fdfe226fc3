//! Report models: the JSON output schemas and the batch input schema.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, ReportError};

/// Timestamp format used in report metadata.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Current UTC timestamp in report format.
pub fn utc_timestamp() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// Machine-parseable JSON format
    Json,
    /// Documentation-friendly Markdown format
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Metadata block of the structured report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
    pub processing_time_seconds: f64,
    pub total_chunks_processed: usize,
    pub top_chunks_selected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One ranked section reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    /// 1-based importance rank.
    pub importance_rank: usize,
}

/// Sentence-level refinement of one ranked section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub section_title: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Structured analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl AnalysisReport {
    /// Empty result when no documents could be processed.
    pub fn empty(persona: &str, job: &str, error: &str) -> Self {
        Self {
            metadata: ReportMetadata {
                input_documents: Vec::new(),
                persona: persona.to_string(),
                job_to_be_done: job.to_string(),
                processing_timestamp: utc_timestamp(),
                processing_time_seconds: 0.0,
                total_chunks_processed: 0,
                top_chunks_selected: 0,
                error: Some(error.to_string()),
            },
            extracted_sections: Vec::new(),
            subsection_analysis: Vec::new(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        write_json(self, path)
    }
}

/// Metadata block of the cohesive summary output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
    pub processing_time_seconds: f64,
    pub summary_word_count: usize,
    pub total_content_chunks: usize,
    pub approach: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Cohesive summary output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub metadata: SummaryMetadata,
    pub cohesive_summary: String,
}

impl SummaryReport {
    pub fn empty(persona: &str, job: &str, error: &str) -> Self {
        Self {
            metadata: SummaryMetadata {
                input_documents: Vec::new(),
                persona: persona.to_string(),
                job_to_be_done: job.to_string(),
                processing_timestamp: utc_timestamp(),
                processing_time_seconds: 0.0,
                summary_word_count: 0,
                total_content_chunks: 0,
                approach: "cohesive_summary".to_string(),
                error: Some(error.to_string()),
            },
            cohesive_summary: "No relevant content found in the provided documents.".to_string(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        write_json(self, path)
    }
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

/// Structured batch input.
#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeInput {
    pub challenge_info: ChallengeInfo,
    pub documents: Vec<DocumentSpec>,
    pub persona: PersonaSpec,
    pub job_to_be_done: JobSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeInfo {
    #[serde(default)]
    pub challenge_id: Option<String>,
    #[serde(default)]
    pub test_case_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSpec {
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonaSpec {
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    pub task: String,
}

impl ChallengeInput {
    /// Structural validation beyond what serde enforces.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.documents.is_empty() {
            return Err(BatchError::ValidationError(
                "documents must be a non-empty list".to_string(),
            ));
        }
        if self.documents.iter().any(|d| d.filename.trim().is_empty()) {
            return Err(BatchError::ValidationError(
                "each document must have a filename".to_string(),
            ));
        }
        if self.persona.role.trim().is_empty() {
            return Err(BatchError::ValidationError(
                "persona role cannot be empty".to_string(),
            ));
        }
        if self.job_to_be_done.task.trim().is_empty() {
            return Err(BatchError::ValidationError(
                "job task cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
