use std::fmt::Write as FmtWrite;

use console::style;

use crate::models::{AnalysisReport, OutputFormat, PersonaLibrary, SummaryReport};

/// Maximum characters of refined text shown in text previews.
const PREVIEW_CHARS: usize = 200;

/// Keywords shown per persona in listings.
const LISTED_KEYWORDS: usize = 5;

pub trait Formatter {
    fn format_report(&self, report: &AnalysisReport) -> String;
    fn format_summary(&self, report: &SummaryReport) -> String;
    fn format_personas(&self, library: &PersonaLibrary) -> String;
    fn format_jobs(&self, library: &PersonaLibrary) -> String;
    fn format_status(&self, status: &StatusInfo) -> String;
    fn format_message(&self, message: &str) -> String;
    fn format_error(&self, error: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub model_dir: Option<String>,
    pub model_found: bool,
    pub tokenizer_found: bool,
    pub dimension: u32,
    pub batch_size: u32,
    pub config_path: Option<String>,
    pub config_present: bool,
    pub personas_path: Option<String>,
    pub personas_present: bool,
}

pub struct TextFormatter;

impl TextFormatter {
    fn preview(text: &str) -> String {
        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        if text.chars().count() > PREVIEW_CHARS {
            format!("{}...", preview)
        } else {
            preview
        }
    }
}

impl Formatter for TextFormatter {
    fn format_report(&self, report: &AnalysisReport) -> String {
        let mut output = String::new();
        let meta = &report.metadata;

        writeln!(output, "{}", style("Processing Complete").bold()).unwrap();
        writeln!(output, "-------------------").unwrap();
        writeln!(output, "Documents processed: {}", meta.input_documents.len()).unwrap();
        writeln!(output, "Chunks analyzed: {}", meta.total_chunks_processed).unwrap();
        writeln!(output, "Processing time: {}s", meta.processing_time_seconds).unwrap();
        if let Some(ref error) = meta.error {
            writeln!(output, "{}", style(format!("Note: {}", error)).yellow()).unwrap();
        }

        if report.extracted_sections.is_empty() {
            writeln!(output, "\nNo relevant sections found.").unwrap();
            return output;
        }

        writeln!(output).unwrap();
        writeln!(
            output,
            "{}",
            style(format!(
                "Top {} Relevant Sections",
                report.extracted_sections.len()
            ))
            .bold()
        )
        .unwrap();
        writeln!(output, "------------------------").unwrap();

        for section in &report.extracted_sections {
            writeln!(
                output,
                "{}. {} (page {})",
                section.importance_rank, section.document, section.page_number
            )
            .unwrap();
            writeln!(output, "   {}", section.section_title).unwrap();

            if let Some(analysis) = report
                .subsection_analysis
                .iter()
                .find(|a| a.section_title == section.section_title && a.document == section.document)
            {
                for line in Self::preview(&analysis.refined_text).lines() {
                    writeln!(output, "   > {}", line).unwrap();
                }
            }
            writeln!(output).unwrap();
        }

        output
    }

    fn format_summary(&self, report: &SummaryReport) -> String {
        let mut output = String::new();
        let meta = &report.metadata;

        writeln!(output, "{}", style("Cohesive Summary").bold()).unwrap();
        writeln!(output, "----------------").unwrap();
        writeln!(output, "Documents processed: {}", meta.input_documents.len()).unwrap();
        writeln!(output, "Word count: {}", meta.summary_word_count).unwrap();
        writeln!(output, "Content chunks: {}", meta.total_content_chunks).unwrap();
        writeln!(output, "Processing time: {}s", meta.processing_time_seconds).unwrap();
        if let Some(ref error) = meta.error {
            writeln!(output, "{}", style(format!("Note: {}", error)).yellow()).unwrap();
        }
        writeln!(output).unwrap();
        writeln!(output, "{}", report.cohesive_summary).unwrap();

        output
    }

    fn format_personas(&self, library: &PersonaLibrary) -> String {
        if library.personas.is_empty() {
            return "No personas available.\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "{}", style("Available Personas").bold()).unwrap();
        writeln!(output, "------------------").unwrap();
        for (key, persona) in &library.personas {
            writeln!(output, "  {}: {}", key, persona.name).unwrap();
            if !persona.keywords.is_empty() {
                let shown: Vec<&str> = persona
                    .keywords
                    .iter()
                    .take(LISTED_KEYWORDS)
                    .map(String::as_str)
                    .collect();
                let suffix = if persona.keywords.len() > LISTED_KEYWORDS {
                    ", ..."
                } else {
                    ""
                };
                writeln!(output, "    Keywords: {}{}", shown.join(", "), suffix).unwrap();
            }
        }
        output
    }

    fn format_jobs(&self, library: &PersonaLibrary) -> String {
        if library.sample_jobs.is_empty() {
            return "No sample jobs available.\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "{}", style("Sample Jobs").bold()).unwrap();
        writeln!(output, "-----------").unwrap();
        for (key, job) in &library.sample_jobs {
            writeln!(output, "  {}: {}", key, job).unwrap();
        }
        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "Status").unwrap();
        writeln!(output, "------").unwrap();

        let model_status = if status.model_found && status.tokenizer_found {
            "[READY]"
        } else {
            "[MISSING]"
        };
        writeln!(output, "Embedding model: {}", model_status).unwrap();
        if let Some(ref dir) = status.model_dir {
            writeln!(output, "  Directory:   {}", dir).unwrap();
        }
        writeln!(
            output,
            "  model.onnx:  {}",
            if status.model_found { "found" } else { "missing" }
        )
        .unwrap();
        writeln!(
            output,
            "  tokenizer:   {}",
            if status.tokenizer_found { "found" } else { "missing" }
        )
        .unwrap();
        writeln!(output, "  Dimension:   {}", status.dimension).unwrap();
        writeln!(output, "  Batch size:  {}", status.batch_size).unwrap();
        writeln!(output).unwrap();

        if let Some(ref path) = status.config_path {
            let state = if status.config_present { "" } else { " (defaults)" };
            writeln!(output, "Config:   {}{}", path, state).unwrap();
        }
        if let Some(ref path) = status.personas_path {
            let state = if status.personas_present { "" } else { " (built-in)" };
            writeln!(output, "Personas: {}{}", path, state).unwrap();
        }

        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}\n", error)
    }
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }
}

impl Formatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> String {
        self.render(report)
    }

    fn format_summary(&self, report: &SummaryReport) -> String {
        self.render(report)
    }

    fn format_personas(&self, library: &PersonaLibrary) -> String {
        self.render(&serde_json::json!({"personas": library.personas}))
    }

    fn format_jobs(&self, library: &PersonaLibrary) -> String {
        self.render(&serde_json::json!({"sample_jobs": library.sample_jobs}))
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        self.render(&serde_json::json!({
            "model": {
                "dir": status.model_dir,
                "model_found": status.model_found,
                "tokenizer_found": status.tokenizer_found,
                "dimension": status.dimension,
                "batch_size": status.batch_size,
            },
            "config": {
                "path": status.config_path,
                "present": status.config_present,
            },
            "personas": {
                "path": status.personas_path,
                "present": status.personas_present,
            }
        }))
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({"message": message}).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({"error": error}).to_string()
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> String {
        let mut output = String::new();
        let meta = &report.metadata;

        writeln!(output, "## Document Analysis\n").unwrap();
        writeln!(output, "**Persona:** {}\n", meta.persona).unwrap();
        writeln!(output, "**Job:** {}\n", meta.job_to_be_done).unwrap();
        writeln!(
            output,
            "Processed {} chunks from {} documents in {}s\n",
            meta.total_chunks_processed,
            meta.input_documents.len(),
            meta.processing_time_seconds
        )
        .unwrap();

        if report.extracted_sections.is_empty() {
            writeln!(output, "*No relevant sections found.*\n").unwrap();
            return output;
        }

        writeln!(output, "| Rank | Document | Page | Section |").unwrap();
        writeln!(output, "|------|----------|------|---------|").unwrap();
        for section in &report.extracted_sections {
            writeln!(
                output,
                "| {} | `{}` | {} | {} |",
                section.importance_rank,
                section.document,
                section.page_number,
                section.section_title
            )
            .unwrap();
        }
        writeln!(output).unwrap();

        for analysis in &report.subsection_analysis {
            writeln!(
                output,
                "### {} (page {})\n",
                analysis.document, analysis.page_number
            )
            .unwrap();
            writeln!(output, "> {}\n", analysis.refined_text).unwrap();
        }

        output
    }

    fn format_summary(&self, report: &SummaryReport) -> String {
        let mut output = String::new();
        let meta = &report.metadata;

        writeln!(output, "## Cohesive Summary\n").unwrap();
        writeln!(output, "**Persona:** {}\n", meta.persona).unwrap();
        writeln!(output, "**Job:** {}\n", meta.job_to_be_done).unwrap();
        writeln!(
            output,
            "{} words from {} content chunks\n",
            meta.summary_word_count, meta.total_content_chunks
        )
        .unwrap();
        writeln!(output, "{}\n", report.cohesive_summary).unwrap();
        output
    }

    fn format_personas(&self, library: &PersonaLibrary) -> String {
        if library.personas.is_empty() {
            return "## Personas\n\n*None available.*\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "## Personas\n").unwrap();
        writeln!(output, "| Key | Name | Keywords |").unwrap();
        writeln!(output, "|-----|------|----------|").unwrap();
        for (key, persona) in &library.personas {
            writeln!(
                output,
                "| `{}` | {} | {} |",
                key,
                persona.name,
                persona.keywords.join(", ")
            )
            .unwrap();
        }
        output
    }

    fn format_jobs(&self, library: &PersonaLibrary) -> String {
        if library.sample_jobs.is_empty() {
            return "## Sample Jobs\n\n*None available.*\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "## Sample Jobs\n").unwrap();
        for (key, job) in &library.sample_jobs {
            writeln!(output, "- **{}**: {}", key, job).unwrap();
        }
        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "## Status\n").unwrap();

        let model_status = if status.model_found && status.tokenizer_found {
            "✅"
        } else {
            "❌"
        };
        writeln!(output, "### Embedding Model {}\n", model_status).unwrap();
        if let Some(ref dir) = status.model_dir {
            writeln!(output, "- **Directory:** `{}`", dir).unwrap();
        }
        writeln!(output, "- **Dimension:** {}", status.dimension).unwrap();
        writeln!(output, "- **Batch size:** {}", status.batch_size).unwrap();

        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("> {}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("> ⚠️ **Error:** {}\n", error)
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtractedSection, ReportMetadata, SubsectionAnalysis};

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            metadata: ReportMetadata {
                input_documents: vec!["a.pdf".to_string()],
                persona: "Analyst".to_string(),
                job_to_be_done: "Review".to_string(),
                processing_timestamp: "2025-01-01T00:00:00Z".to_string(),
                processing_time_seconds: 1.25,
                total_chunks_processed: 12,
                top_chunks_selected: 1,
                error: None,
            },
            extracted_sections: vec![ExtractedSection {
                document: "a.pdf".to_string(),
                page_number: 2,
                section_title: "Revenue grew strongly".to_string(),
                importance_rank: 1,
            }],
            subsection_analysis: vec![SubsectionAnalysis {
                document: "a.pdf".to_string(),
                section_title: "Revenue grew strongly".to_string(),
                refined_text: "Revenue grew 20% year over year.".to_string(),
                page_number: 2,
            }],
        }
    }

    #[test]
    fn test_text_format_report() {
        let output = TextFormatter.format_report(&sample_report());
        assert!(output.contains("a.pdf (page 2)"));
        assert!(output.contains("Revenue grew strongly"));
        assert!(output.contains("Chunks analyzed: 12"));
    }

    #[test]
    fn test_text_format_empty_report() {
        let report = AnalysisReport::empty("Analyst", "Review", "no documents");
        let output = TextFormatter.format_report(&report);
        assert!(output.contains("No relevant sections found."));
    }

    #[test]
    fn test_json_format_report_round_trips() {
        let output = JsonFormatter::new(true).format_report(&sample_report());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["extracted_sections"][0]["importance_rank"], 1);
        assert_eq!(parsed["metadata"]["persona"], "Analyst");
    }

    #[test]
    fn test_markdown_format_report() {
        let output = MarkdownFormatter.format_report(&sample_report());
        assert!(output.contains("| 1 | `a.pdf` | 2 |"));
        assert!(output.contains("> Revenue grew 20% year over year."));
    }

    #[test]
    fn test_text_format_personas_truncates_keywords() {
        let library = PersonaLibrary::builtin();
        let output = TextFormatter.format_personas(&library);
        assert!(output.contains("investment_analyst: Investment Analyst"));
        assert!(output.contains(", ..."));
    }
}
