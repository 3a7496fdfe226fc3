//! Batch command: structured challenge JSON in, standard report out.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::cli::output::get_formatter;
use crate::error::BatchError;
use crate::models::{
    AnalysisReport, ChallengeInput, Config, OutputFormat, Persona, ReportMetadata, utc_timestamp,
};
use crate::services::{
    Embedder, ParagraphChunker, PdfExtractor, SectionRanker, elapsed_seconds, embed_chunks,
    score_chunks, structured_query,
};

/// Section titles longer than this are truncated in batch output.
const MAX_TITLE_CHARS: usize = 80;

#[derive(Debug, Args)]
pub struct BatchArgs {
    #[arg(long, short = 'i', value_name = "FILE", help = "Input JSON file path")]
    pub input: PathBuf,

    #[arg(
        long,
        short = 'o',
        default_value = "output.json",
        help = "Output JSON file path"
    )]
    pub output: PathBuf,

    #[arg(
        long,
        short = 'd',
        default_value = "./input",
        value_name = "DIR",
        help = "Base directory containing the PDF files"
    )]
    pub documents_dir: PathBuf,
}

pub async fn handle_batch(args: BatchArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);
    let start_time = Instant::now();

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input JSON: {}", args.input.display()))?;
    let input: ChallengeInput =
        serde_json::from_str(&content).context("invalid input JSON structure")?;
    input.validate()?;

    let persona = Persona::freeform(input.persona.role.trim());
    let job = input.job_to_be_done.task.trim().to_string();
    let listed: Vec<String> = input.documents.iter().map(|d| d.filename.clone()).collect();

    info!(
        documents = listed.len(),
        persona = %persona.name,
        job = %job,
        "processing batch input"
    );

    // Resolve listed documents against the base directory
    let mut files = Vec::new();
    let mut missing = Vec::new();
    for filename in &listed {
        let path = args.documents_dir.join(filename);
        if path.exists() {
            files.push(path);
        } else {
            missing.push(filename.clone());
        }
    }
    if !missing.is_empty() {
        warn!(missing = ?missing, "listed documents not found");
    }
    if files.is_empty() {
        return Err(BatchError::NoDocuments(
            args.documents_dir.to_string_lossy().to_string(),
        )
        .into());
    }

    let extractor = PdfExtractor::new(&config.extraction);
    let documents = extractor.extract_files(&files);

    let chunker = ParagraphChunker::new(&config.extraction);
    let mut chunks = chunker.chunk_documents(&documents);
    if chunks.is_empty() {
        anyhow::bail!("no content extracted from the specified documents");
    }

    if verbose {
        eprintln!("Extracted {} chunks from {} documents", chunks.len(), documents.len());
    }

    let model_dir = config
        .model_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine model directory"))?;
    let embedder =
        Embedder::load(&config.embedding, &model_dir).context("failed to load embedding model")?;

    let query = structured_query(&persona, &job);
    let query_vec = embedder
        .embed_one(&query)
        .context("failed to embed query")?;

    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap()
            .progress_chars("#>-"),
    );
    embed_chunks(&embedder, &mut chunks, |done| pb.inc(done as u64))
        .context("failed to embed chunks")?;
    pb.finish_and_clear();

    let scores = score_chunks(&chunks, &query_vec);
    let ranker = SectionRanker::new(&config.ranking);
    let ranked = ranker.rank(&scores);
    let (mut extracted_sections, mut subsection_analysis) =
        ranker.refine(&chunks, &ranked, &query_vec, &embedder)?;

    for section in &mut extracted_sections {
        section.section_title = clean_section_title(&section.section_title);
    }
    for analysis in &mut subsection_analysis {
        analysis.section_title = clean_section_title(&analysis.section_title);
    }

    let report = AnalysisReport {
        metadata: ReportMetadata {
            input_documents: listed,
            persona: persona.name.clone(),
            job_to_be_done: job,
            processing_timestamp: utc_timestamp(),
            processing_time_seconds: elapsed_seconds(start_time),
            total_chunks_processed: chunks.len(),
            top_chunks_selected: ranked.len(),
            error: None,
        },
        extracted_sections,
        subsection_analysis,
    };

    report.save(&args.output).context("failed to save results")?;
    print!("{}", formatter.format_report(&report));
    println!(
        "{}",
        formatter.format_message(&format!("Results saved to: {}", args.output.display()))
    );

    Ok(())
}

/// Make section titles presentable: truncate long ones, reduce bullet
/// fragments to the text before the first colon.
fn clean_section_title(title: &str) -> String {
    let title = title.trim();
    if title.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
        format!("{}...", truncated)
    } else if let Some(stripped) = title.strip_prefix('•') {
        stripped
            .split(':')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    } else {
        title.to_string()
    }
}
