//! Analyze command implementation.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cli::output::get_formatter;
use crate::error::ExtractError;
use crate::models::{
    AnalysisReport, Config, OutputFormat, PersonaLibrary, ReportMetadata, SummaryMetadata,
    SummaryReport, utc_timestamp,
};
use crate::services::{
    CohesiveSummarizer, Embedder, ParagraphChunker, PdfExtractor, SectionRanker, elapsed_seconds,
    embed_chunks, input_documents, score_chunks, structured_query, summary_query,
};
use crate::utils::word_count;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory containing PDF files to process"
    )]
    pub pdf_dir: PathBuf,

    #[arg(long, help = "Target persona (library key or free-form role)")]
    pub persona: String,

    #[arg(long, help = "Job to be done")]
    pub job: String,

    #[arg(
        long,
        short = 'o',
        default_value = "output.json",
        help = "Output JSON file path"
    )]
    pub output: PathBuf,

    #[arg(long, help = "Number of top sections to extract")]
    pub top_sections: Option<u32>,

    #[arg(
        long,
        help = "Generate a cohesive summary instead of a structured report"
    )]
    pub cohesive: bool,

    #[arg(long, help = "Maximum words in the cohesive summary")]
    pub max_words: Option<u32>,

    #[arg(
        long,
        env = "DOCINTEL_PERSONAS",
        value_name = "FILE",
        help = "Path to a persona library JSON file"
    )]
    pub personas: Option<PathBuf>,
}

pub async fn handle_analyze(args: AnalyzeArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let persona_input = args.persona.trim();
    if persona_input.is_empty() {
        anyhow::bail!("persona cannot be empty");
    }
    let job = args.job.trim();
    if job.is_empty() {
        anyhow::bail!("job description cannot be empty");
    }

    let config = Config::load()?;
    let formatter = get_formatter(format);
    let start_time = Instant::now();

    let personas_path = args.personas.clone().or_else(Config::personas_path);
    let library = PersonaLibrary::load_or_default(personas_path.as_deref());
    let persona = library.resolve(persona_input);

    info!(persona = %persona.name, job, pdf_dir = %args.pdf_dir.display(), "starting analysis");

    let extractor = PdfExtractor::new(&config.extraction);
    let files = extractor.collect_pdf_files(&args.pdf_dir)?;
    if files.is_empty() {
        return Err(ExtractError::NoPdfFound(args.pdf_dir.display().to_string()).into());
    }
    let documents = extractor.extract_files(&files);

    let chunker = ParagraphChunker::new(&config.extraction);
    let mut chunks = if args.cohesive {
        chunker.chunk_documents_for_summary(&documents)
    } else {
        chunker.chunk_documents(&documents)
    };

    if chunks.is_empty() {
        return write_empty_result(&args, format, job, &persona.name);
    }

    info!(
        chunks = chunks.len(),
        documents = documents.len(),
        "extracted text chunks"
    );

    let model_dir = config
        .model_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine model directory"))?;
    let embedder =
        Embedder::load(&config.embedding, &model_dir).context("failed to load embedding model")?;

    let query = if args.cohesive {
        summary_query(&persona, job)
    } else {
        structured_query(&persona, job)
    };
    if verbose {
        eprintln!("Query: {:?}", query);
    }

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

    if args.cohesive {
        let summarizer = match args.max_words {
            Some(words) => CohesiveSummarizer::new(&config.summary).with_max_words(words as usize),
            None => CohesiveSummarizer::new(&config.summary),
        };
        let doc_order: Vec<String> = documents.iter().map(|d| d.filename.clone()).collect();
        let summary = summarizer.build(&chunks, &scores, &doc_order, &query_vec, &embedder)?;

        let report = SummaryReport {
            metadata: SummaryMetadata {
                input_documents: doc_order,
                persona: persona.name.clone(),
                job_to_be_done: job.to_string(),
                processing_timestamp: utc_timestamp(),
                processing_time_seconds: elapsed_seconds(start_time),
                summary_word_count: word_count(&summary),
                total_content_chunks: chunks.len(),
                approach: "cohesive_summary".to_string(),
                error: None,
            },
            cohesive_summary: summary,
        };
        report.save(&args.output).context("failed to save results")?;
        print!("{}", formatter.format_summary(&report));
    } else {
        let ranker = match args.top_sections {
            Some(count) => {
                SectionRanker::new(&config.ranking).with_top_sections(count as usize)
            }
            None => SectionRanker::new(&config.ranking),
        };
        let ranked = ranker.rank(&scores);
        let (extracted_sections, subsection_analysis) =
            ranker.refine(&chunks, &ranked, &query_vec, &embedder)?;

        let report = AnalysisReport {
            metadata: ReportMetadata {
                input_documents: input_documents(&chunks),
                persona: persona.name.clone(),
                job_to_be_done: job.to_string(),
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
    }

    println!(
        "{}",
        formatter.format_message(&format!("Results saved to: {}", args.output.display()))
    );

    Ok(())
}

/// Write and display the empty result when no chunks were extracted.
fn write_empty_result(
    args: &AnalyzeArgs,
    format: OutputFormat,
    job: &str,
    persona_name: &str,
) -> Result<()> {
    let formatter = get_formatter(format);

    if args.cohesive {
        let report = SummaryReport::empty(persona_name, job, "No valid PDF content found");
        report.save(&args.output).context("failed to save results")?;
        print!("{}", formatter.format_summary(&report));
    } else {
        let report = AnalysisReport::empty(persona_name, job, "No documents found or processed");
        report.save(&args.output).context("failed to save results")?;
        print!("{}", formatter.format_report(&report));
    }

    println!(
        "{}",
        formatter.format_message(&format!("Results saved to: {}", args.output.display()))
    );

    Ok(())
}
