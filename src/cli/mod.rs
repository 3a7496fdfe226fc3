//! CLI module for the document intelligence CLI.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::models::OutputFormat;

/// Persona-driven document intelligence for local PDF collections.
#[derive(Debug, Parser)]
#[command(name = "docintel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        long,
        short = 'f',
        global = true,
        help = "Output format: text, json, or markdown"
    )]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a directory of PDFs for a persona and job
    Analyze(commands::AnalyzeArgs),

    /// Process a structured challenge JSON input
    Batch(commands::BatchArgs),

    /// List personas from the persona library
    Personas(commands::LibraryArgs),

    /// List sample job descriptions from the persona library
    Jobs(commands::LibraryArgs),

    /// Show model and configuration status
    Status,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}
