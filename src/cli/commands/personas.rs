//! Persona library listing commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat, PersonaLibrary};

#[derive(Debug, Args)]
pub struct LibraryArgs {
    #[arg(
        long,
        env = "DOCINTEL_PERSONAS",
        value_name = "FILE",
        help = "Path to a persona library JSON file"
    )]
    pub personas: Option<PathBuf>,
}

fn load_library(args: &LibraryArgs) -> PersonaLibrary {
    let path = args.personas.clone().or_else(Config::personas_path);
    PersonaLibrary::load_or_default(path.as_deref())
}

pub async fn handle_personas(args: LibraryArgs, format: OutputFormat, _verbose: bool) -> Result<()> {
    let formatter = get_formatter(format);
    let library = load_library(&args);
    print!("{}", formatter.format_personas(&library));
    Ok(())
}

pub async fn handle_jobs(args: LibraryArgs, format: OutputFormat, _verbose: bool) -> Result<()> {
    let formatter = get_formatter(format);
    let library = load_library(&args);
    print!("{}", formatter.format_jobs(&library));
    Ok(())
}
