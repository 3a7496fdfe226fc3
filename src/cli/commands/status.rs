use anyhow::Result;

use crate::cli::output::{StatusInfo, get_formatter};
use crate::models::{Config, OutputFormat};

pub async fn handle_status(format: OutputFormat, _verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let model_dir = config.model_dir();
    let (model_found, tokenizer_found) = model_dir
        .as_ref()
        .map(|dir| (dir.join("model.onnx").exists(), dir.join("tokenizer.json").exists()))
        .unwrap_or((false, false));

    let config_path = Config::config_path();
    let personas_path = Config::personas_path();

    let status = StatusInfo {
        model_dir: model_dir.map(|p| p.to_string_lossy().to_string()),
        model_found,
        tokenizer_found,
        dimension: config.embedding.dimension,
        batch_size: config.embedding.batch_size,
        config_present: config_path.as_ref().is_some_and(|p| p.exists()),
        config_path: config_path.map(|p| p.to_string_lossy().to_string()),
        personas_present: personas_path.as_ref().is_some_and(|p| p.exists()),
        personas_path: personas_path.map(|p| p.to_string_lossy().to_string()),
    };

    print!("{}", formatter.format_status(&status));

    Ok(())
}
