use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::report::OutputFormat;

pub const DEFAULT_MODEL_DIR_NAME: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_EMBEDDING_DIMENSION: u32 = 384;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub summary: SummaryConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("docintel").join("config.toml"))
    }

    /// Default location of the persona library JSON.
    pub fn personas_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("docintel").join("personas.json"))
    }

    /// Default model directory under the user data dir.
    pub fn default_model_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("docintel").join("models").join(DEFAULT_MODEL_DIR_NAME))
    }

    /// Resolve the model directory: explicit config wins, then the default.
    pub fn model_dir(&self) -> Option<PathBuf> {
        self.embedding.model_dir.clone().or_else(Self::default_model_dir)
    }

    pub fn load() -> Result<Self, crate::error::ConfigError> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    pub fn save(&self) -> Result<PathBuf, crate::error::ConfigError> {
        let path = Self::config_path().ok_or_else(|| {
            crate::error::ConfigError::PathError("could not determine config directory".to_string())
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum characters for a paragraph to be kept as a chunk.
    #[serde(default = "default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,

    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Walk subdirectories of the PDF directory.
    #[serde(default)]
    pub recursive: bool,

    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

fn default_min_paragraph_chars() -> usize {
    50
}

fn default_max_file_size() -> u64 {
    50 * 1024 * 1024
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_paragraph_chars: default_min_paragraph_chars(),
            max_file_size: default_max_file_size(),
            recursive: false,
            exclude_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Directory containing `model.onnx` and `tokenizer.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_dir: Option<PathBuf>,

    #[serde(default = "default_dimension")]
    pub dimension: u32,

    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_dimension() -> u32 {
    DEFAULT_EMBEDDING_DIMENSION
}

fn default_batch_size() -> u32 {
    32
}

fn default_max_tokens() -> u32 {
    256
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            dimension: default_dimension(),
            batch_size: default_batch_size(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Number of top chunks promoted to sections.
    #[serde(default = "default_top_sections")]
    pub top_sections: u32,

    /// Number of sentences kept per refined section.
    #[serde(default = "default_top_sentences")]
    pub top_sentences: u32,
}

fn default_top_sections() -> u32 {
    5
}

fn default_top_sentences() -> u32 {
    2
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_sections: default_top_sections(),
            top_sentences: default_top_sentences(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_max_words")]
    pub max_words: u32,

    /// A final partial paragraph is added only when at least this many
    /// words of budget remain.
    #[serde(default = "default_min_tail_words")]
    pub min_tail_words: u32,

    /// Sentences kept per paragraph in the cohesive summary.
    #[serde(default = "default_summary_sentences")]
    pub top_sentences: u32,
}

fn default_max_words() -> u32 {
    500
}

fn default_min_tail_words() -> u32 {
    20
}

fn default_summary_sentences() -> u32 {
    3
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
            min_tail_words: default_min_tail_words(),
            top_sentences: default_summary_sentences(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}
