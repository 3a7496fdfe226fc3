//! Error types for the document intelligence CLI.

use thiserror::Error;

/// Errors related to PDF discovery and text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("no PDF files found in {0}")]
    NoPdfFound(String),

    #[error("directory walk error: {0}")]
    WalkError(String),

    #[error("failed to read {path}: {reason}")]
    ReadError { path: String, reason: String },

    #[error("failed to parse {path}: {reason}")]
    ParseError { path: String, reason: String },
}

/// Errors related to the embedding model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model not found: {0}")]
    NotFound(String),

    #[error("failed to load model: {0}")]
    LoadError(String),

    #[error("tokenizer error: {0}")]
    TokenizerError(String),

    #[error("inference error: {0}")]
    InferenceError(String),
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    PathError(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Errors related to the persona library.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Errors related to batch (challenge JSON) processing.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("none of the specified documents were found in {0}")]
    NoDocuments(String),
}

/// Errors related to report serialization.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialize error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Application-level errors that wrap domain errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("persona error: {0}")]
    Persona(#[from] PersonaError),

    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("{0}")]
    Other(String),
}
