//! Error types for resumedit operations.

use thiserror::Error;

/// Errors that can occur while parsing, rendering, or persisting a resume.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The content payload could not be interpreted as markup.
    #[error("Could not parse resume content: {0}")]
    Parse(String),

    /// Layout or serialization failed inside a renderer.
    #[error("Render failed: {0}")]
    Render(String),

    /// Export was requested for empty or whitespace-only content.
    #[error("Resume content is empty")]
    EmptyContent,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Theme value not found: {0}")]
    ThemeValueNotFound(String),

    #[error("Unsupported format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
