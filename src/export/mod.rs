//! Export module: writing resumes to downloadable formats.
//!
//! Provides the `Exporter` trait, the format-independent [`ExportController`]
//! that drives a single export job per format, and a printable HTML view.
//!
//! # Architecture
//!
//! Exporters use a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write + Seek` destination
//!
//! # Example
//!
//! ```no_run
//! use resumedit::export::{ExportController, ExportRequest, DirectorySaver};
//!
//! let controller = ExportController::new(DirectorySaver::new("out"));
//! let request = ExportRequest::new("<h1>Jane Doe</h1>", "modern", "jane");
//! controller.export_pdf(&request);
//! controller.export_word(&request);
//! ```

use std::fmt;
use std::io::{Seek, Write};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::ResumeDocument;
use crate::template::StyleTokens;

mod controller;
mod print;

pub use controller::{
    DirectorySaver, ExportController, ExportOutcome, ExportRequest, JobState, MemorySaver,
    SaveTarget, DEFAULT_FILE_NAME,
};
pub use print::{escape_html, print_html};

/// Trait for rendering a parsed resume to a specific format.
///
/// Exporters hold their configuration, and `export` writes to any
/// `Write + Seek` destination:
/// - `std::fs::File` for disk output
/// - `std::io::Cursor<Vec<u8>>` for in-memory output
pub trait Exporter {
    /// Render `doc` with the given style tokens into `writer`.
    ///
    /// On error nothing usable has been written; callers must discard the
    /// destination.
    fn export<W: Write + Seek>(
        &self,
        doc: &ResumeDocument,
        tokens: &StyleTokens,
        writer: &mut W,
    ) -> Result<()>;
}

/// Downloadable output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Word,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Pdf, ExportFormat::Word];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "docx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pdf => "PDF",
            Self::Word => "Word",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "word" | "docx" | "doc" => Ok(Self::Word),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("DOCX".parse::<ExportFormat>().unwrap(), ExportFormat::Word);
        assert_eq!("word".parse::<ExportFormat>().unwrap(), ExportFormat::Word);
        assert!(matches!(
            "odt".parse::<ExportFormat>(),
            Err(Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
        assert_eq!(ExportFormat::Word.extension(), "docx");
        assert_eq!(ExportFormat::Pdf.mime_type(), "application/pdf");
        assert_eq!(ExportFormat::Word.to_string(), "Word");
    }
}
