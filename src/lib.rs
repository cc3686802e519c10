//! # resumedit
//!
//! Turns resume content written in a rich-text editor into downloadable
//! documents.
//!
//! ## Features
//!
//! - Parse editor markup into a typed [`ResumeDocument`]
//! - Resolve one of three visual templates into [`StyleTokens`]
//! - Render A4 PDF with standard fonts, wrapping and pagination
//! - Render Word (`.docx`) packages with named heading styles
//! - Track export jobs per format with [`ExportController`]
//! - Printable HTML, application themes and persisted editor sessions
//!
//! ## Quick Start
//!
//! ```no_run
//! use resumedit::{DirectorySaver, ExportController, ExportRequest};
//!
//! let controller = ExportController::new(DirectorySaver::new("out"));
//! let request = ExportRequest::new(
//!     "<h1>Jane Doe</h1><p>Engineer</p><ul><li>Rust</li></ul>",
//!     "modern",
//!     "jane-doe",
//! );
//! controller.export_pdf(&request);
//! controller.export_word(&request);
//! ```
//!
//! ## Working with Documents
//!
//! Renderers can also be driven directly:
//!
//! ```
//! use std::io::Cursor;
//!
//! use resumedit::export::Exporter;
//! use resumedit::{DocxExporter, parse_blocks, resolve};
//!
//! let doc = parse_blocks("<h1>Jane Doe</h1><p>Engineer</p>")?;
//! assert_eq!(doc.title(), Some("Jane Doe"));
//!
//! let mut buf = Cursor::new(Vec::new());
//! DocxExporter::new().export(&doc, &resolve("classic"), &mut buf)?;
//! assert!(buf.get_ref().starts_with(b"PK"));
//! # Ok::<(), resumedit::Error>(())
//! ```

pub mod docx;
pub mod dom;
pub mod error;
pub mod export;
pub mod model;
pub mod pdf;
pub mod session;
pub mod template;
pub mod theme;
pub(crate) mod util;

pub use docx::DocxExporter;
pub use error::{Error, Result};
pub use export::{
    DirectorySaver, ExportController, ExportFormat, ExportOutcome, ExportRequest, Exporter,
    JobState, MemorySaver, SaveTarget, print_html,
};
pub use model::{Block, HeadingLevel, ListKind, ResumeDocument, parse_blocks, parse_blocks_bytes};
pub use pdf::PdfExporter;
pub use session::{JsonFileStorage, MemoryStorage, Session, Storage};
pub use template::{StyleTokens, TEMPLATES, Template, resolve};
pub use theme::{Theme, ThemeContext, ThemeVariant};
pub use util::decode_text;
