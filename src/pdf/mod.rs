//! PDF Renderer.
//!
//! Rendering is split in two passes: [`layout_document`] positions text and
//! rules on fixed-size pages, then [`write_pdf`] serialises the result using
//! the Base-14 fonts.

mod font;
mod layout;
mod writer;

use std::io::{Seek, Write};

use crate::error::Result;
use crate::export::Exporter;
use crate::model::ResumeDocument;
use crate::template::StyleTokens;

pub use font::{BaseFont, FontFamily, FontStyle, wrap_text};
pub use layout::{DrawOp, Footer, PageConfig, PageLayout, PdfLayout, layout_document};
pub use writer::write_pdf;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Configuration for PDF export.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// Page geometry (A4 with 15mm margins by default).
    pub page: PageConfig,
    /// FlateDecode-compress content streams.
    pub compress: bool,
    /// Footer for the last page; `None` disables it.
    pub footer: Option<Footer>,
    /// PDF header version.
    pub version: String,
    /// `/Creator` and `/Producer` in the info dictionary.
    pub creator: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::A4,
            compress: true,
            footer: Some(Footer::default()),
            version: "1.7".to_string(),
            creator: concat!("resumedit ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PdfConfig {
    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }

    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_footer(mut self, footer: Option<Footer>) -> Self {
        self.footer = footer;
        self
    }
}

/// PDF format exporter.
///
/// # Example
///
/// ```no_run
/// use resumedit::export::Exporter;
/// use resumedit::pdf::PdfExporter;
/// use resumedit::{parse_blocks, resolve};
/// use std::fs::File;
///
/// let doc = parse_blocks("<h1>Jane Doe</h1><p>Engineer</p>")?;
/// let mut file = File::create("resume.pdf")?;
/// PdfExporter::new().export(&doc, &resolve("modern"), &mut file)?;
/// # Ok::<(), resumedit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    config: PdfConfig,
}

impl PdfExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter with custom configuration.
    pub fn with_config(config: PdfConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PdfConfig {
        &self.config
    }

    /// Lay out a document without serialising it.
    pub fn layout(&self, doc: &ResumeDocument, tokens: &StyleTokens) -> PdfLayout {
        layout_document(doc, tokens, self.config.page, self.config.footer.as_ref())
    }
}

impl Exporter for PdfExporter {
    fn export<W: Write + Seek>(
        &self,
        doc: &ResumeDocument,
        tokens: &StyleTokens,
        writer: &mut W,
    ) -> Result<()> {
        let layout = self.layout(doc, tokens);
        log::debug!(
            "laid out {} blocks on {} pages ({})",
            doc.len(),
            layout.page_count(),
            tokens.template_id
        );
        write_pdf(&layout, &self.config, writer)
    }
}
