//! Word Renderer.
//!
//! Each block maps to one or more styled paragraphs ([`build_paragraphs`]);
//! the paragraph list is then written as a single-section WordprocessingML
//! package. Word paginates the result itself.

mod document;
mod package;

use std::io::{Seek, Write};

use crate::error::Result;
use crate::export::Exporter;
use crate::model::{Block, HeadingLevel, ResumeDocument};
use crate::template::{Color, StyleTokens};

pub use document::{document_xml, styles_xml};
pub use package::write_package;

/// Left indent of list-item paragraphs, in twips.
pub const LIST_INDENT_TWIPS: u32 = 360;

/// Paragraph style applied via `<w:pStyle>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordStyle {
    Heading1,
    Heading2,
    Heading3,
    Normal,
}

impl WordStyle {
    pub fn style_id(self) -> &'static str {
        match self {
            Self::Heading1 => "Heading1",
            Self::Heading2 => "Heading2",
            Self::Heading3 => "Heading3",
            Self::Normal => "Normal",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Heading1 => "heading 1",
            Self::Heading2 => "heading 2",
            Self::Heading3 => "heading 3",
            Self::Normal => "Normal",
        }
    }

    fn for_heading(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H1 => Self::Heading1,
            HeadingLevel::H2 => Self::Heading2,
            HeadingLevel::H3 => Self::Heading3,
        }
    }
}

/// Space before/after a paragraph, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

impl Spacing {
    pub const HEADING: Spacing = Spacing {
        before: 240,
        after: 120,
    };
    pub const PARAGRAPH: Spacing = Spacing {
        before: 120,
        after: 120,
    };
    pub const LIST_ITEM: Spacing = Spacing {
        before: 60,
        after: 60,
    };
}

/// One output paragraph holding a single run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordParagraph {
    pub style: WordStyle,
    pub text: String,
    /// Bottom border color, for underlined section headings.
    pub border_bottom: Option<Color>,
    /// Left indent in twips.
    pub indent_left: Option<u32>,
    pub spacing: Spacing,
}

impl WordParagraph {
    fn new(style: WordStyle, text: impl Into<String>, spacing: Spacing) -> Self {
        Self {
            style,
            text: text.into(),
            border_bottom: None,
            indent_left: None,
            spacing,
        }
    }
}

/// Map blocks to Word paragraphs.
///
/// List items become one indented paragraph each, with the marker written
/// as literal text.
pub fn build_paragraphs(doc: &ResumeDocument, tokens: &StyleTokens) -> Vec<WordParagraph> {
    let mut paragraphs = Vec::with_capacity(doc.len());

    for block in doc {
        match block {
            Block::Heading { level, text } => {
                let mut para =
                    WordParagraph::new(WordStyle::for_heading(*level), text, Spacing::HEADING);
                if *level == HeadingLevel::H2 && tokens.underline_section_headers {
                    para.border_bottom = Some(tokens.primary);
                }
                paragraphs.push(para);
            }
            Block::Paragraph { text } => {
                paragraphs.push(WordParagraph::new(WordStyle::Normal, text, Spacing::PARAGRAPH));
            }
            Block::List { kind, items } => {
                paragraphs.extend(items.iter().enumerate().map(|(index, item)| {
                    let mut para = WordParagraph::new(
                        WordStyle::Normal,
                        kind.prefixed(index, item),
                        Spacing::LIST_ITEM,
                    );
                    para.indent_left = Some(LIST_INDENT_TWIPS);
                    para
                }));
            }
        }
    }

    paragraphs
}

/// Configuration for Word export.
#[derive(Debug, Clone, Default)]
pub struct DocxConfig {
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
}

/// Word (`.docx`) exporter.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter {
    config: DocxConfig,
}

impl DocxExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter with custom configuration.
    pub fn with_config(config: DocxConfig) -> Self {
        Self { config }
    }
}

impl Exporter for DocxExporter {
    fn export<W: Write + Seek>(
        &self,
        doc: &ResumeDocument,
        tokens: &StyleTokens,
        writer: &mut W,
    ) -> Result<()> {
        let paragraphs = build_paragraphs(doc, tokens);
        log::debug!(
            "mapped {} blocks to {} paragraphs ({})",
            doc.len(),
            paragraphs.len(),
            tokens.template_id
        );
        write_package(
            writer,
            &self.config,
            &document_xml(&paragraphs),
            &styles_xml(tokens),
            doc.title(),
        )
    }
}
