//! Typed resume content model.
//!
//! The editor emits a small, fixed tag vocabulary. [`parse_blocks`] turns
//! that markup into a [`ResumeDocument`] once, up front, so both renderers
//! consume the same stable sequence of [`Block`]s instead of re-deriving
//! semantics from markup.

mod walker;

pub use walker::{parse_blocks, parse_blocks_bytes};

/// Heading levels recognised by the walker (`<h1>`..`<h3>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a tag name (`"h1"`, `"h2"`, `"h3"`) to a level.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }

    /// Numeric level, 1-based.
    pub fn number(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

/// Ordered (`<ol>`) or unordered (`<ul>`) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// Literal marker for the item at `index` (0-based).
    ///
    /// Ordered lists number from `"1."`; unordered lists use a bullet.
    /// Markers are static text in both output formats.
    pub fn marker(self, index: usize) -> String {
        match self {
            Self::Ordered => format!("{}.", index + 1),
            Self::Unordered => "\u{2022}".to_string(),
        }
    }

    /// Item text with its marker prefixed, e.g. `"2. Rust"` or `"• Rust"`.
    pub fn prefixed(self, index: usize, item: &str) -> String {
        format!("{} {}", self.marker(index), item)
    }
}

/// Font-size tier a block is rendered at.
///
/// Tiers are ordered: `Title` ≥ `Section` ≥ `Subsection` ≥ `Body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontTier {
    Title,
    Section,
    Subsection,
    Body,
}

/// One top-level unit of resume content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    Paragraph { text: String },
    List { kind: ListKind, items: Vec<String> },
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn list<I, S>(kind: ListKind, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List {
            kind,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// The font-size tier this block is drawn at.
    pub fn tier(&self) -> FontTier {
        match self {
            Self::Heading {
                level: HeadingLevel::H1,
                ..
            } => FontTier::Title,
            Self::Heading {
                level: HeadingLevel::H2,
                ..
            } => FontTier::Section,
            Self::Heading {
                level: HeadingLevel::H3,
                ..
            } => FontTier::Subsection,
            Self::Paragraph { .. } | Self::List { .. } => FontTier::Body,
        }
    }
}

/// An ordered, immutable sequence of blocks parsed from editor content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeDocument {
    blocks: Vec<Block>,
}

impl ResumeDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text of the first level-1 heading, used as the document title.
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading {
                level: HeadingLevel::H1,
                text,
            } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
    }
}

impl From<Vec<Block>> for ResumeDocument {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

impl<'a> IntoIterator for &'a ResumeDocument {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_markers() {
        let markers: Vec<_> = (0..3).map(|i| ListKind::Ordered.marker(i)).collect();
        assert_eq!(markers, vec!["1.", "2.", "3."]);
    }

    #[test]
    fn test_unordered_marker_is_bullet() {
        assert_eq!(ListKind::Unordered.prefixed(4, "Skill A"), "• Skill A");
    }

    #[test]
    fn test_block_tiers() {
        assert_eq!(Block::heading(HeadingLevel::H1, "x").tier(), FontTier::Title);
        assert_eq!(Block::heading(HeadingLevel::H2, "x").tier(), FontTier::Section);
        assert_eq!(
            Block::heading(HeadingLevel::H3, "x").tier(),
            FontTier::Subsection
        );
        assert_eq!(Block::paragraph("x").tier(), FontTier::Body);
        assert_eq!(
            Block::list(ListKind::Ordered, ["a"]).tier(),
            FontTier::Body
        );
    }

    #[test]
    fn test_document_title() {
        let doc = ResumeDocument::from(vec![
            Block::paragraph("intro"),
            Block::heading(HeadingLevel::H1, "Jane Doe"),
        ]);
        assert_eq!(doc.title(), Some("Jane Doe"));
        assert_eq!(ResumeDocument::default().title(), None);
    }
}
