//! Page layout: turns blocks into positioned draw operations.
//!
//! Coordinates are millimetres from the top-left corner of the page, with
//! text positioned by its baseline. The writer flips them into PDF user space.

use crate::model::{Block, HeadingLevel, ResumeDocument};
use crate::template::{Color, StyleTokens};

use super::font::{BaseFont, FontFamily, FontStyle, wrap_text};

/// Vertical advance of one wrapped body line.
const LINE_HEIGHT: f32 = 5.0;
/// Advance after a level-1 or level-2 heading.
const HEADING_ADVANCE: f32 = 7.0;
/// Advance after a level-3 heading.
const SUBHEADING_ADVANCE: f32 = 5.0;
/// Section rule sits this far above the post-heading cursor.
const RULE_OFFSET: f32 = 3.0;
const RULE_WIDTH: f32 = 0.5;
const RULE_GAP: f32 = 2.0;
const PARAGRAPH_GAP: f32 = 3.0;
const LIST_ITEM_GAP: f32 = 2.0;
const LIST_INDENT: f32 = 2.0;
const LIST_GAP: f32 = 3.0;

/// Physical page geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageConfig {
    /// ISO A4 portrait with a 15 mm margin.
    pub const A4: PageConfig = PageConfig {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 15.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Cursor position past which a new block starts a new page.
    pub fn bottom_limit(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::A4
    }
}

/// Small-print line drawn at the bottom of the last page.
#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub text: String,
    pub size_pt: f32,
    pub color: Color,
    /// Distance of the text start from the right margin.
    pub inset_mm: f32,
    /// Distance of the baseline from the bottom edge.
    pub baseline_mm: f32,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            text: "Generated by ResumeEdit".to_string(),
            size_pt: 8.0,
            color: Color::rgb(100, 100, 100),
            inset_mm: 40.0,
            baseline_mm: 5.0,
        }
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        font: BaseFont,
        size_pt: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
}

/// Draw operations of a single page, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    /// Text of every text operation on the page.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Line { .. } => None,
        })
    }

    /// The text operation that draws exactly `needle`, if any.
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

/// A laid-out document ready for serialisation.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub page: PageConfig,
    pub pages: Vec<PageLayout>,
    pub title: Option<String>,
}

impl PdfLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Distinct fonts in first-use order.
    pub fn fonts(&self) -> Vec<BaseFont> {
        let mut fonts = Vec::new();
        for op in self.pages.iter().flat_map(|p| &p.ops) {
            if let DrawOp::Text { font, .. } = op
                && !fonts.contains(font)
            {
                fonts.push(*font);
            }
        }
        fonts
    }
}

/// Stateful layout pass over a document.
struct Layouter<'a> {
    tokens: &'a StyleTokens,
    page: PageConfig,
    family: FontFamily,
    pages: Vec<PageLayout>,
    cursor: f32,
}

impl<'a> Layouter<'a> {
    fn new(tokens: &'a StyleTokens, page: PageConfig) -> Self {
        Self {
            tokens,
            page,
            family: FontFamily::from_font_stack(tokens.font_family),
            pages: vec![PageLayout::default()],
            cursor: page.margin_mm,
        }
    }

    fn current(&mut self) -> &mut PageLayout {
        if self.pages.is_empty() {
            self.pages.push(PageLayout::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Start a new page if the cursor has run past the bottom margin.
    ///
    /// Checked once per block: a block that overflows is not split.
    fn break_if_needed(&mut self) {
        if self.cursor > self.page.bottom_limit() {
            log::debug!(
                "page {} full at {:.1}mm, starting new page",
                self.pages.len(),
                self.cursor
            );
            self.pages.push(PageLayout::default());
            self.cursor = self.page.margin_mm;
        }
    }

    fn text(&mut self, text: &str, y: f32, font: BaseFont, size_pt: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        let x = self.page.margin_mm;
        self.current().ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font,
            size_pt,
            color,
        });
    }

    /// Draw wrapped lines starting at the cursor; returns the line count.
    fn wrapped(&mut self, text: &str, width: f32, font: BaseFont, size_pt: f32, color: Color) -> usize {
        let lines = wrap_text(text, font, size_pt, width);
        let top = self.cursor;
        for (i, line) in lines.iter().enumerate() {
            self.text(line, top + i as f32 * LINE_HEIGHT, font, size_pt, color);
        }
        lines.len()
    }

    fn block(&mut self, block: &Block) {
        self.break_if_needed();

        let size = self.tokens.font_size(block.tier());
        let primary = self.tokens.primary;
        let body = self.tokens.text;
        let content_width = self.page.content_width();

        match block {
            Block::Heading { level, text } => {
                let style = match level {
                    HeadingLevel::H1 | HeadingLevel::H2 => FontStyle::Bold,
                    HeadingLevel::H3 => FontStyle::Italic,
                };
                let font = BaseFont::new(self.family, style);
                self.text(text, self.cursor, font, size, primary);

                if *level == HeadingLevel::H3 {
                    self.cursor += SUBHEADING_ADVANCE;
                    return;
                }
                self.cursor += HEADING_ADVANCE;

                if *level == HeadingLevel::H2 && self.tokens.underline_section_headers {
                    let y = self.cursor - RULE_OFFSET;
                    let x1 = self.page.margin_mm;
                    self.current().ops.push(DrawOp::Line {
                        x1,
                        y1: y,
                        x2: x1 + content_width / 2.0,
                        y2: y,
                        width: RULE_WIDTH,
                        color: primary,
                    });
                    self.cursor += RULE_GAP;
                }
            }
            Block::Paragraph { text } => {
                let font = BaseFont::new(self.family, FontStyle::Normal);
                let lines = self.wrapped(text, content_width, font, size, body);
                self.cursor += lines as f32 * LINE_HEIGHT + PARAGRAPH_GAP;
            }
            Block::List { kind, items } => {
                let font = BaseFont::new(self.family, FontStyle::Normal);
                for (index, item) in items.iter().enumerate() {
                    let line = kind.prefixed(index, item);
                    let lines =
                        self.wrapped(&line, content_width - LIST_INDENT, font, size, body);
                    self.cursor += lines as f32 * LINE_HEIGHT + LIST_ITEM_GAP;
                }
                self.cursor += LIST_GAP;
            }
        }
    }

    fn footer(&mut self, footer: &Footer) {
        let x = self.page.width_mm - self.page.margin_mm - footer.inset_mm;
        let y = self.page.height_mm - footer.baseline_mm;
        let font = BaseFont::new(self.family, FontStyle::Normal);
        self.current().ops.push(DrawOp::Text {
            x,
            y,
            text: footer.text.clone(),
            font,
            size_pt: footer.size_pt,
            color: footer.color,
        });
    }
}

/// Lay out a document on pages of the given geometry.
///
/// An empty document yields a single page carrying only the footer.
pub fn layout_document(
    doc: &ResumeDocument,
    tokens: &StyleTokens,
    page: PageConfig,
    footer: Option<&Footer>,
) -> PdfLayout {
    let mut layouter = Layouter::new(tokens, page);
    for block in doc {
        layouter.block(block);
    }
    if let Some(footer) = footer {
        layouter.footer(footer);
    }

    PdfLayout {
        page,
        pages: layouter.pages,
        title: doc.title().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListKind;
    use crate::template::resolve;

    fn layout(blocks: Vec<Block>, template: &str) -> PdfLayout {
        layout_document(
            &ResumeDocument::new(blocks),
            &resolve(template),
            PageConfig::A4,
            Some(&Footer::default()),
        )
    }

    fn text_y(page: &PageLayout, needle: &str) -> f32 {
        match page.find_text(needle) {
            Some(DrawOp::Text { y, .. }) => *y,
            other => panic!("no text {needle:?}: {other:?}"),
        }
    }

    #[test]
    fn test_empty_document_has_footer_only() {
        let layout = layout(vec![], "modern");
        assert_eq!(layout.page_count(), 1);
        let texts: Vec<_> = layout.pages[0].texts().collect();
        assert_eq!(texts, vec!["Generated by ResumeEdit"]);
        match &layout.pages[0].ops[0] {
            DrawOp::Text { x, y, size_pt, color, .. } => {
                assert_eq!((*x, *y), (155.0, 292.0));
                assert_eq!(*size_pt, 8.0);
                assert_eq!(*color, Color::rgb(100, 100, 100));
            }
            op => panic!("unexpected {op:?}"),
        }
    }

    #[test]
    fn test_cursor_advances() {
        let layout = layout(
            vec![
                Block::heading(HeadingLevel::H1, "Jane Doe"),
                Block::heading(HeadingLevel::H2, "SUMMARY"),
                Block::heading(HeadingLevel::H3, "Role"),
                Block::paragraph("Engineer"),
                Block::list(ListKind::Ordered, ["Rust", "Go"]),
                Block::paragraph("After"),
            ],
            "modern",
        );
        let page = &layout.pages[0];
        assert_eq!(text_y(page, "Jane Doe"), 15.0);
        assert_eq!(text_y(page, "SUMMARY"), 22.0);
        // 7mm heading advance plus 2mm after the rule.
        assert_eq!(text_y(page, "Role"), 31.0);
        assert_eq!(text_y(page, "Engineer"), 36.0);
        assert_eq!(text_y(page, "1. Rust"), 44.0);
        assert_eq!(text_y(page, "2. Go"), 51.0);
        assert_eq!(text_y(page, "After"), 61.0);
    }

    #[test]
    fn test_section_rule_only_for_flagged_template() {
        let blocks = vec![Block::heading(HeadingLevel::H2, "EXPERIENCE")];
        let modern = layout(blocks.clone(), "modern");
        let rule = modern.pages[0]
            .ops
            .iter()
            .find(|op| matches!(op, DrawOp::Line { .. }))
            .cloned();
        assert_eq!(
            rule,
            Some(DrawOp::Line {
                x1: 15.0,
                y1: 19.0,
                x2: 105.0,
                y2: 19.0,
                width: 0.5,
                color: resolve("modern").primary,
            })
        );

        let classic = layout(blocks, "classic");
        assert!(!classic.pages[0].ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
    }

    #[test]
    fn test_heading_styles() {
        let layout = layout(
            vec![
                Block::heading(HeadingLevel::H2, "Section"),
                Block::heading(HeadingLevel::H3, "Sub"),
            ],
            "classic",
        );
        let page = &layout.pages[0];
        match page.find_text("Section") {
            Some(DrawOp::Text { font, size_pt, .. }) => {
                assert_eq!(font.postscript_name(), "Times-Bold");
                assert_eq!(*size_pt, 13.0);
            }
            op => panic!("unexpected {op:?}"),
        }
        match page.find_text("Sub") {
            Some(DrawOp::Text { font, .. }) => assert_eq!(font.postscript_name(), "Times-Italic"),
            op => panic!("unexpected {op:?}"),
        }
    }

    #[test]
    fn test_pagination_resets_cursor() {
        // 40 paragraphs at 8mm each overflow one 267mm content area.
        let blocks: Vec<_> = (0..40).map(|i| Block::paragraph(format!("Line {i}"))).collect();
        let layout = layout(blocks, "modern");
        assert!(layout.page_count() > 1);

        let second = &layout.pages[1];
        let first_text = second.texts().next().unwrap().to_string();
        assert_eq!(text_y(second, &first_text), 15.0);
    }

    #[test]
    fn test_footer_only_on_last_page() {
        let blocks: Vec<_> = (0..80).map(|i| Block::paragraph(format!("Line {i}"))).collect();
        let layout = layout(blocks, "modern");
        let footers: Vec<usize> = layout
            .pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.find_text("Generated by ResumeEdit").is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(footers, vec![layout.page_count() - 1]);
    }

    #[test]
    fn test_overflowing_block_is_not_split() {
        let long = "lorem ipsum dolor ".repeat(400);
        let layout = layout(vec![Block::paragraph(long)], "modern");
        // The whole paragraph lands on the first page, past the bottom margin.
        assert_eq!(layout.page_count(), 1);
        let max_y = layout.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, text, .. } if text != "Generated by ResumeEdit" => Some(*y),
                _ => None,
            })
            .fold(0.0f32, f32::max);
        assert!(max_y > PageConfig::A4.bottom_limit());
    }

    #[test]
    fn test_title_from_first_h1() {
        let layout = layout(vec![Block::heading(HeadingLevel::H1, "Jane Doe")], "modern");
        assert_eq!(layout.title.as_deref(), Some("Jane Doe"));
        assert_eq!(layout.fonts().len(), 2);
    }
}
