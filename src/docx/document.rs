//! `word/document.xml` and `word/styles.xml` generation.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::model::FontTier;
use crate::template::StyleTokens;
use crate::util::strip_control_chars;

use super::{WordParagraph, WordStyle};

pub(crate) const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A4 portrait in twips.
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
/// One inch.
const PAGE_MARGIN: u32 = 1440;

/// Eighths of a point.
const BORDER_SIZE: u32 = 6;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

fn write_paragraph(xml: &mut String, para: &WordParagraph) {
    xml.push_str("<w:p><w:pPr>");
    let _ = write!(xml, r#"<w:pStyle w:val="{}"/>"#, para.style.style_id());

    if let Some(color) = para.border_bottom {
        let _ = write!(
            xml,
            r#"<w:pBdr><w:bottom w:val="single" w:sz="{BORDER_SIZE}" w:space="1" w:color="{}"/></w:pBdr>"#,
            color.to_ooxml()
        );
    }

    let _ = write!(
        xml,
        r#"<w:spacing w:before="{}" w:after="{}"/>"#,
        para.spacing.before, para.spacing.after
    );
    if let Some(left) = para.indent_left {
        let _ = write!(xml, r#"<w:ind w:left="{left}"/>"#);
    }
    xml.push_str(r#"<w:jc w:val="left"/></w:pPr>"#);

    if !para.text.is_empty() {
        let _ = write!(
            xml,
            r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
            escape(strip_control_chars(&para.text))
        );
    }
    xml.push_str("</w:p>");
}

/// Generate `word/document.xml` for a paragraph list.
pub fn document_xml(paragraphs: &[WordParagraph]) -> String {
    let mut xml = String::with_capacity(512 + paragraphs.len() * 256);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}"><w:body>"#);

    for para in paragraphs {
        write_paragraph(&mut xml, para);
    }

    let _ = write!(
        xml,
        concat!(
            r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/>"#,
            r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/>"#,
            "</w:sectPr>"
        ),
        PAGE_WIDTH,
        PAGE_HEIGHT,
        m = PAGE_MARGIN
    );
    xml.push_str("</w:body></w:document>");
    xml
}

/// Half-points, as `<w:sz>` expects.
fn half_points(tokens: &StyleTokens, tier: FontTier) -> u32 {
    (tokens.font_size(tier) * 2.0).round() as u32
}

fn write_style(xml: &mut String, style: WordStyle, tokens: &StyleTokens) {
    let (tier, color, emphasis) = match style {
        WordStyle::Heading1 => (FontTier::Title, tokens.primary, "<w:b/>"),
        WordStyle::Heading2 => (FontTier::Section, tokens.primary, "<w:b/>"),
        WordStyle::Heading3 => (FontTier::Subsection, tokens.primary, "<w:i/>"),
        WordStyle::Normal => (FontTier::Body, tokens.text, ""),
    };

    if style == WordStyle::Normal {
        let _ = write!(
            xml,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="{}"><w:name w:val="{}"/><w:qFormat/>"#,
            style.style_id(),
            style.display_name()
        );
    } else {
        let _ = write!(
            xml,
            r#"<w:style w:type="paragraph" w:styleId="{}"><w:name w:val="{}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
            style.style_id(),
            style.display_name()
        );
        let level = match style {
            WordStyle::Heading1 => 0,
            WordStyle::Heading2 => 1,
            _ => 2,
        };
        let _ = write!(
            xml,
            r#"<w:pPr><w:keepNext/><w:outlineLvl w:val="{level}"/></w:pPr>"#
        );
    }

    let size = half_points(tokens, tier);
    let _ = write!(
        xml,
        r#"<w:rPr>{emphasis}<w:color w:val="{}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:style>"#,
        color.to_ooxml()
    );
}

/// Generate `word/styles.xml` from the template's tokens.
pub fn styles_xml(tokens: &StyleTokens) -> String {
    let font = tokens.primary_font();
    let font = escape(font.as_str());

    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<w:styles xmlns:w="{NS_W}" xmlns:r="{NS_R}">"#);

    xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
    let _ = write!(
        xml,
        r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#
    );
    let body = half_points(tokens, FontTier::Body);
    let _ = write!(xml, r#"<w:sz w:val="{body}"/><w:szCs w:val="{body}"/>"#);
    xml.push_str("</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>");
    xml.push_str(r#"<w:spacing w:after="0" w:line="259" w:lineRule="auto"/>"#);
    xml.push_str("</w:pPr></w:pPrDefault></w:docDefaults>");

    for style in [
        WordStyle::Normal,
        WordStyle::Heading1,
        WordStyle::Heading2,
        WordStyle::Heading3,
    ] {
        write_style(&mut xml, style, tokens);
    }

    xml.push_str("</w:styles>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::Spacing;
    use crate::template::{Color, resolve};

    fn para(text: &str) -> WordParagraph {
        WordParagraph {
            style: WordStyle::Normal,
            text: text.to_string(),
            border_bottom: None,
            indent_left: None,
            spacing: Spacing::PARAGRAPH,
        }
    }

    #[test]
    fn test_paragraph_markup() {
        let xml = document_xml(&[para("R&D <lead>")]);
        assert!(xml.contains(r#"<w:pStyle w:val="Normal"/>"#));
        assert!(xml.contains(r#"<w:spacing w:before="120" w:after="120"/>"#));
        assert!(xml.contains("R&amp;D &lt;lead&gt;"));
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
        assert!(xml.contains(r#"w:top="1440""#));
    }

    #[test]
    fn test_border_and_indent() {
        let mut p = para("• Rust");
        p.indent_left = Some(360);
        p.border_bottom = Some(Color::rgb(0x3b, 0x82, 0xf6));
        let xml = document_xml(&[p]);
        assert!(xml.contains(r#"<w:ind w:left="360"/>"#));
        assert!(xml.contains(r#"w:color="3B82F6""#));
    }

    #[test]
    fn test_empty_paragraph_has_no_run() {
        let xml = document_xml(&[para("")]);
        assert!(xml.contains("<w:p>"));
        assert!(!xml.contains("<w:r>"));
    }

    #[test]
    fn test_styles_use_template() {
        let xml = styles_xml(&resolve("classic"));
        assert!(xml.contains(r#"w:ascii="Georgia""#));
        assert!(xml.contains(r#"w:styleId="Heading1""#));
        assert!(xml.contains(r#"<w:b/><w:color w:val="7F1D1D"/><w:sz w:val="32"/>"#));
        assert!(xml.contains(r#"<w:i/><w:color w:val="7F1D1D"/><w:sz w:val="22"/>"#));
        assert!(xml.contains(r#"<w:color w:val="334155"/><w:sz w:val="20"/>"#));
    }
}
