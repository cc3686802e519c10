//! PDF file serialisation.
//!
//! Writes a [`PdfLayout`] as a PDF 1.7 file: catalog, page tree, one Type1
//! font dictionary per Base-14 face in use, one content stream per page,
//! an info dictionary, the cross-reference table and the trailer.

use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::util::win_ansi_byte;

use super::font::BaseFont;
use super::layout::{DrawOp, PdfLayout};
use super::{MM_PER_PT, PdfConfig};

/// Points per millimetre.
const PT_PER_MM: f32 = 1.0 / MM_PER_PT;

fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::Compression;
    use flate2::write::ZlibEncoder;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Format a number compactly: at most two decimals, no trailing zeros.
fn num(value: f32) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Encode a string as a PDF literal string in WinAnsiEncoding.
fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        match win_ansi_byte(ch) {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            byte @ 0x20..=0x7e => out.push(byte as char),
            byte => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out.push(')');
    out
}

/// Tracks byte offsets of numbered objects for the xref table.
struct ObjectWriter {
    output: Vec<u8>,
    offsets: Vec<usize>,
}

impl ObjectWriter {
    fn new(version: &str) -> Self {
        let mut output = Vec::new();
        output.extend_from_slice(format!("%PDF-{version}\n").as_bytes());
        // Binary marker so transfer tools treat the file as binary.
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        Self {
            output,
            offsets: Vec::new(),
        }
    }

    /// Object ids are 1-based and must be written in order.
    fn object(&mut self, id: usize, body: &str) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.output.len());
        self.output
            .extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream(&mut self, id: usize, dict_extra: &str, data: &[u8]) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.output.len());
        self.output.extend_from_slice(
            format!("{id} 0 obj\n<< /Length {}{dict_extra} >>\nstream\n", data.len()).as_bytes(),
        );
        self.output.extend_from_slice(data);
        self.output.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        let xref_start = self.output.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", self.offsets.len() + 1);
        for offset in &self.offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
            self.offsets.len() + 1
        );
        self.output.extend_from_slice(xref.as_bytes());
        self.output
    }
}

/// Build the content stream operators for one page.
fn content_stream(ops: &[DrawOp], fonts: &[BaseFont], page_height_mm: f32) -> String {
    let mut out = String::new();
    let y_pt = |y: f32| num((page_height_mm - y) * PT_PER_MM);

    for op in ops {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size_pt,
                color,
            } => {
                let index = fonts.iter().position(|f| f == font).unwrap_or(0) + 1;
                let (r, g, b) = color.to_unit();
                let _ = writeln!(
                    out,
                    "BT /F{index} {} Tf {} {} {} rg {} {} Td {} Tj ET",
                    num(*size_pt),
                    num(r),
                    num(g),
                    num(b),
                    num(x * PT_PER_MM),
                    y_pt(*y),
                    pdf_string(text)
                );
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                let (r, g, b) = color.to_unit();
                let _ = writeln!(
                    out,
                    "{} {} {} RG {} w {} {} m {} {} l S",
                    num(r),
                    num(g),
                    num(b),
                    num(width * PT_PER_MM),
                    num(x1 * PT_PER_MM),
                    y_pt(*y1),
                    num(x2 * PT_PER_MM),
                    y_pt(*y2)
                );
            }
        }
    }
    out
}

/// Serialise a layout to PDF bytes.
pub fn write_pdf<W: Write>(layout: &PdfLayout, config: &PdfConfig, mut writer: W) -> Result<()> {
    let fonts = layout.fonts();
    let page_count = layout.pages.len();

    // 1 catalog, 2 page tree, then fonts, then (page, contents) pairs, then info.
    let catalog_id = 1;
    let pages_id = 2;
    let first_font_id = 3;
    let first_page_id = first_font_id + fonts.len();
    let info_id = first_page_id + 2 * page_count;

    let mut w = ObjectWriter::new(&config.version);

    w.object(catalog_id, &format!("<< /Type /Catalog /Pages {pages_id} 0 R >>"));

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", first_page_id + 2 * i))
        .collect();
    w.object(
        pages_id,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
            kids.join(" ")
        ),
    );

    for (i, font) in fonts.iter().enumerate() {
        w.object(
            first_font_id + i,
            &format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.postscript_name()
            ),
        );
    }

    let font_resources: String = (0..fonts.len())
        .map(|i| format!("/F{} {} 0 R", i + 1, first_font_id + i))
        .collect::<Vec<_>>()
        .join(" ");
    let media_box = format!(
        "[0 0 {} {}]",
        num(layout.page.width_mm * PT_PER_MM),
        num(layout.page.height_mm * PT_PER_MM)
    );

    for (i, page) in layout.pages.iter().enumerate() {
        let page_id = first_page_id + 2 * i;
        let content_id = page_id + 1;
        w.object(
            page_id,
            &format!(
                "<< /Type /Page /Parent {pages_id} 0 R /MediaBox {media_box} /Resources << /Font << {font_resources} >> >> /Contents {content_id} 0 R >>"
            ),
        );

        let raw = content_stream(&page.ops, &fonts, layout.page.height_mm);
        if config.compress {
            let compressed = compress_data(raw.as_bytes())?;
            w.stream(content_id, " /Filter /FlateDecode", &compressed);
        } else {
            w.stream(content_id, "", raw.as_bytes());
        }
    }

    let mut info = format!("<< /Producer {}", pdf_string(&config.creator));
    let _ = write!(info, " /Creator {}", pdf_string(&config.creator));
    if let Some(title) = &layout.title {
        let _ = write!(info, " /Title {}", pdf_string(title));
    }
    info.push_str(" >>");
    w.object(info_id, &info);

    let bytes = w.finish(catalog_id, info_id);
    log::debug!("wrote PDF: {page_count} pages, {} bytes", bytes.len());
    writer.write_all(&bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::layout::{Footer, PageConfig, layout_document};
    use crate::model::{Block, HeadingLevel, ResumeDocument};
    use crate::template::resolve;

    fn render_bytes(blocks: Vec<Block>, compress: bool) -> Vec<u8> {
        let doc = ResumeDocument::new(blocks);
        let layout = layout_document(
            &doc,
            &resolve("modern"),
            PageConfig::A4,
            Some(&Footer::default()),
        );
        let config = PdfConfig::default().with_compress(compress);
        let mut out = Vec::new();
        write_pdf(&layout, &config, &mut out).unwrap();
        out
    }

    fn render(blocks: Vec<Block>, compress: bool) -> String {
        String::from_utf8_lossy(&render_bytes(blocks, compress)).into_owned()
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(16.0), "16");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(595.2756), "595.28");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_pdf_string_escaping() {
        assert_eq!(pdf_string("a(b)c\\"), "(a\\(b\\)c\\\\)");
        assert_eq!(pdf_string("\u{2022} Skill"), "(\\225 Skill)");
        assert_eq!(pdf_string("Café"), "(Caf\\351)");
    }

    #[test]
    fn test_document_structure() {
        let pdf = render(vec![Block::heading(HeadingLevel::H1, "Jane Doe")], false);
        assert!(pdf.starts_with("%PDF-1.7"));
        assert!(pdf.contains("/Type /Catalog"));
        assert!(pdf.contains("/Type /Pages"));
        assert!(pdf.contains("/Count 1"));
        assert!(pdf.contains("/BaseFont /Helvetica-Bold"));
        assert!(pdf.contains("/MediaBox [0 0 595.28 841.89]"));
        assert!(pdf.contains("(Jane Doe) Tj"));
        assert!(pdf.contains("/Title (Jane Doe)"));
        assert!(pdf.contains("xref"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_text_color_and_size() {
        let pdf = render(vec![Block::heading(HeadingLevel::H1, "Jane Doe")], false);
        // #3b82f6 at 16pt, baseline 15mm below the top edge.
        assert!(pdf.contains("BT /F1 16 Tf 0.23 0.51 0.96 rg 42.52 799.37 Td (Jane Doe) Tj ET"));
    }

    #[test]
    fn test_compressed_streams() {
        let pdf = render(vec![Block::paragraph("Engineer")], true);
        assert!(pdf.contains("/Filter /FlateDecode"));
        assert!(!pdf.contains("(Engineer) Tj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = render_bytes(vec![Block::paragraph("Engineer")], false);
        let xref = memchr::memmem::rfind(&pdf, b"xref\n").unwrap();
        let table = std::str::from_utf8(&pdf[xref..]).unwrap();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert!(!entries.is_empty());
        for (i, offset) in entries.iter().enumerate() {
            assert!(pdf[*offset..].starts_with(format!("{} 0 obj", i + 1).as_bytes()));
        }
    }
}
