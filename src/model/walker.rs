//! Content Model Walker: editor markup → [`ResumeDocument`].

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId, parse_html};
use crate::error::{Error, Result};
use crate::util::{collapse_whitespace, decode_text};

use super::{Block, HeadingLevel, ListKind, ResumeDocument};

/// Elements whose boundaries separate words when flattening text.
const BLOCK_LEVEL: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
    "section", "article", "tr", "td", "th", "table",
];

/// Elements whose text never reaches the rendered page.
const INVISIBLE: &[&str] = &["script", "style", "template", "head", "title"];

/// Parse editor markup into an ordered list of blocks.
///
/// Only direct children of the body are blocks. `<h1>`–`<h3>`, `<p>`,
/// `<ul>` and `<ol>` are recognised; anything else is skipped. Inner markup is
/// flattened to its visible text.
///
/// Empty or whitespace-only content yields an empty document. Content that
/// is not text at all (contains NUL bytes) is a [`Error::Parse`].
pub fn parse_blocks(content: &str) -> Result<ResumeDocument> {
    if memchr::memchr(0, content.as_bytes()).is_some() {
        return Err(Error::Parse(
            "payload contains NUL bytes and is not markup".to_string(),
        ));
    }
    if content.trim().is_empty() {
        return Ok(ResumeDocument::default());
    }

    let dom = parse_html(content);
    let body = dom
        .find_by_tag("body")
        .ok_or_else(|| Error::Parse("markup has no document body".to_string()))?;

    let mut blocks = Vec::new();
    for child in dom.children(body) {
        let Some(tag) = dom.element_name(child) else {
            continue;
        };
        let tag = tag.as_ref();

        if let Some(level) = HeadingLevel::from_tag(tag) {
            blocks.push(Block::Heading {
                level,
                text: flatten_text(&dom, child),
            });
            continue;
        }

        match tag {
            "p" => blocks.push(Block::Paragraph {
                text: flatten_text(&dom, child),
            }),
            "ul" | "ol" => {
                let kind = if tag == "ol" {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                };
                let items = dom
                    .children(child)
                    .filter(|&li| dom.element_name(li).is_some_and(|n| n.as_ref() == "li"))
                    .map(|li| flatten_text(&dom, li))
                    .collect();
                blocks.push(Block::List { kind, items });
            }
            other => log::debug!("skipping unsupported block <{other}>"),
        }
    }

    log::debug!("parsed {} blocks from {} bytes", blocks.len(), content.len());
    Ok(ResumeDocument::new(blocks))
}

/// Parse raw bytes, decoding UTF-8 with a Windows-1252 fallback first.
pub fn parse_blocks_bytes(bytes: &[u8]) -> Result<ResumeDocument> {
    if memchr::memchr(0, bytes).is_some() {
        return Err(Error::Parse(
            "payload contains NUL bytes and is not markup".to_string(),
        ));
    }
    parse_blocks(&decode_text(bytes, None))
}

enum Step {
    Node(ArenaNodeId),
    Separator,
}

/// Concatenate all descendant text of `root`, collapse whitespace, trim.
///
/// `<br>` and block-level descendants act as word separators so that
/// `<li><p>A</p><p>B</p></li>` reads `"A B"` rather than `"AB"`.
fn flatten_text(dom: &ArenaDom, root: ArenaNodeId) -> String {
    let mut raw = String::new();
    let mut stack: Vec<Step> = dom.children(root).map(Step::Node).collect();
    stack.reverse();

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Separator => {
                raw.push(' ');
                continue;
            }
            Step::Node(id) => id,
        };
        let Some(node) = dom.get(id) else {
            continue;
        };
        match &node.data {
            ArenaNodeData::Text(text) => raw.push_str(text),
            ArenaNodeData::Element { name, .. } => {
                let tag = name.local.as_ref();
                if INVISIBLE.contains(&tag) {
                    continue;
                }
                if tag == "br" {
                    raw.push(' ');
                    continue;
                }
                let block = BLOCK_LEVEL.contains(&tag);
                if block {
                    raw.push(' ');
                    stack.push(Step::Separator);
                }
                let children: Vec<_> = dom.children(id).collect();
                stack.extend(children.into_iter().rev().map(Step::Node));
            }
            _ => {}
        }
    }

    collapse_whitespace(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_blocks("").unwrap().is_empty());
        assert!(parse_blocks("  \n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_nul_bytes_are_parse_error() {
        let err = parse_blocks("<p>a\0b</p>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(matches!(
            parse_blocks_bytes(b"\x00\x01\x02").unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let doc = parse_blocks("<h1>Jane Doe</h1><h2>SUMMARY</h2><h3>Role</h3><p>Engineer</p>")
            .unwrap();
        assert_eq!(
            doc.blocks(),
            &[
                Block::heading(HeadingLevel::H1, "Jane Doe"),
                Block::heading(HeadingLevel::H2, "SUMMARY"),
                Block::heading(HeadingLevel::H3, "Role"),
                Block::paragraph("Engineer"),
            ]
        );
    }

    #[test]
    fn test_inline_markup_is_flattened() {
        let doc = parse_blocks("<p>  <strong>Senior</strong> <em>Engineer</em>\n at <a href='#'>ACME</a> </p>")
            .unwrap();
        assert_eq!(doc.blocks(), &[Block::paragraph("Senior Engineer at ACME")]);
    }

    #[test]
    fn test_adjacent_inline_text_concatenates() {
        let doc = parse_blocks("<h1><b>Jane</b><i>Doe</i></h1>").unwrap();
        assert_eq!(doc.blocks(), &[Block::heading(HeadingLevel::H1, "JaneDoe")]);
    }

    #[test]
    fn test_br_separates_words() {
        let doc = parse_blocks("<p>Line one<br>Line two</p>").unwrap();
        assert_eq!(doc.blocks(), &[Block::paragraph("Line one Line two")]);
    }

    #[test]
    fn test_lists() {
        let doc = parse_blocks(
            "<ul><li>Rust</li><li> Go </li></ul><ol><li>First</li><li><p>Second</p><p>part</p></li></ol>",
        )
        .unwrap();
        assert_eq!(
            doc.blocks(),
            &[
                Block::list(ListKind::Unordered, ["Rust", "Go"]),
                Block::list(ListKind::Ordered, ["First", "Second part"]),
            ]
        );
    }

    #[test]
    fn test_unknown_blocks_are_skipped() {
        let doc = parse_blocks("<h4>Minor</h4><div>Box</div>stray text<p>Kept</p><table><tr><td>x</td></tr></table>")
            .unwrap();
        assert_eq!(doc.blocks(), &[Block::paragraph("Kept")]);
    }

    #[test]
    fn test_empty_paragraph_is_kept() {
        // Quill emits <p><br></p> for blank lines.
        let doc = parse_blocks("<p>A</p><p><br></p><p>B</p>").unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.blocks()[1], Block::paragraph(""));
    }

    #[test]
    fn test_full_document_input() {
        let doc = parse_blocks(
            "<!DOCTYPE html><html><head><title>CV</title><style>p{}</style></head><body><h1>Jane</h1></body></html>",
        )
        .unwrap();
        assert_eq!(doc.blocks(), &[Block::heading(HeadingLevel::H1, "Jane")]);
    }

    #[test]
    fn test_script_text_is_invisible() {
        let doc = parse_blocks("<p>Visible<script>var x = 1;</script></p>").unwrap();
        assert_eq!(doc.blocks(), &[Block::paragraph("Visible")]);
    }

    #[test]
    fn test_entities_are_decoded() {
        let doc = parse_blocks("<p>R&amp;D &lt;team&gt;</p>").unwrap();
        assert_eq!(doc.blocks(), &[Block::paragraph("R&D <team>")]);
    }

    #[test]
    fn test_bytes_with_legacy_encoding() {
        let doc = parse_blocks_bytes(b"<p>Caf\xE9</p>").unwrap();
        assert_eq!(doc.blocks(), &[Block::paragraph("Café")]);
    }
}
