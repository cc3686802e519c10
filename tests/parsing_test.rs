//! Content model tests against realistic editor output.

use resumedit::session::DEFAULT_RESUME_CONTENT;
use resumedit::{Block, Error, HeadingLevel, ListKind, parse_blocks, parse_blocks_bytes};

#[test]
fn test_sample_resume_structure() {
    let doc = parse_blocks(DEFAULT_RESUME_CONTENT).expect("sample resume should parse");

    assert_eq!(doc.title(), Some("John Doe"));
    let headings: Vec<_> = doc
        .iter()
        .filter_map(|b| match b {
            Block::Heading {
                level: HeadingLevel::H2,
                text,
            } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(headings, vec!["SUMMARY", "EXPERIENCE", "EDUCATION", "SKILLS"]);

    let lists: Vec<_> = doc
        .iter()
        .filter_map(|b| match b {
            Block::List { kind, items } => Some((*kind, items.len())),
            _ => None,
        })
        .collect();
    assert_eq!(
        lists,
        vec![(ListKind::Unordered, 3), (ListKind::Unordered, 3)]
    );
}

#[test]
fn test_block_order_is_document_order() {
    let doc = parse_blocks(
        "<h1>Jane Doe</h1>\n<p>Engineer</p>\n<h2>SKILLS</h2>\n<ul><li>Skill A</li><li>Skill B</li></ul>\n<p>Last</p>",
    )
    .unwrap();
    assert_eq!(
        doc.blocks(),
        &[
            Block::heading(HeadingLevel::H1, "Jane Doe"),
            Block::paragraph("Engineer"),
            Block::heading(HeadingLevel::H2, "SKILLS"),
            Block::list(ListKind::Unordered, ["Skill A", "Skill B"]),
            Block::paragraph("Last"),
        ]
    );
}

#[test]
fn test_unsupported_elements_are_skipped() {
    let doc = parse_blocks(
        "<h4>Minor</h4><div><p>Nested</p></div><p>Kept</p><table><tr><td>x</td></tr></table>",
    )
    .unwrap();
    assert_eq!(doc.blocks(), &[Block::paragraph("Kept")]);
}

#[test]
fn test_editor_formatting_is_flattened() {
    let doc = parse_blocks(
        "<p><strong>Senior</strong>&nbsp;<em>Engineer</em> &amp; <u>Lead</u></p>\
         <ol><li><strong>Rust</strong>, Go</li></ol>",
    )
    .unwrap();
    assert_eq!(
        doc.blocks(),
        &[
            Block::paragraph("Senior Engineer & Lead"),
            Block::list(ListKind::Ordered, ["Rust, Go"]),
        ]
    );
}

#[test]
fn test_empty_paragraphs_are_kept() {
    // The editor emits `<p><br></p>` for blank lines.
    let doc = parse_blocks("<p>One</p><p><br></p><p>Two</p>").unwrap();
    assert_eq!(
        doc.blocks(),
        &[
            Block::paragraph("One"),
            Block::paragraph(""),
            Block::paragraph("Two"),
        ]
    );
}

#[test]
fn test_malformed_markup_recovers() {
    let doc = parse_blocks("<p>Engineer<p>Lead<ul><li>A<li>B</ul>").unwrap();
    assert_eq!(
        doc.blocks(),
        &[
            Block::paragraph("Engineer"),
            Block::paragraph("Lead"),
            Block::list(ListKind::Unordered, ["A", "B"]),
        ]
    );
}

#[test]
fn test_legacy_encoding_input() {
    // "Café" in Windows-1252.
    let doc = parse_blocks_bytes(b"<p>Caf\xe9</p>").unwrap();
    assert_eq!(doc.blocks(), &[Block::paragraph("Café")]);
}

#[test]
fn test_binary_payload_is_rejected() {
    let err = parse_blocks_bytes(b"PK\x03\x04\x00\x00").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().starts_with("Could not parse resume content"));
}
