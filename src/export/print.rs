//! Printable HTML view of a resume.
//!
//! Re-synthesises the parsed blocks (rather than echoing the raw editor
//! markup) inside a standalone A4 page styled with the template's variables.

use std::fmt::Write as _;

use crate::model::{Block, ListKind, ResumeDocument};
use crate::template::{StyleTokens, template_by_id};

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

fn stylesheet(tokens: &StyleTokens) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in tokens.css_variables() {
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n");

    css.push_str(concat!(
        "@page { size: A4; margin: 0.5cm; }\n",
        "body { font-family: var(--font-family); color: var(--text-color); ",
        "background-color: white; line-height: 1.5; margin: 0; padding: 0; }\n",
        ".resume-container { max-width: 21cm; margin: 0 auto; padding: 1.5cm; background-color: white; }\n",
        "h1 { color: var(--primary-color); font-size: 24px; margin-top: 0; margin-bottom: 8px; font-weight: 700; }\n",
        "h2 { color: var(--primary-color); font-size: 18px; margin-top: 16px; margin-bottom: 8px; font-weight: 600; }\n",
        "h3 { color: var(--primary-color); font-size: 16px; margin-top: 12px; margin-bottom: 6px; font-weight: 500; }\n",
        "p { margin-bottom: 8px; font-size: 14px; }\n",
        "ul, ol { margin-top: 6px; margin-bottom: 12px; padding-left: 24px; }\n",
        "li { margin-bottom: 4px; font-size: 14px; }\n",
    ));

    if tokens.underline_section_headers {
        css.push_str("h2 { padding-bottom: 6px; border-bottom: 2px solid var(--primary-color); }\n");
    }
    if tokens.template_id == "professional" {
        css.push_str("h2 { text-transform: uppercase; }\n");
    }
    css
}

fn body(doc: &ResumeDocument) -> String {
    let mut html = String::new();
    for block in doc {
        match block {
            Block::Heading { level, text } => {
                let n = level.number();
                let _ = writeln!(html, "<h{n}>{}</h{n}>", escape_html(text));
            }
            Block::Paragraph { text } => {
                let _ = writeln!(html, "<p>{}</p>", escape_html(text));
            }
            Block::List { kind, items } => {
                let tag = match kind {
                    ListKind::Ordered => "ol",
                    ListKind::Unordered => "ul",
                };
                let _ = writeln!(html, "<{tag}>");
                for item in items {
                    let _ = writeln!(html, "<li>{}</li>", escape_html(item));
                }
                let _ = writeln!(html, "</{tag}>");
            }
        }
    }
    html
}

/// Build a standalone HTML page for printing.
///
/// `title` is the page title; blank titles become `"My Resume"`.
pub fn print_html(doc: &ResumeDocument, tokens: &StyleTokens, title: &str) -> String {
    let title = match title.trim() {
        "" => "My Resume",
        t => t,
    };
    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{}</title>\n<style>\n{}</style>\n</head>\n",
            "<body>\n<div class=\"resume-container {}\">\n{}</div>\n</body>\n</html>\n"
        ),
        escape_html(title),
        stylesheet(tokens),
        template_by_id(tokens.template_id).class,
        body(doc)
    )
}
