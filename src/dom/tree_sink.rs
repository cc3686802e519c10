//! html5ever TreeSink implementation for ArenaDom.

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, QualName};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// Handle used by TreeSink to reference nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub ArenaNodeId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(ArenaNodeId::NONE)
    }
}

/// TreeSink that builds an [`ArenaDom`].
///
/// html5ever's TreeSink methods take `&self`, so the DOM sits behind a
/// `RefCell`.
pub struct DomSink {
    dom: RefCell<ArenaDom>,
}

impl Default for DomSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(ArenaDom::new()),
        }
    }

    /// Consume the sink and return the DOM.
    pub fn into_dom(self) -> ArenaDom {
        self.dom.into_inner()
    }

    fn insert(&self, parent: ArenaNodeId, child: NodeOrText<NodeHandle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => dom.append(parent, node.0),
            NodeOrText::AppendText(text) => dom.append_text(parent, &text),
        }
    }
}

impl TreeSink for DomSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        // Editor output is frequently sloppy; recover like a browser would.
        log::trace!("html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let dom = self.dom.borrow();
        match dom.get(target.0).map(|n| &n.data) {
            Some(ArenaNodeData::Element { name, .. }) => {
                // SAFETY: element names live in their own boxes and the
                // arena only grows, so the pointee outlives the borrow.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(&**name) }
            }
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        _attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_element(name))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(String::new()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.insert(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self
            .dom
            .borrow()
            .get(element.0)
            .map_or(ArenaNodeId::NONE, |n| n.parent);
        if parent.is_some() {
            self.insert(parent, child);
        } else {
            self.insert(prev_element.0, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let doc = dom.document();
        let doctype = dom.create_doctype(
            name.to_string(),
            public_id.to_string(),
            system_id.to_string(),
        );
        dom.append(doc, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // <template> contents are treated as ordinary children.
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node.0,
            NodeOrText::AppendText(text) => dom.create_text(text.to_string()),
        };
        dom.insert_before(sibling.0, node);
    }

    fn add_attrs_if_missing(&self, _target: &Self::Handle, _attrs: Vec<Attribute>) {}

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut dom = self.dom.borrow_mut();
        let children: Vec<_> = dom.children(node.0).collect();
        for child in children {
            dom.append(new_parent.0, child);
        }
    }
}

/// Parse an HTML document or fragment into an [`ArenaDom`].
///
/// Fragments are wrapped in `<html><body>` by the tree builder, exactly as a
/// browser does for `innerHTML` content.
pub fn parse_html(html: &str) -> ArenaDom {
    use html5ever::driver::ParseOpts;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;

    parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parse() {
        let dom = parse_html("<h1>Jane Doe</h1><p>Engineer</p>");

        let h1 = dom.find_by_tag("h1").expect("should find h1");
        let text_id = dom.children(h1).next().expect("h1 should have child");
        assert_eq!(dom.text_content(text_id), Some("Jane Doe"));

        let body = dom.find_by_tag("body").expect("fragment gets a body");
        let tags: Vec<_> = dom
            .children(body)
            .filter_map(|c| dom.element_name(c).map(|n| n.to_string()))
            .collect();
        assert_eq!(tags, vec!["h1", "p"]);
    }

    #[test]
    fn test_misnested_markup_recovers() {
        // <p> cannot contain <ul>; the tree builder closes the paragraph.
        let dom = parse_html("<p>Skills<ul><li>Rust</li></ul>");
        let body = dom.find_by_tag("body").unwrap();
        let tags: Vec<_> = dom
            .children(body)
            .filter_map(|c| dom.element_name(c).map(|n| n.to_string()))
            .collect();
        assert_eq!(tags, vec!["p", "ul"]);
    }
}
