//! Index-based DOM arena populated by the html5ever tree builder.
//!
//! Nodes live in a single `Vec` and refer to each other through
//! [`ArenaNodeId`]s, so the tree is cheap to build and trivially `Send`.

use html5ever::{LocalName, QualName};

/// Identifier of a node inside an [`ArenaDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(u32);

impl ArenaNodeId {
    /// Sentinel for "no node" in parent/sibling links.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    pub fn is_some(self) -> bool {
        self != Self::NONE
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload of an arena node.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    Document,
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Attributes are not kept; nothing downstream reads them.
    Element { name: Box<QualName> },
    Text(String),
    Comment(String),
}

/// A node with its tree links.
#[derive(Debug, Clone)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    fn new(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaDom {
    /// Create a DOM containing only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![ArenaNode::new(ArenaNodeData::Document)],
        }
    }

    /// The root document node.
    pub fn document(&self) -> ArenaNodeId {
        ArenaNodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    fn push(&mut self, data: ArenaNodeData) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(ArenaNode::new(data));
        id
    }

    pub fn create_element(&mut self, name: QualName) -> ArenaNodeId {
        self.push(ArenaNodeData::Element {
            name: Box::new(name),
        })
    }

    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Text(text))
    }

    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Comment(text))
    }

    pub fn create_doctype(
        &mut self,
        name: String,
        public_id: String,
        system_id: String,
    ) -> ArenaNodeId {
        self.push(ArenaNodeData::Doctype {
            name,
            public_id,
            system_id,
        })
    }

    /// Unlink a node from its parent and siblings.
    pub fn detach(&mut self, id: ArenaNodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
        }
        if let Some(l) = self.get_mut(last) {
            l.next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Append text to `parent`, merging with a trailing text node if present.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let Some(node) = self.get(parent) else {
            return;
        };
        let last = node.last_child;
        if let Some(ArenaNode {
            data: ArenaNodeData::Text(existing),
            ..
        }) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }
        let id = self.create_text(text.to_string());
        self.append(parent, id);
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        let Some(sib) = self.get(sibling) else {
            return;
        };
        let (parent, prev) = (sib.parent, sib.prev_sibling);
        if parent.is_none() {
            return;
        }
        self.detach(new_node);

        {
            let node = &mut self.nodes[new_node.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = sibling;
        }
        self.nodes[sibling.index()].prev_sibling = new_node;
        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = new_node;
        } else {
            self.nodes[parent.index()].first_child = new_node;
        }
    }

    /// Iterate over the direct children of a node.
    pub fn children(&self, id: ArenaNodeId) -> Children<'_> {
        Children {
            dom: self,
            next: self.get(id).map_or(ArenaNodeId::NONE, |n| n.first_child),
        }
    }

    /// Local name of an element node.
    pub fn element_name(&self, id: ArenaNodeId) -> Option<&LocalName> {
        match &self.get(id)?.data {
            ArenaNodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        }
    }

    /// Text of a text node.
    pub fn text_content(&self, id: ArenaNodeId) -> Option<&str> {
        match &self.get(id)?.data {
            ArenaNodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// First element with the given local name, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        let mut stack = vec![self.document()];
        while let Some(id) = stack.pop() {
            if self.element_name(id).is_some_and(|n| n.as_ref() == tag) {
                return Some(id);
            }
            let children: Vec<_> = self.children(id).collect();
            stack.extend(children.into_iter().rev());
        }
        None
    }
}

/// Iterator over sibling nodes.
pub struct Children<'a> {
    dom: &'a ArenaDom,
    next: ArenaNodeId,
}

impl Iterator for Children<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next;
        let node = self.dom.get(current)?;
        self.next = node.next_sibling;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use html5ever::{ns, local_name};

    use super::*;

    fn element(dom: &mut ArenaDom, tag: &str) -> ArenaNodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        dom.create_element(name)
    }

    #[test]
    fn test_append_and_children() {
        let mut dom = ArenaDom::new();
        let ul = element(&mut dom, "ul");
        let a = element(&mut dom, "li");
        let b = element(&mut dom, "li");
        dom.append(dom.document(), ul);
        dom.append(ul, a);
        dom.append(ul, b);

        let children: Vec<_> = dom.children(ul).collect();
        assert_eq!(children, vec![a, b]);
        assert_eq!(dom.get(b).unwrap().parent, ul);
    }

    #[test]
    fn test_append_text_merges() {
        let mut dom = ArenaDom::new();
        let p = element(&mut dom, "p");
        dom.append(dom.document(), p);
        dom.append_text(p, "Jane ");
        dom.append_text(p, "Doe");

        let children: Vec<_> = dom.children(p).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("Jane Doe"));
    }

    #[test]
    fn test_insert_before_and_detach() {
        let mut dom = ArenaDom::new();
        let body = element(&mut dom, "body");
        let h1 = element(&mut dom, "h1");
        let p = element(&mut dom, "p");
        dom.append(dom.document(), body);
        dom.append(body, p);
        dom.insert_before(p, h1);
        assert_eq!(dom.children(body).collect::<Vec<_>>(), vec![h1, p]);

        dom.detach(h1);
        assert_eq!(dom.children(body).collect::<Vec<_>>(), vec![p]);
        assert!(dom.get(h1).unwrap().parent.is_none());
    }

    #[test]
    fn test_find_by_tag_in_document_order() {
        let mut dom = ArenaDom::new();
        let body = element(&mut dom, "body");
        let first = element(&mut dom, "p");
        let second = element(&mut dom, "p");
        dom.append(dom.document(), body);
        dom.append(body, first);
        dom.append(body, second);

        assert_eq!(dom.find_by_tag("p"), Some(first));
        assert_eq!(dom.element_name(body), Some(&local_name!("body")));
        assert_eq!(dom.find_by_tag("table"), None);
    }
}
