//! A hand-built, arena-indexed DOM used only by this crate's own tests.
//! Not a shipped HTML parser — it exists to construct exactly the trees
//! the matcher tests describe.

use crate::dom::{Node, NodeKind};
use std::rc::Rc;

struct Elem {
    kind: NodeKind,
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    text: String,
    children: Vec<Rc<Elem>>,
    next: std::cell::RefCell<Option<Rc<Elem>>>,
    parent: std::cell::RefCell<Option<Rc<Elem>>>,
}

/// A node handle into a [`Doc`]. Implements [`dom::Node`].
#[derive(Clone)]
pub struct DocNode(Rc<Elem>);

/// Builds an in-memory tree to match against. `Doc::element` starts a
/// subtree builder; `.child(...)` appends children in document order.
pub struct Doc;

impl Doc {
    pub fn document(children: Vec<DocNode>) -> DocNode {
        let document = Rc::new(Elem {
            kind: NodeKind::Document,
            tag: "",
            attrs: vec![],
            text: String::new(),
            children: children.iter().map(|c| c.0.clone()).collect(),
            next: std::cell::RefCell::new(None),
            parent: std::cell::RefCell::new(None),
        });
        link(&document);
        DocNode(document)
    }

    pub fn element(tag: &'static str) -> ElemBuilder {
        ElemBuilder { tag, attrs: vec![], children: vec![] }
    }

    pub fn text(data: impl Into<String>) -> DocNode {
        DocNode(Rc::new(Elem {
            kind: NodeKind::Text,
            tag: "",
            attrs: vec![],
            text: data.into(),
            children: vec![],
            next: std::cell::RefCell::new(None),
            parent: std::cell::RefCell::new(None),
        }))
    }
}

pub struct ElemBuilder {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<DocNode>,
}

impl ElemBuilder {
    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    pub fn child(mut self, child: DocNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn text(self, data: impl Into<String>) -> Self {
        self.child(Doc::text(data))
    }

    pub fn build(self) -> DocNode {
        let node = Rc::new(Elem {
            kind: NodeKind::Element,
            tag: self.tag,
            attrs: self.attrs,
            text: String::new(),
            children: self.children.iter().map(|c| c.0.clone()).collect(),
            next: std::cell::RefCell::new(None),
            parent: std::cell::RefCell::new(None),
        });
        link(&node);
        DocNode(node)
    }
}

/// Wires up `next`/`parent` backlinks once a node's children are fixed.
fn link(node: &Rc<Elem>) {
    for pair in node.children.windows(2) {
        *pair[0].next.borrow_mut() = Some(pair[1].clone());
    }
    for child in &node.children {
        *child.parent.borrow_mut() = Some(node.clone());
    }
}

impl Node for DocNode {
    fn kind(&self) -> NodeKind {
        self.0.kind
    }

    fn tag_name(&self) -> Option<&str> {
        matches!(self.0.kind, NodeKind::Element).then_some(self.0.tag)
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.0.attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().clone().map(DocNode)
    }

    fn first_child(&self) -> Option<Self> {
        self.0.children.first().cloned().map(DocNode)
    }

    fn next_sibling(&self) -> Option<Self> {
        self.0.next.borrow().clone().map(DocNode)
    }

    fn prev_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let mut current = parent.first_child();
        let mut prev = None;
        while let Some(c) = current {
            if Rc::ptr_eq(&c.0, &self.0) {
                return prev;
            }
            prev = Some(c.clone());
            current = c.next_sibling();
        }
        None
    }
}

impl DocNode {
    pub fn text_content(&self) -> String {
        if self.0.kind == NodeKind::Text {
            return self.0.text.clone();
        }
        let mut out = String::new();
        let mut current = self.first_child();
        while let Some(c) = current {
            out.push_str(&c.text_content());
            current = c.next_sibling();
        }
        out
    }
}
