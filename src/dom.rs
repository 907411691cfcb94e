//! The abstraction over an externally supplied DOM-like tree (§5). This
//! crate never parses HTML or owns a tree; it only walks one through this
//! trait.

/// The node-type discriminator (§3.3): at minimum Document, Element and
/// Text, plus a catch-all for comments and other node kinds the host
/// tree may expose but this crate never matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Other,
}

/// A read-only view onto one node of a host tree. Implementors provide
/// sibling and parent links; this crate never mutates a node or compares
/// two nodes for identity.
pub trait Node: Clone {
    fn kind(&self) -> NodeKind;

    /// The element's tag name, lower-cased. `None` for non-element nodes.
    fn tag_name(&self) -> Option<&str>;

    /// The value of attribute `name`, if present. Absence and empty string
    /// are distinct: `[attr]` matches the latter, not the former.
    fn get_attribute(&self, name: &str) -> Option<&str>;

    fn parent(&self) -> Option<Self>;
    fn first_child(&self) -> Option<Self>;
    fn next_sibling(&self) -> Option<Self>;
    fn prev_sibling(&self) -> Option<Self>;

    /// True when `tag_name` is `Some` and `kind` is [`NodeKind::Element`].
    fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element && self.tag_name().is_some()
    }
}
