//! Evaluates a compiled [`Selector`] against a single [`Node`]. Dispatch is
//! a single match over the AST's tagged variants — there is no by-name
//! predicate registry to look up at match time (§9 redesign: a systems
//! language can afford to make the set of predicates closed).

use crate::ast::{AttrOp, PseudoClass, PseudoFunction, Selector};
use crate::dom::{Node, NodeKind};

impl Selector {
    /// Does `node` satisfy this selector, evaluated in isolation (i.e. as
    /// the rightmost element of a combinator chain; combinators are
    /// resolved by [`crate::traversal`], not here).
    pub fn matches<N: Node>(&self, node: &N) -> bool {
        match self {
            Selector::Element(name) => node.is_element() && node.tag_name() == Some(name.as_str()),
            Selector::Universal => node.is_element(),
            Selector::Attribute { key, op, value } => match node.get_attribute(key) {
                None => false,
                Some(actual) => attr_matches(*op, actual, value),
            },
            Selector::PseudoClass(p) => matches_pseudo_class(*p, node),
            Selector::PseudoFunction(p) => matches_pseudo_function(p, node),
            Selector::Sequence(parts) => parts.iter().all(|p| p.matches(node)),
            Selector::Descendant { ancestor, descendant, direct } => {
                if !descendant.matches(node) {
                    return false;
                }
                if *direct {
                    node.parent().is_some_and(|p| ancestor.matches(&p))
                } else {
                    has_matching_ancestor(ancestor, node)
                }
            }
            Selector::Sibling { predecessor, target, immediate } => {
                if !target.matches(node) {
                    return false;
                }
                if *immediate {
                    prev_element_sibling(node).is_some_and(|s| predecessor.matches(&s))
                } else {
                    has_matching_preceding_sibling(predecessor, node)
                }
            }
            Selector::Union(left, right) => left.matches(node) || right.matches(node),
        }
    }
}

fn attr_matches(op: AttrOp, actual: &str, expected: &str) -> bool {
    match op {
        AttrOp::Present => true,
        AttrOp::Eq => actual == expected,
        AttrOp::Includes => actual.split_whitespace().any(|w| w == expected),
        AttrOp::DashMatch => actual == expected || actual.starts_with(&format!("{expected}-")),
        AttrOp::Prefix => actual.starts_with(expected),
        AttrOp::Suffix => actual.ends_with(expected),
        AttrOp::Substring => actual.contains(expected),
    }
}

fn has_matching_ancestor<N: Node>(ancestor: &Selector, node: &N) -> bool {
    let mut current = node.parent();
    while let Some(p) = current {
        if ancestor.matches(&p) {
            return true;
        }
        current = p.parent();
    }
    false
}

/// The nearest preceding sibling that is itself an element, skipping over
/// text and other non-element nodes (§9 ambiguity 1 / REDESIGN FLAGS:
/// deliberately diverges from a raw, unfiltered `prev_sibling` walk).
fn prev_element_sibling<N: Node>(node: &N) -> Option<N> {
    let mut current = node.prev_sibling();
    while let Some(s) = current {
        if s.is_element() {
            return Some(s);
        }
        current = s.prev_sibling();
    }
    None
}

fn has_matching_preceding_sibling<N: Node>(predecessor: &Selector, node: &N) -> bool {
    let mut current = node.prev_sibling();
    while let Some(s) = current {
        if s.is_element() && predecessor.matches(&s) {
            return true;
        }
        current = s.prev_sibling();
    }
    false
}

/// `checked`/`disabled`/`required` and their negations only ever apply to
/// form controls (§4.4).
fn is_form_control<N: Node>(node: &N) -> bool {
    matches!(node.tag_name(), Some("input") | Some("textarea"))
}

fn is_empty<N: Node>(node: &N) -> bool {
    let mut current = node.first_child();
    while let Some(c) = current {
        if matches!(c.kind(), NodeKind::Element | NodeKind::Text) {
            return false;
        }
        current = c.next_sibling();
    }
    true
}

fn matches_pseudo_class<N: Node>(p: PseudoClass, node: &N) -> bool {
    if !node.is_element() {
        return false;
    }
    match p {
        PseudoClass::Root => node.parent().is_some_and(|p| p.kind() == NodeKind::Document),
        PseudoClass::Empty => is_empty(node),
        PseudoClass::Checked => is_form_control(node) && node.get_attribute("checked").is_some(),
        PseudoClass::Disabled => is_form_control(node) && node.get_attribute("disabled").is_some(),
        PseudoClass::Enabled => is_form_control(node) && node.get_attribute("disabled").is_none(),
        PseudoClass::Required => is_form_control(node) && node.get_attribute("required").is_some(),
        PseudoClass::Optional => is_form_control(node) && node.get_attribute("required").is_none(),
        PseudoClass::ReadOnly => is_form_control(node) && node.get_attribute("readonly").is_some(),
        PseudoClass::ReadWrite => is_form_control(node) && node.get_attribute("readonly").is_none(),
        PseudoClass::FirstChild => prev_element_sibling(node).is_none(),
        PseudoClass::LastChild => next_element_sibling(node).is_none(),
        PseudoClass::OnlyChild => prev_element_sibling(node).is_none() && next_element_sibling(node).is_none(),
        PseudoClass::FirstOfType => type_index_from_start(node) == 1,
        PseudoClass::LastOfType => type_index_from_end(node) == 1,
        PseudoClass::OnlyOfType => type_index_from_start(node) == 1 && type_index_from_end(node) == 1,
    }
}

fn matches_pseudo_function<N: Node>(p: &PseudoFunction, node: &N) -> bool {
    if !node.is_element() {
        return false;
    }
    match p {
        PseudoFunction::NthChild(nth) => nth.matches(child_index_from_start(node)),
        PseudoFunction::NthLastChild(nth) => nth.matches(child_index_from_end(node)),
        PseudoFunction::NthOfType(nth) => nth.matches(type_index_from_start(node)),
        PseudoFunction::NthLastOfType(nth) => nth.matches(type_index_from_end(node)),
        PseudoFunction::Not(inner) => !inner.matches(node),
    }
}

fn next_element_sibling<N: Node>(node: &N) -> Option<N> {
    let mut current = node.next_sibling();
    while let Some(s) = current {
        if s.is_element() {
            return Some(s);
        }
        current = s.next_sibling();
    }
    None
}

fn child_index_from_start<N: Node>(node: &N) -> i64 {
    let mut count = 1;
    let mut current = node.prev_sibling();
    while let Some(s) = current {
        if s.is_element() {
            count += 1;
        }
        current = s.prev_sibling();
    }
    count
}

fn child_index_from_end<N: Node>(node: &N) -> i64 {
    let mut count = 1;
    let mut current = node.next_sibling();
    while let Some(s) = current {
        if s.is_element() {
            count += 1;
        }
        current = s.next_sibling();
    }
    count
}

fn type_index_from_start<N: Node>(node: &N) -> i64 {
    let tag = node.tag_name();
    let mut count = 1;
    let mut current = node.prev_sibling();
    while let Some(s) = current {
        if s.is_element() && s.tag_name() == tag {
            count += 1;
        }
        current = s.prev_sibling();
    }
    count
}

fn type_index_from_end<N: Node>(node: &N) -> i64 {
    let tag = node.tag_name();
    let mut count = 1;
    let mut current = node.next_sibling();
    while let Some(s) = current {
        if s.is_element() && s.tag_name() == tag {
            count += 1;
        }
        current = s.next_sibling();
    }
    count
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::Selector;

    // Minimal recursive tree used only to exercise attribute/pseudo-class
    // matching that does not require sibling links.
    #[derive(Debug, Clone)]
    struct Elem {
        tag: &'static str,
        kind: NodeKind,
        children: Vec<Elem>,
        parent: Option<Box<Elem>>,
    }

    impl Elem {
        fn leaf(tag: &'static str) -> Self {
            Elem { tag, kind: NodeKind::Element, children: vec![], parent: None }
        }
    }

    impl Node for Elem {
        fn kind(&self) -> NodeKind {
            self.kind
        }
        fn tag_name(&self) -> Option<&str> {
            matches!(self.kind, NodeKind::Element).then_some(self.tag)
        }
        fn get_attribute(&self, _name: &str) -> Option<&str> {
            None
        }
        fn parent(&self) -> Option<Self> {
            self.parent.as_deref().cloned()
        }
        fn first_child(&self) -> Option<Self> {
            self.children.first().cloned()
        }
        fn next_sibling(&self) -> Option<Self> {
            None
        }
        fn prev_sibling(&self) -> Option<Self> {
            None
        }
    }

    #[test]
    fn element_selector_matches_tag() {
        let node = Elem::leaf("div");
        assert!(Selector::Element("div".into()).matches(&node));
        assert!(!Selector::Element("span".into()).matches(&node));
    }

    #[test]
    fn root_matches_element_whose_parent_is_document() {
        let document = Elem { tag: "", kind: NodeKind::Document, children: vec![], parent: None };
        let html = Elem { parent: Some(Box::new(document)), ..Elem::leaf("html") };
        assert!(matches_pseudo_class(PseudoClass::Root, &html));
        assert!(!matches_pseudo_class(PseudoClass::Root, &Elem::leaf("body")));
    }

    #[test]
    fn empty_matches_childless_element() {
        assert!(matches_pseudo_class(PseudoClass::Empty, &Elem::leaf("div")));
        let parent = Elem { children: vec![Elem::leaf("span")], ..Elem::leaf("div") };
        assert!(!matches_pseudo_class(PseudoClass::Empty, &parent));
    }

    #[test]
    fn attr_operators() {
        assert!(attr_matches(AttrOp::Eq, "a", "a"));
        assert!(attr_matches(AttrOp::Includes, "a b c", "b"));
        assert!(!attr_matches(AttrOp::Includes, "ab c", "b"));
        assert!(attr_matches(AttrOp::DashMatch, "en-us", "en"));
        assert!(attr_matches(AttrOp::DashMatch, "en", "en"));
        assert!(!attr_matches(AttrOp::DashMatch, "english", "en"));
        assert!(attr_matches(AttrOp::Prefix, "hello", "he"));
        assert!(attr_matches(AttrOp::Suffix, "hello", "lo"));
        assert!(attr_matches(AttrOp::Substring, "hello", "ell"));
        assert!(attr_matches(AttrOp::Prefix, "hello", ""));
    }
}
