//! Pre-order tree traversal and selector-filtered iteration (§4.3). The
//! walk is iterative, backed by an explicit stack, so it never requires
//! node-identity comparison and never overflows the call stack on a deep
//! tree — `first`/`all` allocate nothing beyond this stack.

use crate::ast::Selector;
use crate::dom::Node;

/// Non-recursive pre-order iterator over `N` and its descendants.
pub struct Pre<N: Node> {
    stack: Vec<N>,
}

impl<N: Node> Pre<N> {
    pub fn new(root: N) -> Self {
        Pre { stack: vec![root] }
    }
}

impl<N: Node> Iterator for Pre<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.stack.pop()?;
        let mut children = Vec::new();
        let mut current = node.first_child();
        while let Some(child) = current {
            current = child.next_sibling();
            children.push(child);
        }
        for child in children.into_iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Pre-order iteration filtered down to nodes a selector matches.
pub struct Matches<'s, N: Node> {
    inner: Pre<N>,
    selector: &'s Selector,
}

impl<'s, N: Node> Iterator for Matches<'s, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.inner.by_ref().find(|n| self.selector.matches(n))
    }
}

/// Every node in `root`'s subtree (`root` included) that `selector`
/// matches, in document order.
pub fn all<'s, N: Node>(selector: &'s Selector, root: N) -> Matches<'s, N> {
    Matches { inner: Pre::new(root), selector }
}

/// The first node in document order that `selector` matches, or `None`.
pub fn first<N: Node>(selector: &Selector, root: N) -> Option<N> {
    all(selector, root).next()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom::NodeKind;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct TreeNode(Rc<Inner>);

    #[derive(Debug)]
    struct Inner {
        tag: &'static str,
        children: Vec<TreeNode>,
        next: std::cell::RefCell<Option<TreeNode>>,
    }

    fn leaf(tag: &'static str) -> TreeNode {
        node(tag, vec![])
    }

    fn node(tag: &'static str, children: Vec<TreeNode>) -> TreeNode {
        for pair in children.windows(2) {
            *pair[0].0.next.borrow_mut() = Some(pair[1].clone());
        }
        TreeNode(Rc::new(Inner { tag, children, next: std::cell::RefCell::new(None) }))
    }

    impl Node for TreeNode {
        fn kind(&self) -> NodeKind {
            NodeKind::Element
        }
        fn tag_name(&self) -> Option<&str> {
            Some(self.0.tag)
        }
        fn get_attribute(&self, _name: &str) -> Option<&str> {
            None
        }
        fn parent(&self) -> Option<Self> {
            None
        }
        fn first_child(&self) -> Option<Self> {
            self.0.children.first().cloned()
        }
        fn next_sibling(&self) -> Option<Self> {
            self.0.next.borrow().clone()
        }
        fn prev_sibling(&self) -> Option<Self> {
            None
        }
    }

    fn sample_tree() -> TreeNode {
        node("div", vec![leaf("span"), node("p", vec![leaf("a")]), leaf("span")])
    }

    #[test]
    fn pre_order_visits_in_document_order() {
        let tags: Vec<_> = Pre::new(sample_tree()).map(|n| n.0.tag).collect();
        assert_eq!(tags, vec!["div", "span", "p", "a", "span"]);
    }

    #[test]
    fn all_filters_by_selector() {
        let selector = Selector::Element("span".into());
        let tags: Vec<_> = all(&selector, sample_tree()).map(|n| n.0.tag).collect();
        assert_eq!(tags, vec!["span", "span"]);
    }

    #[test]
    fn first_returns_first_match_in_document_order() {
        let selector = Selector::Universal;
        let found = first(&selector, sample_tree()).unwrap();
        assert_eq!(found.0.tag, "div");
    }

    #[test]
    fn first_returns_none_when_nothing_matches() {
        let selector = Selector::Element("table".into());
        assert!(first(&selector, sample_tree()).is_none());
    }
}
