//! The selector AST (§3.2). Pseudo-classes and pseudo-functions are
//! represented as tagged variants rather than by-name dispatch tables, so
//! unknown names are rejected once, at parse time, and matching never does
//! a map lookup (see DESIGN.md, "Registry of predicates").

use crate::nth::Nth;
use std::fmt;

/// The six attribute comparison operators of §4.4, plus bare presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    Present,
    Eq,
    Includes,
    DashMatch,
    Prefix,
    Suffix,
    Substring,
}

/// Static, argument-free pseudo-classes (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    Root,
    Empty,
    Checked,
    Disabled,
    Required,
    Enabled,
    Optional,
    ReadWrite,
    ReadOnly,
    FirstChild,
    LastChild,
    FirstOfType,
    LastOfType,
    OnlyChild,
    OnlyOfType,
}

impl PseudoClass {
    /// Looks up a pseudo-class by its bare name (no leading `:`).
    pub fn from_name(name: &str) -> Option<Self> {
        use PseudoClass::*;
        Some(match name {
            "root" => Root,
            "empty" => Empty,
            "checked" => Checked,
            "disabled" => Disabled,
            "required" => Required,
            "enabled" => Enabled,
            "optional" => Optional,
            "read-write" => ReadWrite,
            "read-only" => ReadOnly,
            "first-child" => FirstChild,
            "last-child" => LastChild,
            "first-of-type" => FirstOfType,
            "last-of-type" => LastOfType,
            "only-child" => OnlyChild,
            "only-of-type" => OnlyOfType,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        use PseudoClass::*;
        match self {
            Root => "root",
            Empty => "empty",
            Checked => "checked",
            Disabled => "disabled",
            Required => "required",
            Enabled => "enabled",
            Optional => "optional",
            ReadWrite => "read-write",
            ReadOnly => "read-only",
            FirstChild => "first-child",
            LastChild => "last-child",
            FirstOfType => "first-of-type",
            LastOfType => "last-of-type",
            OnlyChild => "only-child",
            OnlyOfType => "only-of-type",
        }
    }
}

/// Parameterised pseudo-functions (§4.4). Each variant already carries its
/// compiled predicate data (an [`Nth`] formula, or a nested [`Selector`]
/// for `:not`) — there is nothing left to compile at match time.
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoFunction {
    NthChild(Nth),
    NthLastChild(Nth),
    NthOfType(Nth),
    NthLastOfType(Nth),
    Not(Box<Selector>),
}

impl PseudoFunction {
    pub fn name(&self) -> &'static str {
        match self {
            PseudoFunction::NthChild(_) => "nth-child",
            PseudoFunction::NthLastChild(_) => "nth-last-child",
            PseudoFunction::NthOfType(_) => "nth-of-type",
            PseudoFunction::NthLastOfType(_) => "nth-last-of-type",
            PseudoFunction::Not(_) => "not",
        }
    }
}

/// The selector AST (§3.2). Immutable and acyclic once built; `compile`
/// is the only constructor a user calls, `Parser` is the only internal
/// constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    Element(String),
    Universal,
    Attribute {
        key: String,
        op: AttrOp,
        value: String,
    },
    PseudoClass(PseudoClass),
    PseudoFunction(PseudoFunction),
    /// Logical AND over a single node. Never empty; if an Element or
    /// Universal selector is present, it is always `sequence[0]`.
    Sequence(Vec<Selector>),
    Descendant {
        ancestor: Box<Selector>,
        descendant: Box<Selector>,
        direct: bool,
    },
    Sibling {
        predecessor: Box<Selector>,
        target: Box<Selector>,
        immediate: bool,
    },
    Union(Box<Selector>, Box<Selector>),
}

impl fmt::Display for AttrOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttrOp::Present => "",
            AttrOp::Eq => "=",
            AttrOp::Includes => "~=",
            AttrOp::DashMatch => "|=",
            AttrOp::Prefix => "^=",
            AttrOp::Suffix => "$=",
            AttrOp::Substring => "*=",
        };
        f.write_str(s)
    }
}

/// Reconstructs a canonical selector text for `selector`. Canonical
/// because the AST drops the original source (§1 Non-goals): `DIV` and
/// `div` both render as `div`, `.a.b` renders with classes in AST order,
/// and `nth-child` arguments render as `{a}n{+b}` rather than however the
/// user originally spelled them. Re-compiling the result always yields a
/// structurally identical AST (§8 invariant 1).
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Element(name) => write!(f, "{name}"),
            Selector::Universal => write!(f, "*"),
            Selector::Attribute { key, op: AttrOp::Present, .. } => write!(f, "[{key}]"),
            Selector::Attribute { key, op, value } => write!(f, "[{key}{op}\"{value}\"]"),
            Selector::PseudoClass(p) => write!(f, ":{}", p.name()),
            Selector::PseudoFunction(p) => match p {
                PseudoFunction::NthChild(n) => write!(f, ":nth-child({n})"),
                PseudoFunction::NthLastChild(n) => write!(f, ":nth-last-child({n})"),
                PseudoFunction::NthOfType(n) => write!(f, ":nth-of-type({n})"),
                PseudoFunction::NthLastOfType(n) => write!(f, ":nth-last-of-type({n})"),
                PseudoFunction::Not(inner) => write!(f, ":not({inner})"),
            },
            Selector::Sequence(parts) => {
                for part in parts {
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Selector::Descendant { ancestor, descendant, direct } => {
                if *direct {
                    write!(f, "{ancestor} > {descendant}")
                } else {
                    write!(f, "{ancestor} {descendant}")
                }
            }
            Selector::Sibling { predecessor, target, immediate } => {
                if *immediate {
                    write!(f, "{predecessor} + {target}")
                } else {
                    write!(f, "{predecessor} ~ {target}")
                }
            }
            Selector::Union(left, right) => write!(f, "{left}, {right}"),
        }
    }
}
