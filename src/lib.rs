//! Compiles a textual CSS selector (a subset of CSS Selectors Level 3)
//! into an executable [`Selector`] and matches it against nodes of an
//! externally supplied, HTML-like tree.
//!
//! The pipeline is strictly one-way: text → tokens ([`lexer`]) → AST
//! ([`ast`], [`parser`]) → predicate ([`matcher`]). Matching itself is
//! infallible; all errors are compile-time and reported through
//! [`error::CompileError`].
//!
//! ```
//! use css_select::{compile, all};
//! # fn use_it<N: css_select::dom::Node>(root: N) {
//! let selector = compile("p.a").unwrap();
//! let found: Vec<_> = all(&selector, root).collect();
//! # }
//! ```

pub mod ast;
pub mod dom;
pub mod error;
pub mod lexer;
pub mod matcher;
pub mod nth;
pub mod parser;
#[cfg(test)]
mod test_dom;
pub mod token;
pub mod traversal;

pub use ast::Selector;
pub use dom::{Node, NodeKind};
pub use error::CompileError;
pub use traversal::{all, first};

/// Compiles `text` into a [`Selector`], or the first error encountered.
pub fn compile(text: &str) -> Result<Selector, CompileError> {
    parser::compile(text)
}

/// Compiles `text`, panicking on error. Intended for selectors that are
/// constants in the calling program, not for untrusted input.
pub fn must_compile(text: &str) -> Selector {
    compile(text).unwrap_or_else(|e| panic!("must_compile({text:?}): {e}"))
}
