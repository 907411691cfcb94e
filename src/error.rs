//! Compile-time error kinds for the lexer, parser and `an+b` argument
//! compiler. All are `thiserror`-derived, mirroring how `ast-grep-core`
//! reports `PatternError` and `KindMatcherError`. Matching itself is
//! infallible, so there is no error type here for that stage.

use thiserror::Error;

/// Errors raised while tokenising a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },
    #[error("invalid use of pseudo element '::' at byte {offset}")]
    InvalidPseudoElement { offset: usize },
    #[error("invalid identifier start at byte {offset}")]
    InvalidIdentifierStart { offset: usize },
    #[error("invalid number at byte {offset}")]
    InvalidNumber { offset: usize },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedString { offset }
            | LexError::InvalidPseudoElement { offset }
            | LexError::InvalidIdentifierStart { offset }
            | LexError::InvalidNumber { offset } => *offset,
        }
    }
}

/// Errors raised while parsing `an+b` arguments to a pseudo-function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NthError {
    #[error("invalid an+b argument: '{0}'")]
    BadArgument(String),
}

/// Errors raised while recursive-descent parsing a token stream into a
/// [`crate::ast::Selector`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("empty simple selector sequence at byte {offset}")]
    EmptySimpleSequence { offset: usize },
    #[error("invalid attribute selector at byte {offset}")]
    InvalidAttributeSelector { offset: usize },
    #[error("unknown pseudo-class ':{name}' at byte {offset}")]
    UnknownPseudoClass { name: String, offset: usize },
    #[error("unknown pseudo-function ':{name}(' at byte {offset}")]
    UnknownPseudoFunction { name: String, offset: usize },
    #[error("bad combinator at byte {offset}")]
    BadCombinator { offset: usize },
    #[error(transparent)]
    BadNthArgument(#[from] NthError),
    #[error("argument to ':not(...)' failed to compile: {0}")]
    NotArgumentFailed(Box<ParseError>),
}

/// The single error type [`crate::compile`] returns.
pub type CompileError = ParseError;
