//! Recursive-descent parser over the lexer's token buffer (§4.2). A
//! single index serves as both `peek` and `next`; there is no separate
//! backup stack because the grammar never needs to un-consume more than
//! the token just peeked at.

use crate::ast::{AttrOp, PseudoClass, PseudoFunction, Selector};
use crate::error::ParseError;
use crate::lexer;
use crate::nth::parse_nth;
use crate::token::{Token, TokenKind};

/// Compiles `text` into an executable [`Selector`]. The only fallible
/// entry point; [`crate::must_compile`] wraps this and panics on error.
pub fn compile(text: &str) -> Result<Selector, ParseError> {
    let source = text.trim();
    let tokens = lexer::lex(source)?;
    let mut parser = Parser { source, tokens: &tokens, pos: 0 };
    let selector = parser.parse_selector()?;
    Ok(selector)
}

enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
    Union,
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek_kind() == TokenKind::Space {
            self.advance();
        }
    }

    /// `Selector := SimpleSequence (Combinator SimpleSequence)*`, folded
    /// left-associatively as each combinator is found.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut left = self.parse_simple_sequence()?;
        while let Some(comb) = self.parse_combinator()? {
            let right = self.parse_simple_sequence()?;
            left = combine(comb, left, right);
        }
        Ok(left)
    }

    /// Consumes leading spaces, then an explicit combinator if present;
    /// a lone run of spaces is the descendant combinator; anything else
    /// with no leading space means the sequence has ended.
    fn parse_combinator(&mut self) -> Result<Option<Combinator>, ParseError> {
        let mut saw_space = false;
        while self.peek_kind() == TokenKind::Space {
            self.advance();
            saw_space = true;
        }
        match self.peek_kind() {
            TokenKind::Combinator => {
                let text = self.peek().text.clone();
                let offset = self.peek().offset;
                self.advance();
                self.skip_spaces();
                match text.as_str() {
                    ">" => Ok(Some(Combinator::Child)),
                    "+" => Ok(Some(Combinator::AdjacentSibling)),
                    "~" => Ok(Some(Combinator::GeneralSibling)),
                    "," => Ok(Some(Combinator::Union)),
                    _ => Err(ParseError::BadCombinator { offset }),
                }
            }
            TokenKind::Eof => Ok(None),
            _ if saw_space => Ok(Some(Combinator::Descendant)),
            _ => Ok(None),
        }
    }

    /// `SimpleSequence := (Element | Universal)? Qualifier*`, at least one
    /// part required.
    fn parse_simple_sequence(&mut self) -> Result<Selector, ParseError> {
        let start_offset = self.peek().offset;
        let mut parts = Vec::new();

        match self.peek_kind() {
            TokenKind::Ident => {
                parts.push(Selector::Element(self.peek().text.to_ascii_lowercase()));
                self.advance();
            }
            TokenKind::Universal => {
                parts.push(Selector::Universal);
                self.advance();
            }
            _ => {}
        }

        loop {
            match self.peek_kind() {
                TokenKind::Class => {
                    parts.push(Selector::Attribute {
                        key: "class".to_string(),
                        op: AttrOp::Includes,
                        value: self.peek().text.clone(),
                    });
                    self.advance();
                }
                TokenKind::Id => {
                    parts.push(Selector::Attribute {
                        key: "id".to_string(),
                        op: AttrOp::Eq,
                        value: self.peek().text.to_ascii_lowercase(),
                    });
                    self.advance();
                }
                TokenKind::BracketOpen => parts.push(self.parse_attribute()?),
                TokenKind::PseudoClass => {
                    let name = self.peek().text.clone();
                    let offset = self.peek().offset;
                    self.advance();
                    let pseudo = PseudoClass::from_name(&name)
                        .ok_or(ParseError::UnknownPseudoClass { name, offset })?;
                    parts.push(Selector::PseudoClass(pseudo));
                }
                TokenKind::PseudoFunction => parts.push(self.parse_pseudo_function()?),
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(ParseError::EmptySimpleSequence { offset: start_offset });
        }
        if parts.len() == 1 {
            Ok(parts.into_iter().next().unwrap())
        } else {
            Ok(Selector::Sequence(parts))
        }
    }

    /// `Attribute := '[' Ident WS* (Matcher WS* (Ident | String) WS*)? ']'`
    fn parse_attribute(&mut self) -> Result<Selector, ParseError> {
        let open_offset = self.peek().offset;
        self.advance(); // '['
        self.skip_spaces();

        let key = match self.peek_kind() {
            TokenKind::Ident => {
                let key = self.peek().text.to_ascii_lowercase();
                self.advance();
                key
            }
            _ => return Err(ParseError::InvalidAttributeSelector { offset: open_offset }),
        };
        self.skip_spaces();

        let attr = match self.peek_kind() {
            TokenKind::BracketClose => Selector::Attribute { key, op: AttrOp::Present, value: String::new() },
            TokenKind::Matcher => {
                let op = match self.peek().text.as_str() {
                    "=" => AttrOp::Eq,
                    "~=" => AttrOp::Includes,
                    "|=" => AttrOp::DashMatch,
                    "^=" => AttrOp::Prefix,
                    "$=" => AttrOp::Suffix,
                    "*=" => AttrOp::Substring,
                    _ => return Err(ParseError::InvalidAttributeSelector { offset: open_offset }),
                };
                self.advance();
                self.skip_spaces();
                let value = match self.peek_kind() {
                    TokenKind::Ident | TokenKind::String => {
                        let value = self.peek().text.clone();
                        self.advance();
                        value
                    }
                    _ => return Err(ParseError::InvalidAttributeSelector { offset: open_offset }),
                };
                self.skip_spaces();
                Selector::Attribute { key, op, value }
            }
            _ => return Err(ParseError::InvalidAttributeSelector { offset: open_offset }),
        };

        match self.peek_kind() {
            TokenKind::BracketClose => self.advance(),
            _ => return Err(ParseError::InvalidAttributeSelector { offset: open_offset }),
        }
        Ok(attr)
    }

    /// `PseudoFunction := ':' Ident '(' RawArgs ')'`. The lexer has already
    /// consumed the opening paren into the `PseudoFunction` token itself;
    /// the closing paren is found here by scanning the token stream for a
    /// matching depth-0 `ParenClose`, since `:not(:not(...))` nests. The
    /// argument text is then re-sliced out of the *source string* — it was
    /// never meant to be interpreted by this lexer's grammar, only handed
    /// raw to `nth`'s own parser or recompiled whole for `not`.
    fn parse_pseudo_function(&mut self) -> Result<Selector, ParseError> {
        let name = self.peek().text.to_ascii_lowercase();
        let offset = self.peek().offset;
        self.advance();

        let args_start = self.peek().offset;
        let mut depth = 1usize;
        let mut scan = self.pos;
        loop {
            match self.tokens[scan].kind {
                TokenKind::PseudoFunction | TokenKind::ParenOpen => depth += 1,
                TokenKind::ParenClose => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Eof => break,
                _ => {}
            }
            scan += 1;
        }
        let args_end = self.tokens[scan].offset;
        let raw_args = self.source[args_start..args_end].trim();
        self.pos = scan;
        if self.peek_kind() == TokenKind::ParenClose {
            self.advance();
        }

        let func = match name.as_str() {
            "nth-child" => PseudoFunction::NthChild(parse_nth(raw_args)?),
            "nth-last-child" => PseudoFunction::NthLastChild(parse_nth(raw_args)?),
            "nth-of-type" => PseudoFunction::NthOfType(parse_nth(raw_args)?),
            "nth-last-of-type" => PseudoFunction::NthLastOfType(parse_nth(raw_args)?),
            "not" => {
                let inner = compile(raw_args).map_err(|e| ParseError::NotArgumentFailed(Box::new(e)))?;
                PseudoFunction::Not(Box::new(inner))
            }
            _ => return Err(ParseError::UnknownPseudoFunction { name, offset }),
        };
        Ok(Selector::PseudoFunction(func))
    }
}

fn combine(comb: Combinator, left: Selector, right: Selector) -> Selector {
    match comb {
        Combinator::Descendant => {
            Selector::Descendant { ancestor: Box::new(left), descendant: Box::new(right), direct: false }
        }
        Combinator::Child => {
            Selector::Descendant { ancestor: Box::new(left), descendant: Box::new(right), direct: true }
        }
        Combinator::AdjacentSibling => {
            Selector::Sibling { predecessor: Box::new(left), target: Box::new(right), immediate: true }
        }
        Combinator::GeneralSibling => {
            Selector::Sibling { predecessor: Box::new(left), target: Box::new(right), immediate: false }
        }
        Combinator::Union => Selector::Union(Box::new(left), Box::new(right)),
    }
}
