//! Hand-written, single-pass, one-rune-lookahead lexer for CSS Selectors
//! Level 3. The driver state is [`Lexer::lex_default`]; sub-states handle
//! numbers, classes, ids, pseudo names and quoted strings. The lexer never
//! backtracks across an emitted token.

use crate::error::LexError;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token>,
}

/// Tokenise `input`, trimming leading and trailing whitespace first.
/// Returns the full token stream (logically EOF-terminated) or the first
/// lexical error encountered.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let trimmed = input.trim();
    let mut lexer = Lexer {
        input: trimmed,
        pos: 0,
        tokens: Vec::new(),
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c' | '\r' | '\n')
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (c as u32) >= 0x80
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

fn is_match_char(c: char) -> bool {
    matches!(c, '~' | '|' | '^' | '$' | '*')
}

fn is_combinator_char(c: char) -> bool {
    matches!(c, '+' | '~' | '>' | ',')
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn emit(&mut self, kind: TokenKind, start: usize) {
        let text = self.input[start..self.pos].to_string();
        self.tokens.push(Token::new(kind, text, start));
    }

    /// Emits a token whose lexeme starts at `text_start` (after a stripped
    /// sigil) but whose source offset is the sigil's own position.
    fn emit_from(&mut self, kind: TokenKind, offset: usize, text_start: usize) {
        let text = self.input[text_start..self.pos].to_string();
        self.tokens.push(Token::new(kind, text, offset));
    }

    fn run(&mut self) -> Result<(), LexError> {
        loop {
            if self.lex_default()? {
                return Ok(());
            }
        }
    }

    /// Runs one iteration of the default dispatch state. Returns `Ok(true)`
    /// once EOF has been emitted.
    fn lex_default(&mut self) -> Result<bool, LexError> {
        if matches!(self.peek(), Some(c) if is_whitespace(c)) {
            let start = self.pos;
            while matches!(self.peek(), Some(c) if is_whitespace(c)) {
                self.advance();
            }
            self.emit(TokenKind::Space, start);
        }

        let start = self.pos;
        let Some(c) = self.advance() else {
            self.emit(TokenKind::Eof, start);
            return Ok(true);
        };

        match c {
            c if is_match_char(c) && self.peek() == Some('=') => {
                self.advance();
                self.emit(TokenKind::Matcher, start);
            }
            '=' => self.emit(TokenKind::Matcher, start),
            c if is_combinator_char(c) => self.emit(TokenKind::Combinator, start),
            '[' => self.emit(TokenKind::BracketOpen, start),
            ']' => self.emit(TokenKind::BracketClose, start),
            '(' => self.emit(TokenKind::ParenOpen, start),
            ')' => self.emit(TokenKind::ParenClose, start),
            '*' => self.emit(TokenKind::Universal, start),
            c if is_digit(c) || (c == '.' && matches!(self.peek(), Some(d) if is_digit(d))) => {
                self.pos = start;
                self.lex_number(start)?;
            }
            '.' => self.lex_class(start)?,
            '#' => self.lex_id(start)?,
            ':' => self.lex_pseudo(start)?,
            '\'' | '"' => {
                self.pos = start;
                self.lex_string(start)?;
            }
            _ => {
                self.pos = start;
                self.lex_ident(start)?;
            }
        }
        Ok(false)
    }

    /// Optional leading `-`; first significant char must be a name-start
    /// char; remaining chars may be name chars.
    fn accept_identifier(&mut self, start: usize) -> Result<(), LexError> {
        if self.peek() == Some('-') {
            self.advance();
        }
        match self.peek() {
            Some(c) if is_name_start(c) => {
                self.advance();
            }
            _ => return Err(LexError::InvalidIdentifierStart { offset: start }),
        }
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.advance();
        }
        Ok(())
    }

    fn lex_class(&mut self, start: usize) -> Result<(), LexError> {
        let name_start = self.pos; // already consumed the leading '.'
        self.accept_identifier(start)?;
        self.emit_from(TokenKind::Class, start, name_start);
        Ok(())
    }

    fn lex_id(&mut self, start: usize) -> Result<(), LexError> {
        let name_start = self.pos; // already consumed the leading '#'
        match self.peek() {
            Some(c) if is_name_char(c) => {}
            _ => return Err(LexError::InvalidIdentifierStart { offset: start }),
        }
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.advance();
        }
        self.emit_from(TokenKind::Id, start, name_start);
        Ok(())
    }

    fn lex_pseudo(&mut self, start: usize) -> Result<(), LexError> {
        if self.peek() == Some(':') {
            return Err(LexError::InvalidPseudoElement { offset: start });
        }
        let name_start = self.pos; // already consumed the leading ':'
        self.accept_identifier(start)?;
        if self.peek() == Some('(') {
            self.emit_from(TokenKind::PseudoFunction, start, name_start);
            self.advance(); // consume '('
        } else {
            self.emit_from(TokenKind::PseudoClass, start, name_start);
        }
        Ok(())
    }

    fn lex_ident(&mut self, start: usize) -> Result<(), LexError> {
        self.accept_identifier(start)?;
        self.emit(TokenKind::Ident, start);
        Ok(())
    }

    fn lex_number(&mut self, start: usize) -> Result<(), LexError> {
        while matches!(self.peek(), Some(c) if is_digit(c)) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            if !matches!(self.peek(), Some(c) if is_digit(c)) {
                return Err(LexError::InvalidNumber { offset: start });
            }
            while matches!(self.peek(), Some(c) if is_digit(c)) {
                self.advance();
            }
        } else if self.pos == start {
            return Err(LexError::InvalidNumber { offset: start });
        }
        self.emit(TokenKind::Number, start);
        Ok(())
    }

    fn lex_string(&mut self, start: usize) -> Result<(), LexError> {
        let quote = self.advance().expect("caller checked quote char");
        let inner_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(LexError::UnterminatedString { offset: start }),
                Some(c) if c == quote => {
                    let inner_end = self.pos;
                    self.advance();
                    let text = self.input[inner_start..inner_end].to_string();
                    self.tokens.push(Token::new(TokenKind::String, text, start));
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }
}
