//! `an+b` formula parsing and matching for the `nth-*` pseudo-function
//! family (§4.4, §4.5). Arguments are captured as raw text by the parser
//! (they are never tokenised by [`crate::lexer`]) and compiled once, here,
//! into a normalised `(a, b)` pair.

use crate::error::NthError;
use std::fmt;

/// A compiled `an+b` formula. `a == 0` degenerates to the simple case
/// `:nth-child(b)`, matching exactly one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nth {
    pub a: i64,
    pub b: i64,
}

impl Nth {
    /// `position` is 1-based, per the CSS definition of "the nth child".
    pub fn matches(&self, position: i64) -> bool {
        if self.a == 0 {
            return position == self.b;
        }
        let diff = position - self.b;
        diff % self.a == 0 && diff / self.a >= 0
    }
}

impl fmt::Display for Nth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0 {
            return write!(f, "{}", self.b);
        }
        write!(f, "{}n", self.a)?;
        if self.b > 0 {
            write!(f, "+{}", self.b)
        } else if self.b < 0 {
            write!(f, "{}", self.b)
        } else {
            Ok(())
        }
    }
}

/// Parses the text between the parentheses of a `nth-*` pseudo-function:
/// `odd`, `even`, a signed integer, or `[+-]?{A}n[ ]?[+-][ ]?{B}` with any
/// of the numeric parts optionally omitted (`n`, `-n`, `n+3`, `2n-1`...).
pub fn parse_nth(raw: &str) -> Result<Nth, NthError> {
    let s: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let s = s.to_ascii_lowercase();

    if s == "odd" {
        return Ok(Nth { a: 2, b: 1 });
    }
    if s == "even" {
        return Ok(Nth { a: 2, b: 0 });
    }

    let Some(n_pos) = s.find('n') else {
        let b = s.parse::<i64>().map_err(|_| NthError::BadArgument(raw.to_string()))?;
        return Ok(Nth { a: 0, b });
    };

    let a_part = &s[..n_pos];
    let a = match a_part {
        "" | "+" => 1,
        "-" => -1,
        _ => a_part.parse::<i64>().map_err(|_| NthError::BadArgument(raw.to_string()))?,
    };

    let b_part = &s[n_pos + 1..];
    let b = if b_part.is_empty() {
        0
    } else if let Some(rest) = b_part.strip_prefix('+') {
        rest.parse::<i64>().map_err(|_| NthError::BadArgument(raw.to_string()))?
    } else {
        b_part.parse::<i64>().map_err(|_| NthError::BadArgument(raw.to_string()))?
    };

    Ok(Nth { a, b })
}
