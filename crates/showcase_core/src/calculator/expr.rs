//! Restricted arithmetic expression evaluator.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' expr ')'
//! number  := digits ['.' digits] | '.' digits | digits '.'
//! ```
//!
//! `%` is the remainder operator. Whitespace is ignored. Parentheses nest at
//! most `MAX_NESTING` deep.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Deepest parenthesis nesting accepted.
pub const MAX_NESTING: usize = 128;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Nothing to evaluate.
    Empty,
    UnexpectedChar { ch: char, offset: usize },
    MalformedNumber { literal: String, offset: usize },
    UnexpectedToken { offset: usize },
    UnexpectedEnd,
    UnclosedParen { offset: usize },
    /// Parentheses nest deeper than `MAX_NESTING`.
    TooDeep { offset: usize },
    DivisionByZero,
    NonFinite,
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty expression"),
            Self::UnexpectedChar { ch, offset } => {
                write!(f, "unexpected character `{ch}` at {offset}")
            }
            Self::MalformedNumber { literal, offset } => {
                write!(f, "malformed number `{literal}` at {offset}")
            }
            Self::UnexpectedToken { offset } => write!(f, "unexpected token at {offset}"),
            Self::UnexpectedEnd => write!(f, "expression ends unexpectedly"),
            Self::UnclosedParen { offset } => write!(f, "unclosed parenthesis opened at {offset}"),
            Self::TooDeep { offset } => {
                write!(f, "parentheses nested deeper than {MAX_NESTING} at {offset}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl Error for EvalError {}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

/// Evaluates `input` under the restricted grammar.
pub fn evaluate(input: &str) -> EvalResult<f64> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(&(_, offset)) = parser.tokens.get(parser.pos) {
        return Err(EvalError::UnexpectedToken { offset });
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Shortest decimal that round-trips; integral values carry no fraction.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.
        return "0".to_string();
    }
    format!("{value}")
}

fn tokenize(input: &str) -> EvalResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let mut literal = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' {
                        literal.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Number(parse_number(&literal, offset)?)
            }
            other => return Err(EvalError::UnexpectedChar { ch: other, offset }),
        };
        tokens.push((token, offset));
    }

    Ok(tokens)
}

fn parse_number(literal: &str, offset: usize) -> EvalResult<f64> {
    let malformed = || EvalError::MalformedNumber {
        literal: literal.to_string(),
        offset,
    };
    if literal == "." || literal.matches('.').count() > 1 {
        return Err(malformed());
    }
    literal.parse::<f64>().map_err(|_| malformed())
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let next = self.tokens.get(self.pos).copied();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn expr(&mut self) -> EvalResult<f64> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> EvalResult<f64> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value %= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    // Sign runs are folded in a loop so `-----1` costs no stack.
    fn unary(&mut self) -> EvalResult<f64> {
        let mut negate = false;
        loop {
            match self.peek() {
                Some(Token::Plus) => self.pos += 1,
                Some(Token::Minus) => {
                    self.pos += 1;
                    negate = !negate;
                }
                _ => break,
            }
        }
        let value = self.primary()?;
        Ok(if negate { -value } else { value })
    }

    fn primary(&mut self) -> EvalResult<f64> {
        match self.advance() {
            Some((Token::Number(value), _)) => Ok(value),
            Some((Token::LParen, open_offset)) => {
                if self.depth >= MAX_NESTING {
                    return Err(EvalError::TooDeep {
                        offset: open_offset,
                    });
                }
                self.depth += 1;
                let value = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((_, offset)) => Err(EvalError::UnexpectedToken { offset }),
                    None => Err(EvalError::UnclosedParen {
                        offset: open_offset,
                    }),
                }
            }
            Some((_, offset)) => Err(EvalError::UnexpectedToken { offset }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate, format_number, EvalError, MAX_NESTING};

    #[test]
    fn respects_precedence_and_associativity() {
        assert_eq!(evaluate("1+2*3").unwrap(), 7.0);
        assert_eq!(evaluate("10-4-3").unwrap(), 3.0);
        assert_eq!(evaluate("2*(3+4)").unwrap(), 14.0);
        assert_eq!(evaluate("8/4/2").unwrap(), 1.0);
    }

    #[test]
    fn supports_remainder_unary_and_decimals() {
        assert_eq!(evaluate("7%4").unwrap(), 3.0);
        assert_eq!(evaluate("-5+3").unwrap(), -2.0);
        assert_eq!(evaluate("5--3").unwrap(), 8.0);
        assert_eq!(evaluate(".5+1.").unwrap(), 1.5);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("   "), Err(EvalError::Empty));
        assert_eq!(evaluate("1+"), Err(EvalError::UnexpectedEnd));
        assert!(matches!(
            evaluate("1.2.3"),
            Err(EvalError::MalformedNumber { .. })
        ));
        assert!(matches!(
            evaluate("2 3"),
            Err(EvalError::UnexpectedToken { offset: 2 })
        ));
        assert!(matches!(
            evaluate("(1+2"),
            Err(EvalError::UnclosedParen { offset: 0 })
        ));
        assert!(matches!(
            evaluate("alert(1)"),
            Err(EvalError::UnexpectedChar { ch: 'a', .. })
        ));
    }

    #[test]
    fn long_sign_runs_fold_without_recursion() {
        let even = format!("{}1", "-".repeat(100_000));
        assert_eq!(evaluate(&even), Ok(1.0));

        let odd = format!("2*{}3", "-".repeat(99_999));
        assert_eq!(evaluate(&odd), Ok(-6.0));

        let mixed = format!("{}4", "+-".repeat(50_001));
        assert_eq!(evaluate(&mixed), Ok(-4.0));
    }

    #[test]
    fn deep_nesting_is_rejected_not_fatal() {
        let deep = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(
            evaluate(&deep),
            Err(EvalError::TooDeep {
                offset: MAX_NESTING
            })
        );

        let allowed = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(evaluate(&allowed), Ok(1.0));
    }

    #[test]
    fn zero_divisor_is_an_error() {
        assert_eq!(evaluate("1/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("1%0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn formats_like_a_pocket_calculator() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }
}
