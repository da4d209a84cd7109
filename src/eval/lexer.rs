// Lexer for linearized formulas.
// Supports: numbers (1, 2.5, .5, 1e3), identifiers (rev, Date, q1.total),
// operators + - * / ^, parentheses and commas. Whitespace separates tokens.

use crate::error::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl Lexeme {
    /// Human-readable name for error messages.
    pub fn describe(&self) -> String {
        match self {
            Lexeme::Number(n) => format!("number {}", n),
            Lexeme::Ident(name) => format!("identifier '{}'", name),
            Lexeme::Plus => "'+'".to_string(),
            Lexeme::Minus => "'-'".to_string(),
            Lexeme::Star => "'*'".to_string(),
            Lexeme::Slash => "'/'".to_string(),
            Lexeme::Caret => "'^'".to_string(),
            Lexeme::LParen => "'('".to_string(),
            Lexeme::RParen => "')'".to_string(),
            Lexeme::Comma => "','".to_string(),
        }
    }
}

/// A lexeme with the char offset it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub lexeme: Lexeme,
    pub position: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Spanned>, EvalError> {
    let mut out = Vec::new();
    let mut chars = input.chars().enumerate().peekable();

    while let Some(&(position, c)) = chars.peek() {
        let single = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '+' => Some(Lexeme::Plus),
            '-' => Some(Lexeme::Minus),
            '*' => Some(Lexeme::Star),
            '/' => Some(Lexeme::Slash),
            '^' => Some(Lexeme::Caret),
            '(' => Some(Lexeme::LParen),
            ')' => Some(Lexeme::RParen),
            ',' => Some(Lexeme::Comma),
            _ => None,
        };
        if let Some(lexeme) = single {
            chars.next();
            out.push(Spanned { lexeme, position });
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let mut literal = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    literal.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            // Exponent only when a digit (optionally signed) follows the 'e'
            if let Some(&(_, 'e' | 'E')) = chars.peek() {
                let mut lookahead = chars.clone();
                lookahead.next();
                let sign = match lookahead.peek() {
                    Some(&(_, s @ ('+' | '-'))) => {
                        lookahead.next();
                        Some(s)
                    }
                    _ => None,
                };
                if matches!(lookahead.peek(), Some(&(_, d)) if d.is_ascii_digit()) {
                    literal.push('e');
                    chars.next();
                    if let Some(s) = sign {
                        literal.push(s);
                        chars.next();
                    }
                    while let Some(&(_, d)) = chars.peek() {
                        if d.is_ascii_digit() {
                            literal.push(d);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }
            }
            let value: f64 = literal
                .parse()
                .map_err(|_| EvalError::InvalidNumber(literal.clone()))?;
            out.push(Spanned {
                lexeme: Lexeme::Number(value),
                position,
            });
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let mut name = String::new();
            while let Some(&(_, ch)) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                    name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            out.push(Spanned {
                lexeme: Lexeme::Ident(name),
                position,
            });
            continue;
        }

        return Err(EvalError::UnexpectedChar { ch: c, position });
    }

    Ok(out)
}
