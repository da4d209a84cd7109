// Recursive-descent parser producing a small arithmetic AST.
//
//   expr    := term (('+' | '-') term)*
//   term    := unary (('*' | '/') unary)*
//   unary   := ('+' | '-') unary | power
//   power   := primary ('^' unary)?          right-associative
//   primary := NUMBER | IDENT '(' args ')' | IDENT | '(' expr ')'
//
// Every nesting path (sign, exponent, parens, call arguments) re-enters
// `unary`, so bounding its depth bounds the parser's stack. Operator chains
// build left-deep trees without recursing here, so the node count is capped
// too: evaluating and dropping the tree both recurse over it.

use super::lexer::{Lexeme, Spanned};
use crate::error::EvalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

/// Deepest `unary` nesting accepted before giving up.
pub const MAX_DEPTH: usize = 256;

/// Most operator and call nodes one expression may hold.
pub const MAX_NODES: usize = 1024;

pub fn parse(tokens: &[Spanned]) -> Result<Expr, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        nodes: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(extra) => Err(parser.unexpected(extra)),
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
    nodes: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Spanned> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, lexeme: &Lexeme) -> bool {
        if self.peek().map(|t| &t.lexeme) == Some(lexeme) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, lexeme: &Lexeme) -> Result<(), EvalError> {
        match self.next() {
            Some(t) if &t.lexeme == lexeme => Ok(()),
            Some(t) => Err(self.unexpected(t)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn node(&mut self, expr: Expr) -> Result<Expr, EvalError> {
        self.nodes += 1;
        if self.nodes > MAX_NODES {
            return Err(EvalError::TooLarge { limit: MAX_NODES });
        }
        Ok(expr)
    }

    fn binary(&mut self, op: BinaryOp, left: Expr, right: Expr) -> Result<Expr, EvalError> {
        self.node(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn unexpected(&self, token: &Spanned) -> EvalError {
        EvalError::UnexpectedToken {
            found: token.lexeme.describe(),
            position: token.position,
        }
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.term()?;
        loop {
            let op = if self.eat(&Lexeme::Plus) {
                BinaryOp::Add
            } else if self.eat(&Lexeme::Minus) {
                BinaryOp::Sub
            } else {
                return Ok(left);
            };
            let right = self.term()?;
            left = self.binary(op, left, right)?;
        }
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.unary()?;
        loop {
            let op = if self.eat(&Lexeme::Star) {
                BinaryOp::Mul
            } else if self.eat(&Lexeme::Slash) {
                BinaryOp::Div
            } else {
                return Ok(left);
            };
            let right = self.unary()?;
            left = self.binary(op, left, right)?;
        }
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let expr = self.signed();
        self.depth -= 1;
        expr
    }

    fn signed(&mut self) -> Result<Expr, EvalError> {
        if self.eat(&Lexeme::Minus) {
            let inner = self.unary()?;
            return self.node(Expr::Negate(Box::new(inner)));
        }
        if self.eat(&Lexeme::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.primary()?;
        if self.eat(&Lexeme::Caret) {
            let exponent = self.unary()?;
            return self.binary(BinaryOp::Pow, base, exponent);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let token = self.next().ok_or(EvalError::UnexpectedEnd)?;
        match &token.lexeme {
            Lexeme::Number(n) => Ok(Expr::Number(*n)),
            Lexeme::Ident(name) => {
                if self.eat(&Lexeme::LParen) {
                    let args = self.arguments()?;
                    self.node(Expr::Call {
                        name: name.clone(),
                        args,
                    })
                } else {
                    Ok(Expr::Variable(name.clone()))
                }
            }
            Lexeme::LParen => {
                let inner = self.expr()?;
                self.expect(&Lexeme::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected(token)),
        }
    }

    // Called after the opening paren has been consumed
    fn arguments(&mut self) -> Result<Vec<Expr>, EvalError> {
        let mut args = Vec::new();
        if self.eat(&Lexeme::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            if self.eat(&Lexeme::Comma) {
                continue;
            }
            self.expect(&Lexeme::RParen)?;
            return Ok(args);
        }
    }
}
