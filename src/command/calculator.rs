//! Arithmetic for the calculate intent
//!
//! A small tokenizer and recursive-descent parser over decimal numbers,
//! `+ - * /`, unary minus and parentheses. Nothing else is accepted, so a
//! command can never smuggle anything but arithmetic into evaluation.

use serde_json::Value;
use std::fmt;

/// Parentheses and unary minus nest at most this deep
const MAX_DEPTH: usize = 64;

/// Operator chains add one tree level per operand; this bounds the depth
/// that `eval` and `Drop` recurse through
const MAX_TOKENS: usize = 256;

/// Largest magnitude reported as an integer (2^53)
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    BinOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    Empty,
    InvalidCharacter { ch: char, pos: usize },
    InvalidNumber(String),
    UnexpectedToken { found: String, pos: usize },
    UnexpectedEnd,
    TrailingInput { pos: usize },
    TooDeep,
    TooLong { tokens: usize },
    DivisionByZero,
    Overflow,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Empty => write!(f, "No expression to calculate"),
            EvalError::InvalidCharacter { ch, pos } => {
                write!(f, "Invalid character '{}' at position {}", ch, pos)
            }
            EvalError::InvalidNumber(text) => write!(f, "Invalid number '{}'", text),
            EvalError::UnexpectedToken { found, pos } => {
                write!(f, "Unexpected '{}' at position {}", found, pos)
            }
            EvalError::UnexpectedEnd => write!(f, "Unexpected end of expression"),
            EvalError::TrailingInput { pos } => {
                write!(f, "Unexpected input at position {}", pos)
            }
            EvalError::TooDeep => write!(f, "Expression nested too deeply"),
            EvalError::TooLong { tokens } => write!(
                f,
                "Expression too long ({} tokens, at most {})",
                tokens, MAX_TOKENS
            ),
            EvalError::DivisionByZero => write!(f, "Division by zero"),
            EvalError::Overflow => write!(f, "Result out of range"),
        }
    }
}

impl std::error::Error for EvalError {}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

impl Token {
    fn text(&self) -> String {
        match &self.kind {
            TokenKind::Number(n) => format_number(*n),
            TokenKind::Plus => "+".into(),
            TokenKind::Minus => "-".into(),
            TokenKind::Star => "*".into(),
            TokenKind::Slash => "/".into(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let kind = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(text.clone()))?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    pos: start,
                });
                continue;
            }
            other => return Err(EvalError::InvalidCharacter { ch: other, pos: i }),
        };
        tokens.push(Token { kind, pos: i });
        i += 1;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        Ok(())
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.term()?;
            left = Expr::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.unary()?;
            left = Expr::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    // unary := '-' unary | primary
    fn unary(&mut self) -> Result<Expr, EvalError> {
        if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Minus)) {
            self.cursor += 1;
            self.descend()?;
            let operand = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::Neg(Box::new(operand)));
        }
        self.primary()
    }

    // primary := number | '(' expr ')'
    fn primary(&mut self) -> Result<Expr, EvalError> {
        let token = self.next().ok_or(EvalError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::LParen => {
                self.descend()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(EvalError::UnexpectedToken {
                        found: other.text(),
                        pos: other.pos,
                    }),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            _ => Err(EvalError::UnexpectedToken {
                found: token.text(),
                pos: token.pos,
            }),
        }
    }
}

impl Expr {
    /// Parse an arithmetic expression
    pub fn parse(source: &str) -> Result<Expr, EvalError> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(EvalError::Empty);
        }
        if tokens.len() > MAX_TOKENS {
            return Err(EvalError::TooLong {
                tokens: tokens.len(),
            });
        }

        let mut parser = Parser {
            tokens,
            cursor: 0,
            depth: 0,
        };
        let expr = parser.expr()?;

        if let Some(extra) = parser.peek() {
            return Err(EvalError::TrailingInput { pos: extra.pos });
        }
        Ok(expr)
    }

    pub fn eval(&self) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Neg(operand) => -operand.eval()?,
            Expr::BinOp { op, left, right } => {
                let l = left.eval()?;
                let r = right.eval()?;
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => {
                        if r == 0.0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        l / r
                    }
                }
            }
        };

        if !value.is_finite() {
            return Err(EvalError::Overflow);
        }
        Ok(value)
    }
}

/// Parse and evaluate in one step
pub fn evaluate(source: &str) -> Result<f64, EvalError> {
    Expr::parse(source)?.eval()
}

fn is_exact_integer(value: f64) -> bool {
    value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT
}

/// Integral values print without a fractional part
pub fn format_number(value: f64) -> String {
    if is_exact_integer(value) {
        // -0.0 prints as 0
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// JSON form of a result; integral values become JSON integers
pub fn number_json(value: f64) -> Value {
    if is_exact_integer(value) {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
