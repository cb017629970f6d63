//! Expression parser.
//!
//! # Grammar
//!
//! ```text
//! expression  = conditional
//! conditional = or ("?" conditional ":" conditional)?
//! or          = and ("||" and)*
//! and         = equality ("&&" equality)*
//! equality    = additive (("==" / "!=") additive)*
//! additive    = unary ("+" unary)*
//! unary       = ("!" / "-") unary / postfix
//! postfix     = primary ("." name / "[" expression "]" / "(" arguments ")")*
//! primary     = number / string / "true" / "false" / "null" / name
//!             / "(" expression ")" / "{" entries "}" / "[" elements "]"
//! ```
//!
//! An expression may be wrapped in `${...}`.

use crate::core::value::Value;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Add,
}

/// A parsed expression
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Value),
    Variable(String),
    Object(Vec<(String, Expr)>),
    List(Vec<Expr>),
    Member {
        target: Box<Expr>,
        name: String,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Not(Box<Expr>),
    Negate(Box<Expr>),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

/// Expression parsing error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error at position {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Remove a `${...}` wrapper, if present
pub fn unwrap_expression(source: &str) -> &str {
    let trimmed = source.trim();
    trimmed
        .strip_prefix("${")
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(trimmed)
}

/// Recursive descent parser over characters
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse a complete expression, with or without `${...}`
    pub fn parse(source: &str) -> Result<Expr, ParseError> {
        let mut parser = Parser::new(unwrap_expression(source));
        parser.skip_whitespace();
        if parser.at_end() {
            return Err(parser.error("Empty expression"));
        }
        let expr = parser.parse_conditional()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(parser.error(format!(
                "Unexpected characters after expression: '{}'",
                &parser.input[parser.pos..]
            )));
        }
        Ok(expr)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            position: self.pos,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace, then consume `token` if it comes next
    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("Expected '{token}'")))
        }
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_or()?;
        if !self.eat("?") {
            return Ok(condition);
        }
        let then = self.parse_conditional()?;
        self.expect(":")?;
        let otherwise = self.parse_conditional()?;
        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat("||") {
            let right = self.parse_and()?;
            left = binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.eat("&&") {
            let right = self.parse_equality()?;
            left = binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = if self.eat("==") {
                BinaryOp::Eq
            } else if self.eat("!=") {
                BinaryOp::Ne
            } else {
                return Ok(left);
            };
            let right = self.parse_additive()?;
            left = binary(left, op, right);
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while self.eat("+") {
            let right = self.parse_unary()?;
            left = binary(left, BinaryOp::Add, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        // `!=` belongs to the equality level
        if self.input[self.pos..].starts_with('!') && !self.input[self.pos..].starts_with("!=") {
            self.pos += 1;
            return Ok(Expr::Not(Box::new(self.parse_unary()?)));
        }
        if self.eat("-") {
            return Ok(Expr::Negate(Box::new(self.parse_unary()?)));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(".") {
                self.skip_whitespace();
                let name = self
                    .parse_name()
                    .ok_or_else(|| self.error("Expected member name after '.'"))?;
                expr = Expr::Member {
                    target: Box::new(expr),
                    name,
                };
            } else if self.eat("[") {
                let index = self.parse_conditional()?;
                self.expect("]")?;
                expr = Expr::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.eat("(") {
                let arguments = self.parse_sequence(")")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    arguments,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();
        let c = self
            .peek()
            .ok_or_else(|| self.error("Unexpected end of expression"))?;

        match c {
            '(' => {
                self.pos += 1;
                let expr = self.parse_conditional()?;
                self.expect(")")?;
                Ok(expr)
            }
            '[' => {
                self.pos += 1;
                Ok(Expr::List(self.parse_sequence("]")?))
            }
            '{' => {
                self.pos += 1;
                self.parse_object()
            }
            '\'' | '"' => Ok(Expr::Literal(Value::String(self.parse_string()?))),
            c if c.is_ascii_digit() => self.parse_number(),
            _ => match self.parse_name() {
                Some(name) => Ok(match name.as_str() {
                    "true" => Expr::Literal(Value::Bool(true)),
                    "false" => Expr::Literal(Value::Bool(false)),
                    "null" => Expr::Literal(Value::Null),
                    _ => Expr::Variable(name),
                }),
                None => Err(self.error(format!("Unexpected character '{c}'"))),
            },
        }
    }

    /// Comma-separated expressions up to `close`
    fn parse_sequence(&mut self, close: &str) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_conditional()?);
            if self.eat(close) {
                return Ok(items);
            }
            self.expect(",")?;
        }
    }

    fn parse_object(&mut self) -> Result<Expr, ParseError> {
        let mut entries = Vec::new();
        if self.eat("}") {
            return Ok(Expr::Object(entries));
        }
        loop {
            self.skip_whitespace();
            let key = match self.peek() {
                Some('\'') | Some('"') => self.parse_string()?,
                _ => self
                    .parse_name()
                    .ok_or_else(|| self.error("Expected object key"))?,
            };
            self.expect(":")?;
            entries.push((key, self.parse_conditional()?));
            if self.eat("}") {
                return Ok(Expr::Object(entries));
            }
            self.expect(",")?;
        }
    }

    fn parse_name(&mut self) -> Option<String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            _ => return None,
        }
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.pos += c.len_utf8();
        }
        Some(self.input[start..self.pos].to_string())
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        let quote = self.consume().ok_or_else(|| self.error("Expected string"))?;
        let mut text = String::new();
        loop {
            match self.consume() {
                None => {
                    return Err(ParseError {
                        message: "Unterminated string".to_string(),
                        position: start,
                    })
                }
                Some('\\') => match self.consume() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(escaped) => text.push(escaped),
                    None => return Err(self.error("Unterminated escape sequence")),
                },
                Some(c) if c == quote => return Ok(text),
                Some(c) => text.push(c),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos;
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.'
                && !is_float
                && self.input[self.pos + 1..]
                    .chars()
                    .next()
                    .is_some_and(|next| next.is_ascii_digit())
            {
                is_float = true;
                self.pos += 1;
            } else {
                break;
            }
        }

        let text = &self.input[start..self.pos];
        let value = if is_float {
            text.parse::<f64>().map(Value::Float).ok()
        } else {
            text.parse::<i64>().map(Value::Integer).ok()
        };
        value.map(Expr::Literal).ok_or(ParseError {
            message: format!("Invalid number '{text}'"),
            position: start,
        })
    }
}

fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}
