//! Expression parser
//!
//! The input is tokenized first, then a recursive descent parser builds the
//! AST with standard arithmetic precedence.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{ExprError, ExprResult};

/// Parse an expression string into an AST
///
/// # Example
/// ```rust
/// use formulary_expr::parse_expression;
///
/// let ast = parse_expression("m * cp * (Tout - Tin)").unwrap();
/// let ast = parse_expression("sqrt(a^2 + b^2)").unwrap();
/// assert!(parse_expression("(1 + 2").is_err());
/// ```
pub fn parse_expression(expression: &str) -> ExprResult<Expr> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(ExprError::Parse("Empty expression".into()));
    }

    let mut parser = ExprParser::new(tokens);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if !parser.is_at_end() {
        return Err(ExprError::Parse(format!(
            "Unexpected {} after expression",
            parser.current_token().describe()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Comma,

    // Delimiters
    LeftParen,
    RightParen,

    // End of input
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Identifier(name) => format!("'{}'", name),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::Caret => "'^'".into(),
            Token::Comma => "','".into(),
            Token::LeftParen => "'('".into(),
            Token::RightParen => "')'".into(),
            Token::Eof => "end of expression".into(),
        }
    }
}

fn tokenize(input: &str) -> ExprResult<Vec<Token>> {
    let mut lexer = Lexer { input, pos: 0 };
    let mut tokens = Vec::new();

    loop {
        match lexer.scan_token()? {
            Token::Eof => break,
            token => tokens.push(token),
        }
    }

    Ok(tokens)
}

/// Character scanner
struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn scan_token(&mut self) -> ExprResult<Token> {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        // Single-character tokens
        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Caret),
            ',' => Some(Token::Comma),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        // Number
        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        // Identifier
        if c.is_alphabetic() || c == '_' {
            return Ok(self.scan_identifier());
        }

        Err(ExprError::Parse(format!(
            "Unexpected character '{}' at position {}",
            c,
            self.input[..self.pos].chars().count() + 1
        )))
    }

    fn scan_number(&mut self) -> ExprResult<Token> {
        let start = self.pos;

        // Integer part
        self.skip_digits();

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Exponent part, only when digits follow
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            let first = match self.peek_char_at(1) {
                Some('+') | Some('-') => self.peek_char_at(2),
                other => other,
            };
            if first.map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
                if self.peek_char().map_or(false, |c| c == '+' || c == '-') {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        let text = &self.input[start..self.pos];
        text.parse()
            .map(Token::Number)
            .map_err(|_| ExprError::Parse(format!("Invalid number '{}'", text)))
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        Token::Identifier(self.input[start..self.pos].to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }
}

/// Deepest expression tree the parser builds. Evaluation and drop recurse
/// over the tree, so this bounds their stack use too.
pub const MAX_DEPTH: usize = 256;

/// Expression parser over a token stream
struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    /// Nesting of the node being built: open parentheses, prefix operators
    /// and operator chains all count
    depth: usize,
}

impl ExprParser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn enter(&mut self) -> ExprResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::Parse("Expression nested too deeply".into()));
        }
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current_token(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> ExprResult<()> {
        if self.current_token() == expected {
            self.consume();
            Ok(())
        } else {
            Err(ExprError::Parse(format!(
                "Expected {}, got {}",
                expected.describe(),
                self.current_token().describe()
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Unary: -, +
    // 4. Exponentiation: ^ (right associative, binds tighter than a leading minus)
    // 5. Primary: literals, variables, function calls, parentheses

    fn parse_expression(&mut self) -> ExprResult<Expr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        let mut levels = 0;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            // Each operator adds a level on the left spine
            self.enter()?;
            levels += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        self.depth -= levels;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_unary()?;
        let mut levels = 0;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume();
            // Each operator adds a level on the left spine
            self.enter()?;
            levels += 1;
            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        self.depth -= levels;
        Ok(left)
    }

    fn parse_unary(&mut self) -> ExprResult<Expr> {
        // Every nested subexpression passes through here
        self.enter()?;
        let expr = self.parse_prefixed()?;
        self.depth -= 1;
        Ok(expr)
    }

    fn parse_prefixed(&mut self) -> ExprResult<Expr> {
        // Prefix unary minus
        if matches!(self.current_token(), Token::Minus) {
            self.consume();
            let operand = self.parse_unary()?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(operand),
            });
        }

        // Prefix plus (no-op)
        if matches!(self.current_token(), Token::Plus) {
            self.consume();
            return self.parse_unary();
        }

        self.parse_power()
    }

    fn parse_power(&mut self) -> ExprResult<Expr> {
        let base = self.parse_primary()?;

        if matches!(self.current_token(), Token::Caret) {
            self.consume();
            // Right associative; the exponent may carry its own sign
            let exponent = self.parse_unary()?;
            return Ok(Expr::BinaryOp {
                op: BinaryOperator::Power,
                left: Box::new(base),
                right: Box::new(exponent),
            });
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> ExprResult<Expr> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume();
                Ok(Expr::Number(n))
            }

            Token::Identifier(name) => {
                self.consume();
                if matches!(self.current_token(), Token::LeftParen) {
                    self.parse_function_call(name)
                } else {
                    Ok(Expr::Variable(name))
                }
            }

            Token::LeftParen => {
                self.consume();
                if matches!(self.current_token(), Token::RightParen) {
                    return Err(ExprError::Parse("Empty parentheses".into()));
                }
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::Eof => Err(ExprError::Parse("Unexpected end of expression".into())),

            other => Err(ExprError::Parse(format!("Unexpected {}", other.describe()))),
        }
    }

    fn parse_function_call(&mut self, name: String) -> ExprResult<Expr> {
        self.expect(&Token::LeftParen)?;

        let mut args = Vec::new();

        // Parse arguments
        if !matches!(self.current_token(), Token::RightParen) {
            args.push(self.parse_expression()?);

            while matches!(self.current_token(), Token::Comma) {
                self.consume();
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightParen)?;

        Ok(Expr::Function { name, args })
    }
}
