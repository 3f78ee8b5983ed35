// SQL Parser Implementation
//
// This module implements a recursive descent parser for the restricted SQL
// dialect, converting tokens from the lexer into an Abstract Syntax Tree.

use std::iter::Peekable;
use std::vec::IntoIter;

use thiserror::Error;

use super::ast::*;
use super::lexer::{tokenize, LexError, Token, TokenType};

/// SQL Parsing errors
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),
    #[error("expected {0:?}, found {1}")]
    ExpectedToken(TokenType, Token),
    #[error("invalid syntax at offset {offset}: {message}")]
    InvalidSyntax { message: String, offset: usize },
    #[error("empty statement batch")]
    EmptyBatch,
    #[error("unexpected end of input")]
    EndOfInput,
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// SQL Parser for constructing an AST from SQL tokens
pub struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    current_token: Option<Token>,
}

impl Parser {
    /// Create a new parser from a SQL query string.
    /// The whole input is tokenized up front; a lex error anywhere aborts.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = tokenize(input)?;
        Ok(Self::from_tokens(tokens))
    }

    /// Create a parser from a vector of tokens
    fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut parser = Parser {
            tokens: tokens.into_iter().peekable(),
            current_token: None,
        };

        parser.next_token();
        parser
    }

    /// Advance to the next token
    fn next_token(&mut self) -> Option<Token> {
        self.current_token = self.tokens.next();
        self.current_token.clone()
    }

    /// Byte offset of the current token, for diagnostics
    fn current_offset(&self) -> usize {
        self.current_token.as_ref().map_or(0, |token| token.offset)
    }

    /// Check if the current token matches the expected type, consuming it
    fn expect_token(&mut self, expected: TokenType) -> ParseResult<Token> {
        match self.current_token.clone() {
            Some(token) if matches_token_type(&token.token_type, &expected) => {
                let current = token;
                self.next_token();
                Ok(current)
            }
            Some(token) => Err(ParseError::ExpectedToken(expected, token)),
            None => Err(ParseError::EndOfInput),
        }
    }

    /// Check if the current token is of the given type
    fn current_token_is(&self, token_type: TokenType) -> bool {
        match &self.current_token {
            Some(token) => matches_token_type(&token.token_type, &token_type),
            None => false,
        }
    }

    /// Parse a `;`-separated batch of statements.
    /// A trailing semicolon is permitted; an empty batch is rejected.
    pub fn parse_batch(&mut self) -> ParseResult<Batch> {
        let mut statements = Vec::new();

        loop {
            // Swallow statement separators and stop cleanly at EOF
            while self.current_token_is(TokenType::SEMICOLON) {
                self.next_token();
            }
            if self.current_token_is(TokenType::EOF) {
                break;
            }

            statements.push(self.parse_statement()?);

            // A statement is followed by a separator or the end of input
            if self.current_token_is(TokenType::SEMICOLON) {
                self.next_token();
            } else if !self.current_token_is(TokenType::EOF) {
                return self.unexpected();
            }
        }

        if statements.is_empty() {
            return Err(ParseError::EmptyBatch);
        }

        log::debug!("parsed batch of {} statement(s)", statements.len());
        Ok(Batch { statements })
    }

    /// Parse a single SQL statement
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        match &self.current_token {
            Some(token) => match token.token_type {
                TokenType::SELECT => self.parse_select(),
                TokenType::INSERT => self.parse_insert(),
                TokenType::UPDATE => self.parse_update(),
                TokenType::DELETE => self.parse_delete(),
                _ => Err(ParseError::UnexpectedToken(token.clone())),
            },
            None => Err(ParseError::EndOfInput),
        }
    }

    /// Parse a SELECT statement
    fn parse_select(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::SELECT)?;

        let projection = self.parse_projection()?;

        self.expect_token(TokenType::FROM)?;
        let table = self.parse_identifier()?;

        let filter = self.parse_optional_filter()?;

        let order_by = if self.current_token_is(TokenType::ORDER) {
            self.next_token();
            self.expect_token(TokenType::BY)?;
            Some(self.parse_order_items()?)
        } else {
            None
        };

        Ok(Statement::Select(SelectStatement {
            table,
            projection,
            filter,
            order_by,
        }))
    }

    /// Parse the SELECT projection: `*`, a bare column list, or a
    /// parenthesized column list. The bare and parenthesized forms produce
    /// the same AST.
    fn parse_projection(&mut self) -> ParseResult<Projection> {
        match &self.current_token {
            Some(token) => match &token.token_type {
                TokenType::STAR => {
                    self.next_token();
                    Ok(Projection::All)
                }
                TokenType::IDENTIFIER(_) => {
                    let mut columns = vec![self.parse_identifier()?];
                    while self.current_token_is(TokenType::COMMA) {
                        self.next_token();
                        columns.push(self.parse_identifier()?);
                    }
                    Ok(Projection::Columns(columns))
                }
                TokenType::LeftParen => {
                    let columns = self.parse_column_list()?;
                    Ok(Projection::Columns(columns))
                }
                _ => Err(ParseError::UnexpectedToken(token.clone())),
            },
            None => Err(ParseError::EndOfInput),
        }
    }

    /// Parse a parenthesized, comma-separated, non-empty list of identifiers
    fn parse_column_list(&mut self) -> ParseResult<Vec<String>> {
        self.expect_token(TokenType::LeftParen)?;

        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_identifier()?);

            if self.current_token_is(TokenType::COMMA) {
                self.next_token();
                continue;
            }
            break;
        }

        self.expect_token(TokenType::RightParen)?;
        Ok(columns)
    }

    /// Parse an optional WHERE clause as a flat conjunction
    fn parse_optional_filter(&mut self) -> ParseResult<Option<Conjunction>> {
        if !self.current_token_is(TokenType::WHERE) {
            return Ok(None);
        }
        self.next_token();

        let mut comparisons = vec![self.parse_comparison()?];
        while self.current_token_is(TokenType::AND) {
            self.next_token();
            comparisons.push(self.parse_comparison()?);
        }

        Ok(Some(Conjunction(comparisons)))
    }

    /// Parse a single `column = literal` comparison.
    /// No other operator and no parenthesized sub-expression is accepted.
    fn parse_comparison(&mut self) -> ParseResult<Comparison> {
        let column = self.parse_identifier()?;
        self.expect_token(TokenType::EQUALS)?;
        let value = self.parse_literal()?;

        Ok(Comparison { column, value })
    }

    /// Parse ORDER BY items, each `ident [ASC|DESC]`
    fn parse_order_items(&mut self) -> ParseResult<Vec<OrderItem>> {
        let mut items = Vec::new();

        loop {
            let column = self.parse_identifier()?;

            let direction = if self.current_token_is(TokenType::ASC) {
                self.next_token();
                Direction::Asc
            } else if self.current_token_is(TokenType::DESC) {
                self.next_token();
                Direction::Desc
            } else {
                Direction::Asc
            };

            items.push(OrderItem { column, direction });

            if self.current_token_is(TokenType::COMMA) {
                self.next_token();
                continue;
            }
            break;
        }

        Ok(items)
    }

    /// Parse an INSERT statement
    fn parse_insert(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::INSERT)?;
        self.expect_token(TokenType::INTO)?;

        let table = self.parse_identifier()?;

        let columns = if self.current_token_is(TokenType::LeftParen) {
            Some(self.parse_column_list()?)
        } else {
            None
        };

        self.expect_token(TokenType::VALUES)?;

        let mut rows = Vec::new();
        let mut tuple_offsets = Vec::new();
        loop {
            tuple_offsets.push(self.current_offset());
            rows.push(self.parse_value_tuple()?);

            if self.current_token_is(TokenType::COMMA) {
                self.next_token();
                continue;
            }
            break;
        }

        // All tuples in one statement share one arity. Matching that arity
        // against the column list (explicit or implied by the schema) is a
        // validation-time concern.
        let arity = rows[0].len();
        if let Some(pos) = rows.iter().position(|row| row.len() != arity) {
            return Err(ParseError::InvalidSyntax {
                message: "VALUES tuples have mismatched arity".to_string(),
                offset: tuple_offsets[pos],
            });
        }

        Ok(Statement::Insert(InsertStatement {
            table,
            columns,
            rows,
        }))
    }

    /// Parse a parenthesized, non-empty tuple of literals
    fn parse_value_tuple(&mut self) -> ParseResult<Vec<Value>> {
        self.expect_token(TokenType::LeftParen)?;

        let mut values = Vec::new();
        loop {
            values.push(self.parse_literal()?);

            if self.current_token_is(TokenType::COMMA) {
                self.next_token();
                continue;
            }
            break;
        }

        self.expect_token(TokenType::RightParen)?;
        Ok(values)
    }

    /// Parse an UPDATE statement
    fn parse_update(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::UPDATE)?;

        let table = self.parse_identifier()?;

        self.expect_token(TokenType::SET)?;

        let mut assignments = Vec::new();
        loop {
            let column = self.parse_identifier()?;
            self.expect_token(TokenType::EQUALS)?;
            let value = self.parse_literal()?;
            assignments.push(Assignment { column, value });

            if self.current_token_is(TokenType::COMMA) {
                self.next_token();
                continue;
            }
            break;
        }

        let filter = self.parse_optional_filter()?;

        Ok(Statement::Update(UpdateStatement {
            table,
            assignments,
            filter,
        }))
    }

    /// Parse a DELETE statement
    fn parse_delete(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::DELETE)?;
        self.expect_token(TokenType::FROM)?;

        let table = self.parse_identifier()?;
        let filter = self.parse_optional_filter()?;

        Ok(Statement::Delete(DeleteStatement { table, filter }))
    }

    /// Parse an identifier
    fn parse_identifier(&mut self) -> ParseResult<String> {
        match &self.current_token {
            Some(token) => match &token.token_type {
                TokenType::IDENTIFIER(s) => {
                    let identifier = s.clone();
                    self.next_token();
                    Ok(identifier)
                }
                _ => Err(ParseError::ExpectedToken(
                    TokenType::IDENTIFIER(String::new()),
                    token.clone(),
                )),
            },
            None => Err(ParseError::EndOfInput),
        }
    }

    /// Parse a literal value (string or integer)
    fn parse_literal(&mut self) -> ParseResult<Value> {
        match &self.current_token {
            Some(token) => match &token.token_type {
                TokenType::INTEGER(val) => {
                    let val = *val;
                    self.next_token();
                    Ok(Value::Integer(val))
                }
                TokenType::STRING(s) => {
                    let s = s.clone();
                    self.next_token();
                    Ok(Value::String(s))
                }
                _ => Err(ParseError::UnexpectedToken(token.clone())),
            },
            None => Err(ParseError::EndOfInput),
        }
    }

    fn unexpected<T>(&self) -> ParseResult<T> {
        match &self.current_token {
            Some(token) => Err(ParseError::UnexpectedToken(token.clone())),
            None => Err(ParseError::EndOfInput),
        }
    }
}

/// Check if token matches expected type (handling payload variants by
/// discriminant)
fn matches_token_type(token_type: &TokenType, expected: &TokenType) -> bool {
    std::mem::discriminant(token_type) == std::mem::discriminant(expected)
}
