// SQL Lexer Implementation
//
// This module tokenizes the restricted SQL dialect accepted by the query core.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// SQL Token types
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Keywords
    SELECT,
    FROM,
    WHERE,
    AND,
    ORDER,
    BY,
    ASC,
    DESC,
    INSERT,
    INTO,
    VALUES,
    UPDATE,
    SET,
    DELETE,

    // Literals
    STRING(String),
    INTEGER(i64),

    // Identifiers
    IDENTIFIER(String),

    // Punctuation
    STAR,           // *
    COMMA,          // ,
    LeftParen,      // (
    RightParen,     // )
    SEMICOLON,      // ;
    EQUALS,         // =

    // Special
    EOF,
}

/// A Token represents a lexical unit in the SQL text
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    /// Byte offset of the token's first character in the input
    pub offset: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}({})", self.token_type, self.literal)
    }
}

/// Lexing errors; the first one aborts the whole batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unterminated string literal starting at offset {0}")]
    UnterminatedString(usize),
    #[error("unrecognized character '{ch}' at offset {offset}")]
    UnrecognizedCharacter { ch: char, offset: usize },
    #[error("integer literal '{literal}' at offset {offset} is out of range")]
    IntegerOutOfRange { literal: String, offset: usize },
}

/// SQL Lexer for breaking a query string into tokens
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    offset: usize,
    ch: Option<char>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from a SQL query string
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars().peekable(),
            offset: 0,
            ch: None,
        };
        lexer.read_char();
        lexer
    }

    /// Read the next character from the input
    fn read_char(&mut self) -> Option<char> {
        if let Some(c) = self.ch {
            self.offset += c.len_utf8();
        }
        self.ch = self.input.next();
        self.ch
    }

    /// Peek at the next character without advancing
    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.ch {
            if ch.is_whitespace() {
                self.read_char();
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> String {
        let mut identifier = String::new();

        // First character is already in self.ch
        if let Some(ch) = self.ch {
            identifier.push(ch);
        }

        while let Some(next_ch) = self.peek_char() {
            if is_letter(next_ch) || next_ch.is_ascii_digit() {
                identifier.push(next_ch);
                self.read_char();
            } else {
                break;
            }
        }

        // Advance past the identifier
        self.read_char();

        identifier
    }

    /// Read a decimal integer, with an optional leading minus sign
    fn read_number(&mut self) -> String {
        let mut number = String::new();

        if let Some(ch) = self.ch {
            number.push(ch);
        }

        while let Some(next_ch) = self.peek_char() {
            if next_ch.is_ascii_digit() {
                number.push(next_ch);
                self.read_char();
            } else {
                break;
            }
        }

        // Advance past the number
        self.read_char();

        number
    }

    /// Read a single-quoted string literal; no escape processing
    fn read_string(&mut self, start: usize) -> Result<String, LexError> {
        let mut string = String::new();

        // Skip the opening quote in self.ch
        self.read_char();

        loop {
            match self.ch {
                Some('\'') => {
                    self.read_char();
                    return Ok(string);
                }
                Some(ch) => {
                    string.push(ch);
                    self.read_char();
                }
                None => return Err(LexError::UnterminatedString(start)),
            }
        }
    }

    /// Get the token type for an identifier (could be a keyword)
    fn lookup_identifier(&self, ident: &str) -> TokenType {
        match ident.to_uppercase().as_str() {
            "SELECT" => TokenType::SELECT,
            "FROM" => TokenType::FROM,
            "WHERE" => TokenType::WHERE,
            "AND" => TokenType::AND,
            "ORDER" => TokenType::ORDER,
            "BY" => TokenType::BY,
            "ASC" => TokenType::ASC,
            "DESC" => TokenType::DESC,
            "INSERT" => TokenType::INSERT,
            "INTO" => TokenType::INTO,
            "VALUES" => TokenType::VALUES,
            "UPDATE" => TokenType::UPDATE,
            "SET" => TokenType::SET,
            "DELETE" => TokenType::DELETE,
            _ => TokenType::IDENTIFIER(ident.to_string()),
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let start = self.offset;
        let mut token = Token {
            token_type: TokenType::EOF,
            literal: String::new(),
            offset: start,
        };

        match self.ch {
            Some(ch) => {
                token.literal = ch.to_string();

                match ch {
                    '*' => token.token_type = TokenType::STAR,
                    ',' => token.token_type = TokenType::COMMA,
                    '(' => token.token_type = TokenType::LeftParen,
                    ')' => token.token_type = TokenType::RightParen,
                    ';' => token.token_type = TokenType::SEMICOLON,
                    '=' => token.token_type = TokenType::EQUALS,
                    '\'' => {
                        let str_value = self.read_string(start)?;
                        token.literal = format!("'{}'", str_value);
                        token.token_type = TokenType::STRING(str_value);
                        return Ok(token); // read_string already advanced
                    }
                    '-' => {
                        // A minus sign only appears as the sign of an integer
                        match self.peek_char() {
                            Some(next_ch) if next_ch.is_ascii_digit() => {
                                let number = self.read_number();
                                token.literal = number.clone();
                                token.token_type = parse_integer(&number, start)?;
                                return Ok(token);
                            }
                            _ => {
                                return Err(LexError::UnrecognizedCharacter {
                                    ch,
                                    offset: start,
                                });
                            }
                        }
                    }
                    _ => {
                        if is_letter(ch) {
                            let identifier = self.read_identifier();
                            token.literal = identifier.clone();
                            token.token_type = self.lookup_identifier(&identifier);
                            return Ok(token); // read_identifier already advanced
                        } else if ch.is_ascii_digit() {
                            let number = self.read_number();
                            token.literal = number.clone();
                            token.token_type = parse_integer(&number, start)?;
                            return Ok(token); // read_number already advanced
                        } else {
                            return Err(LexError::UnrecognizedCharacter {
                                ch,
                                offset: start,
                            });
                        }
                    }
                }
            }
            None => {
                return Ok(token);
            }
        }

        self.read_char();
        Ok(token)
    }
}

/// Tokenize a full input, including the trailing EOF token.
/// The first lex error aborts the batch; no partial stream is returned.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let is_eof = token.token_type == TokenType::EOF;
        tokens.push(token);
        if is_eof {
            return Ok(tokens);
        }
    }
}

fn parse_integer(literal: &str, offset: usize) -> Result<TokenType, LexError> {
    literal
        .parse::<i64>()
        .map(TokenType::INTEGER)
        .map_err(|_| LexError::IntegerOutOfRange {
            literal: literal.to_string(),
            offset,
        })
}

/// Check if a character is a letter (for identifiers)
fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}
