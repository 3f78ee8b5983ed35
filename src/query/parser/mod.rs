// SQL Parser Module
//
// This module is responsible for parsing SQL text and converting it into an
// abstract syntax tree (AST) representation.

// Re-export public components
pub mod lexer;
pub mod ast;
pub mod parser;

// Export key types
pub use self::parser::Parser;
pub use self::parser::ParseError;
pub use self::lexer::Lexer;
pub use self::lexer::LexError;
pub use self::lexer::Token;
pub use self::ast::Batch;
pub use self::ast::Statement;
