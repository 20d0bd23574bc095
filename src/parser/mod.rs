//! Парсер SQL для db-cli
//!
//! Конвейер: текст → токены (`lexer`) → AST (`parser`, `expression`).

pub mod ast;
pub mod expression;
pub mod lexer;
pub mod parser;
pub mod token;


// Переэкспортируем основные типы
pub use ast::*;
pub use lexer::{tokenize, Lexer};
pub use parser::{ParserSettings, SqlParser};
pub use token::{Token, TokenKind};

use crate::common::Result;

/// Разбирает один запрос: сначала лексер, затем парсер
pub fn parse_sql(source: &str) -> Result<Statement> {
    SqlParser::new(source)?.parse()
}
