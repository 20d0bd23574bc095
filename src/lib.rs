//! db-cli - фронтенд SQL на Rust
//!
//! Лексический и синтаксический анализ небольшого подмножества SQL
//! (CREATE TABLE, INSERT, SELECT с WHERE и LIMIT) в типизированное AST.
//! Ядро ничего не печатает и не завершает процесс: ошибки возвращаются
//! значениями, а решения о выводе и коде возврата принимает `cli`.

pub mod cli;
pub mod common;
pub mod parser;

pub use common::error::{Error, Result};
pub use parser::{parse_sql, tokenize, Statement};

/// Версия библиотеки
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
