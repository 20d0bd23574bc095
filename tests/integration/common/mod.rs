//! Общие утилиты для интеграционных тестов

#![allow(dead_code)]

use clap::Parser;
use db_cli::cli::Cli;
use db_cli::common::CliConfig;
use db_cli::{parse_sql, Error, Result, Statement};

/// Разбирает запрос; при ошибке тест падает с текстом ошибки
pub fn parse_ok(sql: &str) -> Statement {
    parse_sql(sql).unwrap_or_else(|e| panic!("Не удалось разобрать {:?}: {}", sql, e))
}

/// Разбирает запрос, ожидая синтаксическую ошибку; возвращает позицию и сообщение
pub fn parse_syntax_err(sql: &str) -> (usize, String) {
    match parse_sql(sql) {
        Err(Error::Syntax {
            position, message, ..
        }) => (position, message),
        other => panic!("Ожидалась синтаксическая ошибка для {:?}, получено {:?}", sql, other),
    }
}

/// Собирает CLI из аргументов (без имени программы)
pub fn cli(args: &[&str]) -> Cli {
    let argv = std::iter::once("db-cli").chain(args.iter().copied());
    Cli::try_parse_from(argv).unwrap_or_else(|e| panic!("Неверные аргументы {:?}: {}", args, e))
}

/// Запускает CLI с конфигурацией по умолчанию
pub fn run_cli(args: &[&str]) -> Result<String> {
    cli(args).execute(&CliConfig::default())
}
