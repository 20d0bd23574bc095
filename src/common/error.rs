//! Обработка ошибок для db-cli

use crate::common::constants::ERROR_CONTEXT_RADIUS;
use thiserror::Error;

/// Основной тип ошибки для db-cli
#[derive(Error, Debug)]
pub enum Error {
    /// Ни один распознаватель лексера не подошёл к символу
    #[error("Lexical error at position {position}: unexpected character '{character}'")]
    Lex { position: usize, character: char },

    /// Токен есть, но грамматически недопустим в текущей позиции
    #[error("Syntax error at position {position}: {message} (near '{context}')")]
    Syntax {
        position: usize,
        message: String,
        context: String,
    },

    /// Ошибка I/O операций
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации AST
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Ошибка конфигурации
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Ошибка валидации входных данных
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Тип результата для db-cli
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Создает лексическую ошибку
    pub fn lex(position: usize, character: char) -> Self {
        Self::Lex {
            position,
            character,
        }
    }

    /// Создает синтаксическую ошибку с фрагментом исходного текста вокруг `position`
    pub fn syntax(source: &str, position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
            context: error_context(source, position),
        }
    }

    /// Создает ошибку конфигурации
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Создает ошибку валидации
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Позиция ошибки в исходном тексте, если она известна
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lex { position, .. } | Self::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Вырезает около `ERROR_CONTEXT_RADIUS` символов до и после `position`.
///
/// Позиции считаются в символах, а не в байтах; границы обрезаются по краям текста.
pub fn error_context(source: &str, position: usize) -> String {
    let start = position.saturating_sub(ERROR_CONTEXT_RADIUS);
    let end = position.saturating_add(ERROR_CONTEXT_RADIUS);
    source
        .chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}
