//! Токены для SQL лексера db-cli
//!
//! Определяет виды токенов, которые распознаёт лексический анализатор, и
//! закрытый набор зарезервированных ключевых слов.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt;

/// Вид токена
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Целое число, возможно с ведущим `-`
    Number,
    /// Строка в одинарных кавычках
    String,
    /// Зарезервированное слово (всегда в верхнем регистре)
    Keyword,
    /// Имя таблицы или колонки
    Identifier,
    /// `=`, `!=`, `<`, `<=`, `>`, `>=`, `*`
    Operator,
    /// `(`, `)`, `,`, `;`
    Delimiter,
    /// Конец ввода
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Eof => "EOF",
        };
        write!(f, "{}", name)
    }
}

/// Токен с позицией и значением
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Смещение в символах от начала исходного текста
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, String::new(), position)
    }

    /// Проверяет вид и текст токена
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is(TokenKind::Keyword, keyword)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Содержимое строкового литерала без кавычек, `''` заменено на `'`.
    ///
    /// Для остальных видов токенов возвращает текст как есть.
    pub fn string_value(&self) -> String {
        if self.kind != TokenKind::String {
            return self.text.clone();
        }
        let inner = self
            .text
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .unwrap_or(&self.text);
        inner.replace("''", "'")
    }

    /// Описание токена для сообщений об ошибках
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Number => format!("number {}", self.text),
            TokenKind::String => format!("string {}", self.text),
            TokenKind::Keyword => format!("keyword {}", self.text),
            TokenKind::Identifier => format!("identifier '{}'", self.text),
            TokenKind::Operator => format!("operator '{}'", self.text),
            TokenKind::Delimiter => format!("'{}'", self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' @{}", self.kind, self.text, self.position)
    }
}

/// Зарезервированные слова грамматики
pub const KEYWORDS: [&str; 15] = [
    "SELECT", "FROM", "WHERE", "LIMIT", "INSERT", "INTO", "VALUES", "CREATE", "TABLE", "INT",
    "BIGINT", "TEXT", "AND", "OR", "NULL",
];

lazy_static! {
    static ref KEYWORD_SET: HashSet<&'static str> = KEYWORDS.iter().copied().collect();
}

/// Проверяет, является ли слово ключевым (без учёта регистра ASCII)
pub fn is_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(word.to_ascii_uppercase().as_str())
}
