//! Лексический анализатор SQL для db-cli
//!
//! Преобразует входной SQL текст в последовательность токенов для дальнейшего парсинга.
//! В каждой позиции распознаватели пробуются в фиксированном порядке, первый
//! сработавший определяет токен. Поток всегда заканчивается ровно одним `Eof`.

use crate::common::{Error, Result};
use crate::parser::token::{Token, TokenKind};

/// Возвращает длину совпадения (в символах), начиная с позиции `at`
type Matcher = fn(&[char], usize) -> Option<usize>;

/// Распознаватель: вид токена и функция сопоставления.
///
/// `kind == None` означает, что совпадение отбрасывается (пробелы).
struct Recognizer {
    kind: Option<TokenKind>,
    matcher: Matcher,
}

/// Порядок важен: многосимвольные операторы идут раньше односимвольных,
/// ключевые слова раньше идентификаторов.
static RECOGNIZERS: [Recognizer; 8] = [
    Recognizer { kind: Some(TokenKind::Number), matcher: read_number },
    Recognizer { kind: Some(TokenKind::String), matcher: read_string_literal },
    Recognizer { kind: Some(TokenKind::Keyword), matcher: read_keyword },
    Recognizer { kind: Some(TokenKind::Identifier), matcher: read_identifier },
    Recognizer { kind: Some(TokenKind::Operator), matcher: read_comparison_operator },
    Recognizer { kind: Some(TokenKind::Operator), matcher: read_single_char_operator },
    Recognizer { kind: Some(TokenKind::Delimiter), matcher: read_delimiter },
    Recognizer { kind: None, matcher: read_whitespace },
];

/// Лексический анализатор SQL
pub struct Lexer {
    /// Исходный текст
    input: Vec<char>,
    /// Текущая позиция в тексте
    position: usize,
}

impl Lexer {
    /// Создает новый лексический анализатор
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Возвращает следующий токен; пробелы пропускаются
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            if self.position >= self.input.len() {
                return Ok(Token::eof(self.input.len()));
            }

            let start = self.position;
            let (kind, length) = self.recognize(start)?;
            self.position += length;

            if let Some(kind) = kind {
                let mut text: String = self.input[start..self.position].iter().collect();
                if kind == TokenKind::Keyword {
                    text.make_ascii_uppercase();
                }
                let token = Token::new(kind, text, start);
                log::trace!("token {}", token);
                return Ok(token);
            }
        }
    }

    /// Возвращает все токены из входного текста, включая завершающий `Eof`
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        log::debug!("tokenized {} characters into {} tokens", self.input.len(), tokens.len());
        Ok(tokens)
    }

    /// Пробует распознаватели по порядку
    fn recognize(&self, at: usize) -> Result<(Option<TokenKind>, usize)> {
        RECOGNIZERS
            .iter()
            .find_map(|r| {
                (r.matcher)(&self.input, at)
                    .filter(|&len| len > 0)
                    .map(|len| (r.kind, len))
            })
            .ok_or_else(|| Error::lex(at, self.input[at]))
    }
}

/// Разбивает исходный текст на токены
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}

// Функции сопоставления вынесены в отдельный файл
include!("lexer_readers.rs");
