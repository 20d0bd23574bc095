//! Парсер SQL для db-cli

use crate::common::{Error, Result, DEFAULT_MAX_RECURSION_DEPTH};
use crate::parser::ast::*;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};

/// Рекурсивный парсер SQL с предиктивным анализом.
///
/// Один курсор по готовому потоку токенов, без отката: каждая продукция либо
/// потребляет токен, либо завершается ошибкой.
pub struct SqlParser<'a> {
    /// Исходный текст, нужен для фрагмента в сообщениях об ошибках
    source: &'a str,
    tokens: Vec<Token>,
    cursor: usize,
    /// Настройки парсера
    settings: ParserSettings,
    /// Текущая глубина вложенности скобок
    depth: usize,
}

/// Настройки парсера
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserSettings {
    /// Максимальная глубина вложенности выражений в скобках
    pub max_recursion_depth: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

impl<'a> SqlParser<'a> {
    /// Создает новый парсер SQL, разбивая текст на токены
    pub fn new(source: &'a str) -> Result<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(source, tokens))
    }

    /// Создает парсер по уже готовому потоку токенов.
    ///
    /// Если поток не заканчивается `Eof`, маркер добавляется в конец текста.
    pub fn from_tokens(source: &'a str, mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            tokens.push(Token::eof(source.chars().count()));
        }
        Self {
            source,
            tokens,
            cursor: 0,
            settings: ParserSettings::default(),
            depth: 0,
        }
    }

    /// Заменяет настройки парсера
    pub fn with_settings(mut self, settings: ParserSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Парсит один SQL запрос вместе с необязательной `;` в конце
    pub fn parse(&mut self) -> Result<Statement> {
        let statement = self.parse_statement()?;

        if self.check(TokenKind::Delimiter, ";") {
            self.advance();
        }
        if !self.current().is_eof() {
            return Err(self.error(format!(
                "Unexpected {} after end of statement",
                self.current().describe()
            )));
        }

        Ok(statement)
    }

    /// Выбирает парсер по первому ключевому слову
    fn parse_statement(&mut self) -> Result<Statement> {
        let token = self.current();
        log::debug!("dispatching statement on {}", token);

        if token.is_keyword("CREATE") {
            self.parse_create_table()
        } else if token.is_keyword("INSERT") {
            self.parse_insert()
        } else if token.is_keyword("SELECT") {
            self.parse_select()
        } else {
            Err(self.error(format!(
                "Expected CREATE, INSERT or SELECT, found {}",
                token.describe()
            )))
        }
    }
}

impl<'a> SqlParser<'a> {
    /// Текущий токен; после конца потока всегда `Eof`
    pub(crate) fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.cursor.min(last)]
    }

    /// Переходит к следующему токену и возвращает потреблённый
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.cursor += 1;
        }
        token
    }

    /// Проверяет вид и текст текущего токена
    pub(crate) fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.current().is(kind, text)
    }

    pub(crate) fn check_keyword(&self, keyword: &str) -> bool {
        self.current().is_keyword(keyword)
    }

    /// Ожидает определенный токен и переходит к следующему
    pub(crate) fn expect(&mut self, kind: TokenKind, text: &str) -> Result<Token> {
        if self.check(kind, text) {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "Expected '{}', found {}",
                text,
                self.current().describe()
            )))
        }
    }

    /// Ожидает ключевое слово
    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> Result<Token> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "Expected {}, found {}",
                keyword,
                self.current().describe()
            )))
        }
    }

    /// Входит в выражение в скобках, стоя на `(`
    pub(crate) fn enter_group(&mut self) -> Result<()> {
        if self.depth >= self.settings.max_recursion_depth {
            return Err(self.error(format!(
                "Expression nesting exceeds maximum depth of {}",
                self.settings.max_recursion_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Ошибка в позиции текущего токена
    pub(crate) fn error(&self, message: impl Into<String>) -> Error {
        Error::syntax(self.source, self.current().position, message)
    }

    /// Парсит идентификатор
    fn parse_identifier(&mut self, what: &str) -> Result<String> {
        if self.current().kind == TokenKind::Identifier {
            Ok(self.advance().text)
        } else {
            Err(self.error(format!(
                "Expected {}, found {}",
                what,
                self.current().describe()
            )))
        }
    }

    /// После элемента списка: `,` продолжает, `)` завершает
    fn list_continues(&mut self) -> Result<bool> {
        if self.check(TokenKind::Delimiter, ",") {
            self.advance();
            Ok(true)
        } else if self.check(TokenKind::Delimiter, ")") {
            self.advance();
            Ok(false)
        } else {
            Err(self.error(format!(
                "Expected ',' or ')', found {}",
                self.current().describe()
            )))
        }
    }

    // CREATE TABLE <identifier> ( <coldef> (, <coldef>)* )
    fn parse_create_table(&mut self) -> Result<Statement> {
        self.expect_keyword("CREATE")?;
        self.expect_keyword("TABLE")?;

        let table_name = self.parse_identifier("table name")?;
        self.expect(TokenKind::Delimiter, "(")?;

        let mut columns = Vec::new();
        loop {
            let name = self.parse_identifier("column name")?;
            let data_type = self.parse_data_type()?;
            columns.push(ColumnDefinition { name, data_type });

            if !self.list_continues()? {
                break;
            }
        }

        Ok(Statement::CreateTable(CreateTableStatement {
            table_name,
            columns,
        }))
    }

    fn parse_data_type(&mut self) -> Result<DataType> {
        let token = self.current();
        let data_type = match token.kind {
            TokenKind::Keyword => DataType::from_keyword(&token.text),
            _ => None,
        };

        match data_type {
            Some(data_type) => {
                self.advance();
                Ok(data_type)
            }
            None => {
                let shown = if token.is_eof() {
                    "<end of input>".to_string()
                } else {
                    token.text.to_ascii_uppercase()
                };
                Err(self.error(format!("Unsupported data type {}", shown)))
            }
        }
    }

    // INSERT INTO <identifier> VALUES ( <expr> (, <expr>)* )
    fn parse_insert(&mut self) -> Result<Statement> {
        self.expect_keyword("INSERT")?;
        self.expect_keyword("INTO")?;

        let table_name = self.parse_identifier("table name")?;
        self.expect_keyword("VALUES")?;
        self.expect(TokenKind::Delimiter, "(")?;

        let mut values = Vec::new();
        loop {
            values.push(self.parse_expression()?);

            if !self.list_continues()? {
                break;
            }
        }

        Ok(Statement::Insert(InsertStatement { table_name, values }))
    }

    // SELECT projection FROM <identifier> [WHERE expr] [LIMIT <number>]
    fn parse_select(&mut self) -> Result<Statement> {
        self.expect_keyword("SELECT")?;

        let projections = self.parse_projection()?;

        self.expect_keyword("FROM")?;
        let from_table = self.parse_identifier("table name")?;

        let selection = if self.check_keyword("WHERE") {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };

        let limit = if self.check_keyword("LIMIT") {
            self.advance();
            Some(self.parse_limit()?)
        } else {
            None
        };

        Ok(Statement::Select(SelectStatement {
            projections,
            from_table,
            selection,
            limit,
        }))
    }

    fn parse_projection(&mut self) -> Result<Projection> {
        if self.check(TokenKind::Operator, "*") {
            self.advance();
            return Ok(Projection::Wildcard);
        }

        let mut columns = vec![self.parse_identifier("column name or '*'")?];
        while self.check(TokenKind::Delimiter, ",") {
            self.advance();
            columns.push(self.parse_identifier("column name")?);
        }

        Projection::from_columns(columns).ok_or_else(|| self.error("Empty projection list"))
    }

    /// Аргумент LIMIT: один неотрицательный целочисленный токен
    fn parse_limit(&mut self) -> Result<u64> {
        let token = self.current();
        if token.kind != TokenKind::Number {
            return Err(self.error(format!(
                "Expected number after LIMIT, found {}",
                token.describe()
            )));
        }
        if token.text.starts_with('-') {
            return Err(self.error("LIMIT must be a non-negative integer"));
        }

        let limit = token
            .text
            .parse::<u64>()
            .map_err(|_| self.error(format!("Invalid integer literal {}", token.text)))?;
        self.advance();
        Ok(limit)
    }
}
