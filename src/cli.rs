//! CLI интерфейс для db-cli
//!
//! Тонкая обёртка над ядром: разбирает аргументы, собирает конфигурацию,
//! запускает лексер и парсер и готовит текст для вывода.

use crate::common::{CliConfig, ConfigOverrides, OutputFormat, Result, DEFAULT_CONFIG_FILE};
use crate::parser::{tokenize, ParserSettings, SqlParser, Statement, Token};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

/// DB-CLI - разбор SQL запроса в AST
#[derive(Parser, Debug)]
#[command(name = "db-cli")]
#[command(about = "DB-CLI SQL Parser")]
#[command(version)]
pub struct Cli {
    /// SQL запрос для разбора
    #[arg(short, long)]
    pub query: String,

    /// Печатать внутреннее AST
    #[arg(long)]
    pub debug_ast: bool,

    /// Формат вывода AST
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Печатать поток токенов
    #[arg(long)]
    pub tokens: bool,

    /// Конфигурационный файл
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Уровень детализации логирования
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Разбирает аргументы командной строки
    pub fn init() -> Self {
        Self::parse()
    }

    /// Загружает конфигурацию: файл, затем окружение, затем флаги
    pub fn load_config(&self) -> anyhow::Result<CliConfig> {
        let mut config = if let Some(config_path) = &self.config {
            CliConfig::from_file(config_path)
                .with_context(|| format!("failed to load config {}", config_path.display()))?
        } else {
            // Файл по умолчанию необязателен
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CliConfig::from_file(default_path)
                    .with_context(|| format!("failed to load config {}", DEFAULT_CONFIG_FILE))?
            } else {
                CliConfig::default()
            }
        };

        let env = CliConfig::from_env().context("invalid DBCLI_* environment variable")?;
        config = config.merge(env).merge(self.overrides());

        config.validate()?;
        Ok(config)
    }

    /// Настройки, явно заданные флагами командной строки
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_format: self.format,
            log_level: self.log_level.clone(),
            ..ConfigOverrides::default()
        }
    }

    /// Разбирает запрос и возвращает текст для stdout (может быть пустым)
    pub fn execute(&self, config: &CliConfig) -> Result<String> {
        config.check_query(&self.query)?;

        let tokens = tokenize(&self.query)?;
        let mut sections = Vec::new();
        if self.tokens {
            sections.push(render_tokens(&tokens));
        }

        let settings = ParserSettings {
            max_recursion_depth: config.max_nesting_depth,
        };
        let statement = SqlParser::from_tokens(&self.query, tokens)
            .with_settings(settings)
            .parse()?;
        log::info!("parsed {} statement", statement_name(&statement));

        if self.debug_ast {
            sections.push(render_statement(&statement, config.output_format)?);
        }

        Ok(sections.join("\n"))
    }
}

/// Отрисовывает AST в выбранном формате
pub fn render_statement(statement: &Statement, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(statement)?),
        OutputFormat::Text => Ok(statement.to_string()),
    }
}

/// По одному токену на строку: `KIND 'text' @position`
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn statement_name(statement: &Statement) -> &'static str {
    match statement {
        Statement::CreateTable(_) => "CREATE TABLE",
        Statement::Insert(_) => "INSERT",
        Statement::Select(_) => "SELECT",
    }
}

/// Инициализирует env_logger; логи идут в stderr, чтобы не портить вывод AST.
///
/// Повторный вызов (например, из тестов) оставляет уже установленный логгер.
pub fn init_logging(level: &str) {
    let result = env_logger::Builder::new()
        .parse_filters(level)
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .try_init();

    // SetLoggerError возникает только если глобальный логгер уже установлен
    if let Err(e) = result {
        log::debug!("keeping existing logger: {}", e);
    }
}
