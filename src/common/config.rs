//! Конфигурация для db-cli
//!
//! Настройки исполняемого файла: формат вывода AST, уровень логирования,
//! ограничения на длину запроса и вложенность скобок. Ядро парсера
//! конфигурации не читает, глубина передается ему через `ParserSettings`.

use crate::common::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_MAX_QUERY_LENGTH, DEFAULT_MAX_RECURSION_DEPTH, LOG_LEVELS,
};
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Формат вывода AST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON с отступом в два пробела
    #[default]
    Json,
    /// Канонический SQL-текст
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "sql" => Ok(OutputFormat::Text),
            _ => Err(Error::configuration(format!(
                "Unsupported output format: {}",
                s
            ))),
        }
    }
}

/// Конфигурация CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Формат вывода AST
    pub output_format: OutputFormat,
    /// Уровень логирования (off, error, warn, info, debug, trace)
    pub log_level: String,
    /// Максимальная длина запроса в символах
    pub max_query_length: usize,
    /// Максимальная глубина вложенности скобок в выражениях
    pub max_nesting_depth: usize,
}

/// Частичная конфигурация: только явно заданные значения.
///
/// Из неё собираются переменные окружения и флаги командной строки.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub output_format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub max_query_length: Option<usize>,
    pub max_nesting_depth: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Json,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
            max_nesting_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}

impl CliConfig {
    /// Загружает конфигурацию из TOML файла
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Разбирает конфигурацию из TOML строки
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Сохраняет конфигурацию в TOML файл
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| Error::configuration(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Читает переопределения из переменных окружения `DBCLI_*`
    pub fn from_env() -> Result<ConfigOverrides> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Читает переопределения из произвольного источника переменных
    pub fn from_vars<F>(lookup: F) -> Result<ConfigOverrides>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overrides = ConfigOverrides::default();

        if let Some(format) = lookup("DBCLI_OUTPUT_FORMAT") {
            overrides.output_format = Some(format.parse()?);
        }

        if let Some(level) = lookup("DBCLI_LOG_LEVEL") {
            overrides.log_level = Some(level);
        }

        overrides.max_query_length = parse_limit(&lookup, "DBCLI_MAX_QUERY_LENGTH")?;
        overrides.max_nesting_depth = parse_limit(&lookup, "DBCLI_MAX_NESTING_DEPTH")?;

        Ok(overrides)
    }

    /// Применяет переопределения: заданные значения побеждают, даже если
    /// совпадают со значениями по умолчанию
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(format) = overrides.output_format {
            self.output_format = format;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(max_len) = overrides.max_query_length {
            self.max_query_length = max_len;
        }
        if let Some(depth) = overrides.max_nesting_depth {
            self.max_nesting_depth = depth;
        }
        self
    }

    /// Валидирует конфигурацию
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}', expected one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if self.max_query_length == 0 {
            return Err(Error::configuration(
                "max_query_length must be greater than 0",
            ));
        }

        if self.max_nesting_depth == 0 {
            return Err(Error::configuration(
                "max_nesting_depth must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Проверяет длину запроса до запуска лексера
    pub fn check_query(&self, query: &str) -> Result<()> {
        let length = query.chars().count();
        if length > self.max_query_length {
            return Err(Error::validation(format!(
                "Query is {} characters long, limit is {}",
                length, self.max_query_length
            )));
        }
        Ok(())
    }
}

fn parse_limit<F>(lookup: &F, name: &str) -> Result<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| {
            value
                .parse()
                .map_err(|_| Error::configuration(format!("Invalid {}: {}", name, value)))
        })
        .transpose()
}
