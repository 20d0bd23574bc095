//! Константы для db-cli

/// Сколько символов исходного текста показывать по обе стороны от позиции ошибки
pub const ERROR_CONTEXT_RADIUS: usize = 10;

/// Максимальная длина запроса по умолчанию (в символах)
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 65536;

/// Максимальная глубина вложенности скобок в выражениях
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 100;

/// Уровень логирования по умолчанию
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Имя конфигурационного файла, который ищется в рабочей директории
pub const DEFAULT_CONFIG_FILE: &str = "db-cli.toml";

/// Допустимые уровни логирования
pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
