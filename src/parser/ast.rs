//! Абстрактное синтаксическое дерево SQL для db-cli
//!
//! Узлы создаются парсером один раз и дальше не изменяются. `Serialize` даёт
//! машиночитаемую форму (JSON для `--debug-ast`), `Display` - канонический SQL.

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::fmt;

/// Основной узел AST
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "statement_type")]
pub enum Statement {
    /// CREATE TABLE операция
    #[serde(rename = "CREATE_TABLE")]
    CreateTable(CreateTableStatement),
    /// INSERT операция
    #[serde(rename = "INSERT")]
    Insert(InsertStatement),
    /// SELECT запрос
    #[serde(rename = "SELECT")]
    Select(SelectStatement),
}

/// CREATE TABLE операция
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTableStatement {
    pub table_name: String,
    /// Непустой список колонок в порядке объявления
    pub columns: Vec<ColumnDefinition>,
}

/// Определение колонки
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
}

/// Поддерживаемые типы колонок
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    Int,
    BigInt,
    Text,
}

impl DataType {
    /// Тип по ключевому слову (ожидается верхний регистр)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "INT" => Some(DataType::Int),
            "BIGINT" => Some(DataType::BigInt),
            "TEXT" => Some(DataType::Text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "INT",
            DataType::BigInt => "BIGINT",
            DataType::Text => "TEXT",
        }
    }
}

/// INSERT операция
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertStatement {
    pub table_name: String,
    /// Значения в исходном порядке. Грамматика принимает любое выражение,
    /// ограничение до литералов остаётся потребителю.
    pub values: Vec<Expression>,
}

/// SELECT запрос
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStatement {
    pub projections: Projection,
    pub from_table: String,
    pub selection: Option<Expression>,
    pub limit: Option<u64>,
}

/// Список выборки: `*` или непустой список имён колонок
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Wildcard,
    Columns(Vec<String>),
}

impl Projection {
    /// Пустой список колонок не является допустимой проекцией
    pub fn from_columns(columns: Vec<String>) -> Option<Self> {
        if columns.is_empty() {
            None
        } else {
            Some(Projection::Columns(columns))
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Projection::Wildcard)
    }
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Projection::Wildcard => serializer.serialize_str("*"),
            Projection::Columns(columns) => {
                let mut seq = serializer.serialize_seq(Some(columns.len()))?;
                for column in columns {
                    seq.serialize_element(column)?;
                }
                seq.end()
            }
        }
    }
}

/// Выражение
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Литерал
    Literal { value: Value },
    /// Ссылка на колонку
    #[serde(rename = "ColumnRef")]
    ColumnReference {
        #[serde(rename = "column_name")]
        name: String,
    },
    /// Бинарная операция
    #[serde(rename = "BinaryOp")]
    BinaryOperation {
        left: Box<Expression>,
        #[serde(rename = "op")]
        operator: BinaryOperator,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn integer(value: i64) -> Self {
        Expression::Literal {
            value: Value::Integer(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal {
            value: Value::String(value.into()),
        }
    }

    pub fn null() -> Self {
        Expression::Literal { value: Value::Null }
    }

    pub fn column(name: impl Into<String>) -> Self {
        Expression::ColumnReference { name: name.into() }
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Оператор корня, если это бинарная операция
    pub fn operator(&self) -> Option<BinaryOperator> {
        match self {
            Expression::BinaryOperation { operator, .. } => Some(*operator),
            _ => None,
        }
    }
}

/// Значение литерала
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    String(String),
    Null,
}

/// Бинарный оператор; сериализуется исходным текстом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl BinaryOperator {
    /// Оператор сравнения по тексту токена
    pub fn comparison(text: &str) -> Option<Self> {
        match text {
            "=" => Some(BinaryOperator::Equal),
            "!=" => Some(BinaryOperator::NotEqual),
            "<" => Some(BinaryOperator::Less),
            "<=" => Some(BinaryOperator::LessEqual),
            ">" => Some(BinaryOperator::Greater),
            ">=" => Some(BinaryOperator::GreaterEqual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::Null => f.write_str("NULL"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal { value } => write!(f, "{}", value),
            Expression::ColumnReference { name } => f.write_str(name),
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Wildcard => f.write_str("*"),
            Projection::Columns(columns) => f.write_str(&columns.join(", ")),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::CreateTable(stmt) => {
                let columns: Vec<String> = stmt
                    .columns
                    .iter()
                    .map(|c| format!("{} {}", c.name, c.data_type))
                    .collect();
                write!(f, "CREATE TABLE {} ({})", stmt.table_name, columns.join(", "))
            }
            Statement::Insert(stmt) => {
                let values: Vec<String> = stmt.values.iter().map(|v| v.to_string()).collect();
                write!(f, "INSERT INTO {} VALUES ({})", stmt.table_name, values.join(", "))
            }
            Statement::Select(stmt) => {
                write!(f, "SELECT {} FROM {}", stmt.projections, stmt.from_table)?;
                if let Some(selection) = &stmt.selection {
                    write!(f, " WHERE {}", selection)?;
                }
                if let Some(limit) = stmt.limit {
                    write!(f, " LIMIT {}", limit)?;
                }
                Ok(())
            }
        }
    }
}
