use std::fmt;

use crate::{config::ImportConfig, product::Product};

const NULL: &str = "NULL";

/// Postgres types of the prepared statement parameters, in column order.
const PARAMETER_TYPES: [&str; 14] = [
    "text", "text", "text", "text", "text", "text", "numeric", "numeric", "numeric", "integer",
    "integer", "integer", "integer", "integer",
];

/// Quotes a value as an SQL string literal, or `NULL` when absent.
///
/// Only single quotes are escaped; input comes from a trusted local file.
pub fn escape_literal(value: Option<&str>) -> String {
    match value {
        None => NULL.to_string(),
        Some(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

/// A single column value, either to be rendered into SQL text or bound as a
/// parameter by a database driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Float(f64),
    Integer(i64),
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Text)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str(NULL),
            SqlValue::Text(s) => f.write_str(&escape_literal(Some(s.as_str()))),
            // Debug keeps the decimal point on whole values: 10.0, not 10.
            SqlValue::Float(v) => write!(f, "{v:?}"),
            SqlValue::Integer(v) => write!(f, "{v}"),
        }
    }
}

/// Strategy turning products into SQL text.
pub trait StatementEmitter {
    /// Lines written once, before the first statement.
    fn preamble(&self, config: &ImportConfig) -> Vec<String>;

    fn emit(&self, product: &Product, config: &ImportConfig) -> String;
}

/// Self-contained `INSERT` statements with every value inlined.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralInsert;

impl StatementEmitter for LiteralInsert {
    fn preamble(&self, config: &ImportConfig) -> Vec<String> {
        config.header_lines.clone()
    }

    fn emit(&self, product: &Product, config: &ImportConfig) -> String {
        let values = product
            .values()
            .iter()
            .map(|value| format!("    {value}"))
            .collect::<Vec<_>>()
            .join(",\n");

        format!(
            "INSERT INTO {} ({}) VALUES (\n{}\n);",
            config.table,
            config.column_list(),
            values
        )
    }
}

/// One `PREPARE` in the preamble, then an `EXECUTE` per product.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreparedInsert;

impl StatementEmitter for PreparedInsert {
    fn preamble(&self, config: &ImportConfig) -> Vec<String> {
        let placeholders = (1..=config.columns.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = config.header_lines.clone();
        lines.push(format!(
            "PREPARE {} ({}) AS INSERT INTO {} ({}) VALUES ({});",
            config.statement_name,
            PARAMETER_TYPES.join(", "),
            config.table,
            config.column_list(),
            placeholders
        ));
        lines
    }

    fn emit(&self, product: &Product, config: &ImportConfig) -> String {
        let arguments = product
            .values()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        format!("EXECUTE {}({});", config.statement_name, arguments)
    }
}
