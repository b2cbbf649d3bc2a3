#![forbid(unsafe_code)]

use rusqlite::types::ValueRef;

/// A dynamically typed SQLite scalar from an ad-hoc query.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(v) => Self::Integer(v),
            ValueRef::Real(v) => Self::Real(v),
            ValueRef::Text(bytes) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Self::Blob(bytes.to_vec()),
        }
    }
}

/// One result row: `(column, value)` pairs in statement column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryRow {
    pub cells: Vec<(String, SqlValue)>,
}

impl QueryRow {
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

pub const WRITE_RESULT_COLUMN: &str = "Result";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<QueryRow>,
    pub error: Option<String>,
    pub affected_rows: Option<usize>,
}

impl QueryResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub(super) fn write_summary(affected: usize) -> Self {
        Self {
            columns: vec![WRITE_RESULT_COLUMN.to_string()],
            rows: vec![QueryRow {
                cells: vec![(
                    WRITE_RESULT_COLUMN.to_string(),
                    SqlValue::Text(format!("{affected} rows affected")),
                )],
            }],
            error: None,
            affected_rows: Some(affected),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryValidation {
    pub is_valid: bool,
    pub is_dangerous: bool,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub indexes: Vec<String>,
}
