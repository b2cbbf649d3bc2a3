#![forbid(unsafe_code)]

//! Wire shapes returned by commands. Field names are camelCase; timestamps are
//! RFC 3339 strings.

use crate::support::ts_ms_to_rfc3339;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use vc_core::logbook::LogEntry;
use vc_core::model::{Tag, TagUsage, Translation, Word, WordWithTranslations};
use vc_core::timeline::TimelineNode;
use vc_storage::{ColumnInfo, QueryResult, QueryValidation, SqlValue, TableInfo};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TranslationDto {
    pub(crate) id: i64,
    pub(crate) word_id: i64,
    pub(crate) target_language: String,
    pub(crate) translation: String,
    pub(crate) definition: Option<String>,
    pub(crate) pronunciation: Option<String>,
    pub(crate) part_of_speech: Option<String>,
    pub(crate) examples: Vec<String>,
    pub(crate) usage_notes: Option<String>,
    pub(crate) created_at: String,
}

impl From<Translation> for TranslationDto {
    fn from(value: Translation) -> Self {
        Self {
            id: value.id,
            word_id: value.word_id,
            target_language: value.target_language,
            translation: value.translation,
            definition: value.definition,
            pronunciation: value.pronunciation,
            part_of_speech: value.part_of_speech,
            examples: value.examples,
            usage_notes: value.usage_notes,
            created_at: ts_ms_to_rfc3339(value.created_at_ms),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TagDto {
    pub(crate) id: i64,
    pub(crate) word_id: i64,
    pub(crate) tag_name: String,
    pub(crate) tag_type: &'static str,
    pub(crate) created_at: String,
}

impl From<Tag> for TagDto {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id,
            word_id: value.word_id,
            tag_name: value.tag_name,
            tag_type: value.tag_type.as_str(),
            created_at: ts_ms_to_rfc3339(value.created_at_ms),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WordDto {
    pub(crate) id: i64,
    pub(crate) original_text: String,
    pub(crate) source_language: String,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
    pub(crate) translations: Vec<TranslationDto>,
    pub(crate) tags: Vec<TagDto>,
}

impl From<WordWithTranslations> for WordDto {
    fn from(value: WordWithTranslations) -> Self {
        let Word {
            id,
            original_text,
            source_language,
            created_at_ms,
            updated_at_ms,
        } = value.word;
        Self {
            id,
            original_text,
            source_language,
            created_at: ts_ms_to_rfc3339(created_at_ms),
            updated_at: ts_ms_to_rfc3339(updated_at_ms),
            translations: value.translations.into_iter().map(Into::into).collect(),
            tags: value.tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct TagUsageDto {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) tag_type: &'static str,
    pub(crate) count: i64,
}

impl From<TagUsage> for TagUsageDto {
    fn from(value: TagUsage) -> Self {
        Self {
            name: value.name,
            tag_type: value.tag_type.as_str(),
            count: value.count,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimelineNodeDto {
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) level: u8,
    pub(crate) count: i64,
    pub(crate) tag_name: String,
    pub(crate) children: Vec<TimelineNodeDto>,
}

impl From<TimelineNode> for TimelineNodeDto {
    fn from(value: TimelineNode) -> Self {
        Self {
            id: value.id,
            label: value.label,
            level: value.level.depth(),
            count: value.count,
            tag_name: value.tag_name,
            children: value.children.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryValidationDto {
    pub(crate) is_valid: bool,
    pub(crate) is_dangerous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

impl From<QueryValidation> for QueryValidationDto {
    fn from(value: QueryValidation) -> Self {
        Self {
            is_valid: value.is_valid,
            is_dangerous: value.is_dangerous,
            message: value.message,
        }
    }
}

fn sql_value_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(v) => Value::Number(v.into()),
        SqlValue::Real(v) => Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null),
        SqlValue::Text(v) => Value::String(v),
        SqlValue::Blob(bytes) => Value::Array(
            bytes
                .into_iter()
                .map(|b| Value::Number(b.into()))
                .collect(),
        ),
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryResultDto {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) affected_rows: Option<usize>,
}

impl From<QueryResult> for QueryResultDto {
    fn from(value: QueryResult) -> Self {
        let rows = value
            .rows
            .into_iter()
            .map(|row| {
                row.cells
                    .into_iter()
                    .map(|(column, cell)| (column, sql_value_json(cell)))
                    .collect::<Map<_, _>>()
            })
            .collect();
        Self {
            columns: value.columns,
            rows,
            error: value.error,
            affected_rows: value.affected_rows,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ColumnInfoDto {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) column_type: String,
    pub(crate) nullable: bool,
    pub(crate) default_value: Option<String>,
    pub(crate) primary_key: bool,
}

impl From<ColumnInfo> for ColumnInfoDto {
    fn from(value: ColumnInfo) -> Self {
        Self {
            name: value.name,
            column_type: value.column_type,
            nullable: value.nullable,
            default_value: value.default_value,
            primary_key: value.primary_key,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct TableInfoDto {
    pub(crate) name: String,
    pub(crate) columns: Vec<ColumnInfoDto>,
    pub(crate) indexes: Vec<String>,
}

impl From<TableInfo> for TableInfoDto {
    fn from(value: TableInfo) -> Self {
        Self {
            name: value.name,
            columns: value.columns.into_iter().map(Into::into).collect(),
            indexes: value.indexes,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct LogEntryDto {
    pub(crate) id: String,
    pub(crate) timestamp: String,
    pub(crate) level: &'static str,
    pub(crate) source: &'static str,
    pub(crate) message: String,
    pub(crate) data: Option<String>,
}

impl From<LogEntry> for LogEntryDto {
    fn from(value: LogEntry) -> Self {
        Self {
            timestamp: value.timestamp_rfc3339(),
            id: value.id,
            level: value.level.as_str(),
            source: value.source.as_str(),
            message: value.message,
            data: value.data,
        }
    }
}
