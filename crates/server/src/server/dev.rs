#![forbid(unsafe_code)]

use super::{CommandResult, VocabServer, to_json};
use crate::dto::{LogEntryDto, QueryResultDto, QueryValidationDto, TableInfoDto};
use crate::support::{ParamError, optional_str, require_str};
use serde_json::Value;
use vc_core::logbook::{LogFilter, LogLevel, LogSource};
use vc_storage::QueryResult;

impl VocabServer {
    pub(super) fn dev_validate_sql(&mut self, params: Option<&Value>) -> CommandResult {
        let query = require_str(params, "query")?;
        Ok(to_json(QueryValidationDto::from(
            self.store.validate_query(query),
        )))
    }

    /// Validates before running; an invalid statement comes back as an error
    /// result without touching the database.
    pub(super) fn dev_execute_sql(&mut self, params: Option<&Value>) -> CommandResult {
        let query = require_str(params, "query")?;
        let validation = self.store.validate_query(query);
        if !validation.is_valid {
            let message = validation
                .message
                .unwrap_or_else(|| "Invalid query".to_string());
            return Ok(to_json(QueryResultDto::from(QueryResult::failed(message))));
        }
        Ok(to_json(QueryResultDto::from(self.store.execute_sql(query))))
    }

    pub(super) fn dev_schema(&mut self) -> Value {
        to_json(
            self.store
                .schema()
                .into_iter()
                .map(TableInfoDto::from)
                .collect::<Vec<_>>(),
        )
    }

    pub(super) fn dev_logs(&mut self, params: Option<&Value>) -> CommandResult {
        let level = match optional_str(params, "level")? {
            Some(raw) => Some(
                LogLevel::parse(raw)
                    .ok_or_else(|| ParamError(format!("unknown log level: {raw}")))?,
            ),
            None => None,
        };
        let source = match optional_str(params, "source")? {
            Some(raw) => Some(
                LogSource::parse(raw)
                    .ok_or_else(|| ParamError(format!("unknown log source: {raw}")))?,
            ),
            None => None,
        };
        let search = optional_str(params, "search")?.map(str::to_string);

        let entries = self.logbook.entries(&LogFilter {
            level,
            source,
            search,
        });
        Ok(to_json(
            entries
                .into_iter()
                .map(LogEntryDto::from)
                .collect::<Vec<_>>(),
        ))
    }

    pub(super) fn dev_logs_clear(&mut self) -> Value {
        self.logbook.clear();
        Value::Bool(true)
    }
}
