#![forbid(unsafe_code)]

mod dev;
mod settings;
mod words;


use crate::support::{
    Clock, DEFAULT_TARGET_LANGUAGE, INVALID_PARAMS, JsonRpcRequest, METHOD_NOT_FOUND, ParamError,
    Settings, json_rpc_error, json_rpc_response,
};
use crate::translate::TranslationProvider;
use serde::Serialize;
use serde_json::{Value, json};
use vc_core::logbook::LogService;
use vc_storage::{SqliteStore, StoreError};

type CommandResult = Result<Value, ParamError>;

pub(crate) struct VocabServer {
    store: SqliteStore,
    logbook: LogService,
    provider: Box<dyn TranslationProvider>,
    clock: Box<dyn Clock>,
    settings: Settings,
    target_override: Option<String>,
}

pub(crate) struct VocabServerConfig {
    pub(crate) provider: Box<dyn TranslationProvider>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) settings: Settings,
    /// Target language fixed by CLI or environment; wins over settings.
    pub(crate) target_override: Option<String>,
}

impl VocabServer {
    pub(crate) fn new(store: SqliteStore, config: VocabServerConfig) -> Self {
        let logbook = store.logbook().clone();
        Self {
            store,
            logbook,
            provider: config.provider,
            clock: config.clock,
            settings: config.settings,
            target_override: config.target_override,
        }
    }

    /// Handles one request. Notifications (no `id`) are executed but get no
    /// response.
    pub(crate) fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let expects_response = !matches!(request.id.as_ref(), None | Some(Value::Null));
        tracing::debug!(method = request.method.as_str(), "request");

        let params = request.params.as_ref();
        let outcome = match request.method.as_str() {
            "ping" => Ok(json!({})),
            "words.add" => self.words_add(params),
            "words.get" => self.words_get(params),
            "words.delete" => self.words_delete(params),
            "words.list" => self.words_list(),
            "words.by_tag" => self.words_by_tag(params),
            "tags.list" => self.tags_list(),
            "tags.timeline" => self.tags_timeline(),
            "tags.add" => self.tags_add(params),
            "capture.clean" => self.capture_clean(params),
            "dev.validate_sql" => self.dev_validate_sql(params),
            "dev.execute_sql" => self.dev_execute_sql(params),
            "dev.schema" => Ok(self.dev_schema()),
            "dev.logs" => self.dev_logs(params),
            "dev.logs.clear" => Ok(self.dev_logs_clear()),
            "dev.logs.export" => Ok(Value::String(self.logbook.export())),
            "settings.get" => Ok(self.settings_get()),
            "settings.set" => self.settings_set(params),
            other => {
                if !expects_response {
                    return None;
                }
                return Some(json_rpc_error(
                    request.id,
                    METHOD_NOT_FOUND,
                    &format!("Method not found: {other}"),
                ));
            }
        };

        if !expects_response {
            return None;
        }
        Some(match outcome {
            Ok(result) => json_rpc_response(request.id, result),
            Err(ParamError(message)) => json_rpc_error(request.id, INVALID_PARAMS, &message),
        })
    }

    fn default_target_language(&self) -> String {
        self.target_override
            .clone()
            .or_else(|| self.settings.default_target_language.clone())
            .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string())
    }
}

/// Serializes a wire DTO; failure degrades to `null`.
fn to_json<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Structured failure payload returned as a command result.
fn command_error(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "error": { "code": code, "message": message.trim() }
    })
}

fn store_error_payload(err: &StoreError) -> Value {
    command_error(err.code(), &err.to_string())
}
