#![forbid(unsafe_code)]

use super::{CommandResult, VocabServer, command_error};
use crate::support::{ParamError, optional_bool, optional_str, save_settings};
use serde_json::{Value, json};
use vc_core::logbook::LogSource;

impl VocabServer {
    pub(super) fn settings_get(&self) -> Value {
        json!({
            "defaultTargetLanguage": self.settings.default_target_language,
            "developerMode": self.settings.developer_mode,
            "effectiveTargetLanguage": self.default_target_language(),
        })
    }

    /// Applies a partial update and persists it. Absent keys keep their value;
    /// an empty `defaultTargetLanguage` clears the stored preference.
    pub(super) fn settings_set(&mut self, params: Option<&Value>) -> CommandResult {
        let target = optional_str(params, "defaultTargetLanguage")?;
        let developer_mode = optional_bool(params, "developerMode")?;
        if target.is_none() && developer_mode.is_none() {
            return Err(ParamError(
                "expected defaultTargetLanguage and/or developerMode".to_string(),
            ));
        }

        let mut next = self.settings.clone();
        if let Some(target) = target {
            let target = target.trim().to_ascii_lowercase();
            next.default_target_language = (!target.is_empty()).then_some(target);
        }
        if let Some(developer_mode) = developer_mode {
            next.developer_mode = developer_mode;
        }

        if let Err(err) = save_settings(self.store.storage_dir(), &next) {
            self.logbook.error(
                LogSource::Main,
                "Failed to save settings",
                Some(format!("error={err}")),
            );
            return Ok(command_error("IO", &err.to_string()));
        }

        self.settings = next;
        self.logbook.info(
            LogSource::Main,
            "Settings updated",
            Some(format!(
                "default_target_language={} developer_mode={}",
                self.settings
                    .default_target_language
                    .as_deref()
                    .unwrap_or("-"),
                self.settings.developer_mode
            )),
        );
        Ok(self.settings_get())
    }
}
