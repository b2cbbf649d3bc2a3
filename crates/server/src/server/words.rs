#![forbid(unsafe_code)]

use super::{CommandResult, VocabServer, command_error, store_error_payload, to_json};
use crate::dto::{TagUsageDto, TimelineNodeDto, WordDto};
use crate::support::{optional_str, require_i64, require_str};
use serde_json::{Value, json};
use vc_core::capture::{clean_recognized_text, first_candidate};
use vc_core::logbook::LogSource;
use vc_core::model::{NewTag, TagType};
use vc_core::tags::{generate_auto_tags, normalize_custom_tag};
use vc_core::timeline::build_timeline;
use vc_storage::{AddTagsRequest, AddTranslationRequest, AddWordRequest};

impl VocabServer {
    /// Capture flow: upsert the word, ask the provider, store the translation
    /// when one arrives, attach auto tags for today, then return the assembled
    /// word. Store failures are logged and yield `null`.
    pub(super) fn words_add(&mut self, params: Option<&Value>) -> CommandResult {
        let text = require_str(params, "text")?;
        let source_language = require_str(params, "source_language")?;
        let target_language = optional_str(params, "target_language")?
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.default_target_language());

        let now_ms = self.clock.now_ms();
        let word = match self.store.add_word(AddWordRequest {
            original_text: text.to_string(),
            source_language: source_language.to_string(),
            now_ms,
        }) {
            Ok(word) => word,
            Err(_) => return Ok(Value::Null),
        };

        match self.provider.translate(
            &word.original_text,
            &word.source_language,
            &target_language,
        ) {
            Some(data) => {
                // Failure is already logged; the word stays without this translation.
                let _ = self.store.add_translation(AddTranslationRequest {
                    word_id: word.id,
                    target_language: target_language.clone(),
                    data,
                    now_ms,
                });
            }
            None => self.logbook.warning(
                LogSource::Main,
                "Word saved without translation",
                Some(format!("word_id={} target={target_language}", word.id)),
            ),
        }

        let tags = generate_auto_tags(&word.source_language, self.clock.today());
        let _ = self.store.add_tags(AddTagsRequest {
            word_id: word.id,
            tags,
            now_ms,
        });

        self.logbook.info(
            LogSource::Main,
            "Word added",
            Some(format!(
                "word_id={} text={} source={}",
                word.id, word.original_text, word.source_language
            )),
        );
        Ok(self.word_json(word.id))
    }

    pub(super) fn words_get(&mut self, params: Option<&Value>) -> CommandResult {
        let word_id = require_i64(params, "word_id")?;
        Ok(self.word_json(word_id))
    }

    pub(super) fn words_delete(&mut self, params: Option<&Value>) -> CommandResult {
        let word_id = require_i64(params, "word_id")?;
        Ok(Value::Bool(self.store.delete_word(word_id).unwrap_or(false)))
    }

    pub(super) fn words_list(&mut self) -> CommandResult {
        let words = self.store.get_all_words();
        Ok(self.words_json("get_all_words", words))
    }

    pub(super) fn words_by_tag(&mut self, params: Option<&Value>) -> CommandResult {
        let tag = require_str(params, "tag")?;
        let words = self.store.get_words_by_tag(tag);
        Ok(self.words_json("get_words_by_tag", words))
    }

    pub(super) fn tags_list(&mut self) -> CommandResult {
        match self.store.get_all_tags() {
            Ok(tags) => Ok(to_json(
                tags.into_iter().map(TagUsageDto::from).collect::<Vec<_>>(),
            )),
            Err(err) => {
                self.log_read_failure("get_all_tags", &err);
                Ok(json!([]))
            }
        }
    }

    pub(super) fn tags_timeline(&mut self) -> CommandResult {
        match self.store.get_all_tags() {
            Ok(tags) => Ok(to_json(
                build_timeline(&tags)
                    .into_iter()
                    .map(TimelineNodeDto::from)
                    .collect::<Vec<_>>(),
            )),
            Err(err) => {
                self.log_read_failure("get_all_tags", &err);
                Ok(json!([]))
            }
        }
    }

    pub(super) fn tags_add(&mut self, params: Option<&Value>) -> CommandResult {
        let word_id = require_i64(params, "word_id")?;
        let raw = require_str(params, "tag")?;
        let name = match normalize_custom_tag(raw) {
            Ok(name) => name,
            Err(err) => return Ok(command_error("INVALID_INPUT", err.message())),
        };

        match self.store.add_tags(AddTagsRequest {
            word_id,
            tags: vec![NewTag::new(name.clone(), TagType::Custom)],
            now_ms: self.clock.now_ms(),
        }) {
            Ok(inserted) => Ok(json!({ "added": inserted > 0, "tag": name })),
            Err(err) => Ok(store_error_payload(&err)),
        }
    }

    pub(super) fn capture_clean(&mut self, params: Option<&Value>) -> CommandResult {
        let raw = require_str(params, "text")?;
        let cleaned = clean_recognized_text(raw);
        if cleaned.is_none() {
            self.logbook.warning(
                LogSource::Ocr,
                "No text recognized",
                Some(format!("raw_len={}", raw.len())),
            );
        }
        let candidate = cleaned.as_deref().and_then(first_candidate);
        Ok(json!({ "text": cleaned, "candidate": candidate }))
    }

    fn word_json(&self, word_id: i64) -> Value {
        match self.store.get_word_with_translations(word_id) {
            Ok(Some(word)) => to_json(WordDto::from(word)),
            Ok(None) => Value::Null,
            Err(err) => {
                self.log_read_failure("get_word_with_translations", &err);
                Value::Null
            }
        }
    }

    fn words_json(
        &self,
        operation: &str,
        words: Result<Vec<vc_core::model::WordWithTranslations>, vc_storage::StoreError>,
    ) -> Value {
        match words {
            Ok(words) => to_json(words.into_iter().map(WordDto::from).collect::<Vec<_>>()),
            Err(err) => {
                self.log_read_failure(operation, &err);
                json!([])
            }
        }
    }

    fn log_read_failure(&self, operation: &str, err: &vc_storage::StoreError) {
        self.logbook.error(
            LogSource::Database,
            format!("{operation} failed"),
            Some(format!("code={} error={err}", err.code())),
        );
    }
}
