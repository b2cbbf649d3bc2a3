#![forbid(unsafe_code)]

use super::{AddTranslationRequest, SqliteStore, StoreError, map_missing_word};
use rusqlite::{OptionalExtension, Row, params};
use vc_core::logbook::LogSource;
use vc_core::model::Translation;

const TRANSLATION_COLUMNS: &str = "id, word_id, target_language, translation, definition, \
     pronunciation, part_of_speech, examples, usage_notes, created_at_ms";

impl SqliteStore {
    /// Always inserts a new translation row; translations are never updated in
    /// place.
    pub fn add_translation(
        &mut self,
        request: AddTranslationRequest,
    ) -> Result<Translation, StoreError> {
        let result = self.add_translation_row(&request);
        self.logged("add_translation", result)
    }

    fn add_translation_row(
        &mut self,
        request: &AddTranslationRequest,
    ) -> Result<Translation, StoreError> {
        let target_language = request.target_language.trim();
        if target_language.is_empty() {
            return Err(StoreError::InvalidInput("target_language must not be empty"));
        }

        let data = &request.data;
        let examples = encode_examples(&data.examples)?;
        self.conn
            .execute(
                "INSERT INTO translations(word_id, target_language, translation, definition, \
                   pronunciation, part_of_speech, examples, usage_notes, created_at_ms) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    request.word_id,
                    target_language,
                    data.translation,
                    data.definition,
                    data.pronunciation,
                    data.part_of_speech,
                    examples,
                    data.usage_notes,
                    request.now_ms,
                ],
            )
            .map_err(map_missing_word)?;

        let id = self.conn.last_insert_rowid();
        self.get_translation(id)?.ok_or(StoreError::UnknownId)
    }

    pub fn get_translation(&self, translation_id: i64) -> Result<Option<Translation>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {TRANSLATION_COLUMNS} FROM translations WHERE id=?1"),
                params![translation_id],
                |row| self.map_translation_row(row),
            )
            .optional()?)
    }

    pub(super) fn translations_for_word(&self, word_id: i64) -> Result<Vec<Translation>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TRANSLATION_COLUMNS} FROM translations WHERE word_id=?1 ORDER BY id ASC"
        ))?;
        let rows = stmt
            .query_map(params![word_id], |row| self.map_translation_row(row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn map_translation_row(&self, row: &Row<'_>) -> rusqlite::Result<Translation> {
        let id: i64 = row.get(0)?;
        let raw_examples: Option<String> = row.get(7)?;
        let examples = match decode_examples(raw_examples.as_deref()) {
            Ok(examples) => examples,
            Err(err) => {
                // Rows edited through the SQL console may carry non-JSON text.
                self.logbook.warning(
                    LogSource::Database,
                    "Failed to parse examples JSON",
                    Some(format!("translation_id={id} error={err}")),
                );
                Vec::new()
            }
        };

        Ok(Translation {
            id,
            word_id: row.get(1)?,
            target_language: row.get(2)?,
            translation: row.get(3)?,
            definition: row.get(4)?,
            pronunciation: row.get(5)?,
            part_of_speech: row.get(6)?,
            examples,
            usage_notes: row.get(8)?,
            created_at_ms: row.get(9)?,
        })
    }
}

pub(super) fn encode_examples(examples: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(examples)?)
}

pub(super) fn decode_examples(raw: Option<&str>) -> Result<Vec<String>, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw),
    }
}
