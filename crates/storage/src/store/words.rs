#![forbid(unsafe_code)]

use super::{AddWordRequest, SqliteStore, StoreError};
use rusqlite::{OptionalExtension, Row, params};
use vc_core::logbook::LogSource;
use vc_core::model::{Word, WordWithTranslations};

const WORD_COLUMNS: &str = "id, original_text, source_language, created_at_ms, updated_at_ms";

impl SqliteStore {
    /// Inserts a word, or touches `updated_at_ms` when the
    /// `(original_text, source_language)` pair already exists.
    ///
    /// `updated_at_ms` strictly increases on every re-add, even when two adds
    /// land in the same millisecond.
    pub fn add_word(&mut self, request: AddWordRequest) -> Result<Word, StoreError> {
        let result = self.add_word_tx(&request);
        self.logged("add_word", result)
    }

    fn add_word_tx(&mut self, request: &AddWordRequest) -> Result<Word, StoreError> {
        let original_text = request.original_text.trim();
        if original_text.is_empty() {
            return Err(StoreError::InvalidInput("original_text must not be empty"));
        }
        let source_language = request.source_language.trim();
        if source_language.is_empty() {
            return Err(StoreError::InvalidInput("source_language must not be empty"));
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO words(original_text, source_language, created_at_ms, updated_at_ms) \
             VALUES (?1, ?2, ?3, ?3) \
             ON CONFLICT(original_text, source_language) DO UPDATE SET \
               updated_at_ms = MAX(excluded.updated_at_ms, words.updated_at_ms + 1)",
            params![original_text, source_language, request.now_ms],
        )?;
        let word = tx.query_row(
            &format!(
                "SELECT {WORD_COLUMNS} FROM words WHERE original_text=?1 AND source_language=?2"
            ),
            params![original_text, source_language],
            map_word_row,
        )?;
        tx.commit()?;
        Ok(word)
    }

    /// Deletes a word together with its translations and tags. Returns whether
    /// a row was removed.
    pub fn delete_word(&mut self, word_id: i64) -> Result<bool, StoreError> {
        let result = self
            .conn
            .execute("DELETE FROM words WHERE id=?1", params![word_id])
            .map(|deleted| deleted > 0)
            .map_err(StoreError::from);
        let deleted = self.logged("delete_word", result)?;
        if deleted {
            self.logbook.info(
                LogSource::Database,
                "Word deleted",
                Some(format!("word_id={word_id}")),
            );
        }
        Ok(deleted)
    }

    pub fn get_word(&self, word_id: i64) -> Result<Option<Word>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {WORD_COLUMNS} FROM words WHERE id=?1"),
                params![word_id],
                map_word_row,
            )
            .optional()?)
    }

    pub fn get_word_with_translations(
        &self,
        word_id: i64,
    ) -> Result<Option<WordWithTranslations>, StoreError> {
        match self.get_word(word_id)? {
            Some(word) => Ok(Some(self.assemble(word)?)),
            None => Ok(None),
        }
    }

    /// All words, newest first.
    pub fn get_all_words(&self) -> Result<Vec<WordWithTranslations>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORD_COLUMNS} FROM words ORDER BY created_at_ms DESC, id DESC"
        ))?;
        let words = stmt
            .query_map([], map_word_row)?
            .collect::<Result<Vec<_>, _>>()?;
        words.into_iter().map(|word| self.assemble(word)).collect()
    }

    /// Words carrying `tag_name`, newest first.
    pub fn get_words_by_tag(&self, tag_name: &str) -> Result<Vec<WordWithTranslations>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT w.id, w.original_text, w.source_language, w.created_at_ms, w.updated_at_ms \
             FROM words w \
             JOIN tags t ON w.id = t.word_id \
             WHERE t.tag_name = ?1 \
             ORDER BY w.created_at_ms DESC, w.id DESC",
        )?;
        let words = stmt
            .query_map(params![tag_name.trim()], map_word_row)?
            .collect::<Result<Vec<_>, _>>()?;
        words.into_iter().map(|word| self.assemble(word)).collect()
    }

    fn assemble(&self, word: Word) -> Result<WordWithTranslations, StoreError> {
        let translations = self.translations_for_word(word.id)?;
        let tags = self.tags_for_word(word.id)?;
        Ok(WordWithTranslations {
            word,
            translations,
            tags,
        })
    }
}

fn map_word_row(row: &Row<'_>) -> rusqlite::Result<Word> {
    Ok(Word {
        id: row.get(0)?,
        original_text: row.get(1)?,
        source_language: row.get(2)?,
        created_at_ms: row.get(3)?,
        updated_at_ms: row.get(4)?,
    })
}
