#![forbid(unsafe_code)]

use super::{AddTagsRequest, SqliteStore, StoreError, map_missing_word};
use rusqlite::types::Type;
use rusqlite::{Row, params};
use vc_core::model::{Tag, TagType, TagUsage};

impl SqliteStore {
    /// Attaches tags to a word. A `(word_id, tag_name)` pair that already
    /// exists is left untouched. Returns the number of newly inserted rows.
    pub fn add_tags(&mut self, request: AddTagsRequest) -> Result<usize, StoreError> {
        let result = self.add_tags_tx(&request);
        self.logged("add_tags", result)
    }

    fn add_tags_tx(&mut self, request: &AddTagsRequest) -> Result<usize, StoreError> {
        if request.tags.iter().any(|tag| tag.name.trim().is_empty()) {
            return Err(StoreError::InvalidInput("tag name must not be empty"));
        }

        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO tags(word_id, tag_name, tag_type, created_at_ms) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for tag in &request.tags {
                inserted += stmt
                    .execute(params![
                        request.word_id,
                        tag.name.trim(),
                        tag.tag_type.as_str(),
                        request.now_ms
                    ])
                    .map_err(map_missing_word)?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Distinct tags with the number of words carrying each.
    pub fn get_all_tags(&self) -> Result<Vec<TagUsage>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT tag_name, tag_type, COUNT(*) FROM tags \
             GROUP BY tag_name, tag_type \
             ORDER BY tag_type ASC, tag_name ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(TagUsage {
                name: row.get(0)?,
                tag_type: tag_type_column(row, 1)?,
                count: row.get(2)?,
            });
        }
        Ok(out)
    }

    pub(super) fn tags_for_word(&self, word_id: i64) -> Result<Vec<Tag>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, word_id, tag_name, tag_type, created_at_ms FROM tags \
             WHERE word_id=?1 ORDER BY id ASC",
        )?;
        let mut rows = stmt.query(params![word_id])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(Tag {
                id: row.get(0)?,
                word_id: row.get(1)?,
                tag_name: row.get(2)?,
                tag_type: tag_type_column(row, 3)?,
                created_at_ms: row.get(4)?,
            });
        }
        Ok(out)
    }
}

fn tag_type_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<TagType> {
    let raw: String = row.get(idx)?;
    TagType::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown tag_type: {raw}").into(),
        )
    })
}
