#![forbid(unsafe_code)]

pub(super) const SCHEMA_VERSION: &str = "1";

pub(super) const TABLES_SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS words (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          original_text TEXT NOT NULL,
          source_language TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          UNIQUE(original_text, source_language)
        );

        -- `examples` holds a JSON array of strings ('[]' when there are none).
        CREATE TABLE IF NOT EXISTS translations (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          word_id INTEGER NOT NULL,
          target_language TEXT NOT NULL,
          translation TEXT NOT NULL,
          definition TEXT,
          pronunciation TEXT,
          part_of_speech TEXT,
          examples TEXT NOT NULL DEFAULT '[]',
          usage_notes TEXT,
          created_at_ms INTEGER NOT NULL,
          FOREIGN KEY(word_id) REFERENCES words(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS tags (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          word_id INTEGER NOT NULL,
          tag_name TEXT NOT NULL,
          tag_type TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          FOREIGN KEY(word_id) REFERENCES words(id) ON DELETE CASCADE,
          UNIQUE(word_id, tag_name),
          CHECK(tag_type IN ('auto_date', 'auto_language', 'custom'))
        );
"#;

pub(super) const INDEXES_SQL: &str = r#"

        CREATE INDEX IF NOT EXISTS idx_words_created_at ON words(created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_words_source_lang ON words(source_language);
        CREATE INDEX IF NOT EXISTS idx_translations_word_id ON translations(word_id);
        CREATE INDEX IF NOT EXISTS idx_tags_word_id ON tags(word_id);
        CREATE INDEX IF NOT EXISTS idx_tags_name ON tags(tag_name);
"#;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(TABLES_SQL);
    sql.push_str(INDEXES_SQL);
    sql
}
