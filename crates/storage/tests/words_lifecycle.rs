mod support;

use rusqlite::Connection;
use support::{open_store, temp_storage_dir, word_request};
use vc_core::logbook::{LogFilter, LogLevel, LogService};
use vc_core::model::{NewTag, TagType, TranslationData};
use vc_storage::{AddTagsRequest, AddTranslationRequest, SqliteStore, StoreError};

fn sample_translation() -> TranslationData {
    TranslationData {
        translation: "你好".to_string(),
        definition: Some("a greeting".to_string()),
        pronunciation: Some("/həˈloʊ/".to_string()),
        part_of_speech: Some("interjection".to_string()),
        examples: vec!["Hello, world.".to_string(), "Say hello.".to_string()],
        usage_notes: None,
    }
}

#[test]
fn re_adding_a_word_keeps_one_row_and_bumps_updated_at() {
    let (mut store, _logs) = open_store("upsert");

    let first = store
        .add_word(word_request("hello", "en", 1_000))
        .expect("first add");
    assert_eq!(first.created_at_ms, 1_000);
    assert_eq!(first.updated_at_ms, 1_000);

    let second = store
        .add_word(word_request("hello", "en", 2_000))
        .expect("second add");
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at_ms, 1_000);
    assert_eq!(second.updated_at_ms, 2_000);

    // Same millisecond, or a clock that went backwards, still moves forward.
    let third = store
        .add_word(word_request("hello", "en", 2_000))
        .expect("third add");
    assert_eq!(third.id, first.id);
    assert!(third.updated_at_ms > second.updated_at_ms);

    let other_lang = store
        .add_word(word_request("hello", "it", 3_000))
        .expect("same text in another language");
    assert_ne!(other_lang.id, first.id);

    assert_eq!(store.get_all_words().expect("list").len(), 2);
}

#[test]
fn word_text_is_trimmed_and_empty_text_is_rejected() {
    let (mut store, logs) = open_store("trim");

    let word = store
        .add_word(word_request("  hello \n", " en ", 10))
        .expect("add");
    assert_eq!(word.original_text, "hello");
    assert_eq!(word.source_language, "en");

    let again = store.add_word(word_request("hello", "en", 20)).expect("re-add");
    assert_eq!(again.id, word.id);

    let err = store
        .add_word(word_request("   ", "en", 30))
        .expect_err("blank text must be rejected");
    assert_eq!(err.code(), "INVALID_INPUT");

    let errors = logs.entries(&LogFilter {
        level: Some(LogLevel::Error),
        ..LogFilter::default()
    });
    assert!(errors.iter().any(|e| e.message == "add_word failed"));
}

#[test]
fn word_with_translations_assembles_children() {
    let (mut store, _logs) = open_store("assemble");
    let word = store.add_word(word_request("hello", "en", 100)).expect("add");

    let translation = store
        .add_translation(AddTranslationRequest {
            word_id: word.id,
            target_language: "zh".to_string(),
            data: sample_translation(),
            now_ms: 101,
        })
        .expect("translation");
    assert_eq!(translation.word_id, word.id);
    assert_eq!(translation.examples.len(), 2);
    assert_eq!(translation.usage_notes, None);

    store
        .add_tags(AddTagsRequest {
            word_id: word.id,
            tags: vec![
                NewTag::new("2024-01-15", TagType::AutoDate),
                NewTag::new("english", TagType::AutoLanguage),
            ],
            now_ms: 102,
        })
        .expect("tags");

    let full = store
        .get_word_with_translations(word.id)
        .expect("read")
        .expect("word should exist");
    assert_eq!(full.word, word);
    assert_eq!(full.translations, vec![translation]);
    let names = full
        .tags
        .iter()
        .map(|t| t.tag_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["2024-01-15", "english"]);

    assert!(store.get_word_with_translations(9_999).expect("read").is_none());
}

#[test]
fn translations_accumulate_and_keep_empty_examples() {
    let (mut store, _logs) = open_store("translations");
    let word = store.add_word(word_request("ciao", "it", 5)).expect("add");

    for (idx, target) in ["zh", "zh", "en"].iter().enumerate() {
        store
            .add_translation(AddTranslationRequest {
                word_id: word.id,
                target_language: target.to_string(),
                data: TranslationData {
                    translation: format!("t{idx}"),
                    ..TranslationData::default()
                },
                now_ms: 6 + idx as i64,
            })
            .expect("translation");
    }

    let full = store
        .get_word_with_translations(word.id)
        .expect("read")
        .expect("exists");
    assert_eq!(full.translations.len(), 3);
    assert!(full.translations.iter().all(|t| t.examples.is_empty()));
    assert_eq!(full.translations[0].translation, "t0");
}

#[test]
fn translation_for_missing_word_is_unknown_id() {
    let (mut store, _logs) = open_store("fk");
    let err = store
        .add_translation(AddTranslationRequest {
            word_id: 42,
            target_language: "zh".to_string(),
            data: sample_translation(),
            now_ms: 1,
        })
        .expect_err("foreign key must be enforced");
    assert!(matches!(err, StoreError::UnknownId));
}

#[test]
fn delete_cascades_to_translations_and_tags() {
    let dir = temp_storage_dir("cascade");
    let mut store = SqliteStore::open(&dir, LogService::new(50)).expect("open");
    let word = store.add_word(word_request("gone", "en", 1)).expect("add");
    store
        .add_translation(AddTranslationRequest {
            word_id: word.id,
            target_language: "zh".to_string(),
            data: sample_translation(),
            now_ms: 2,
        })
        .expect("translation");
    store
        .add_tags(AddTagsRequest {
            word_id: word.id,
            tags: vec![NewTag::new("english", TagType::AutoLanguage)],
            now_ms: 3,
        })
        .expect("tags");

    assert!(store.delete_word(word.id).expect("delete"));
    assert!(!store.delete_word(word.id).expect("second delete"));
    assert!(store.get_word(word.id).expect("read").is_none());
    assert!(store.get_all_tags().expect("tags").is_empty());

    drop(store);
    let conn = Connection::open(dir.join("vocab.db")).expect("raw open");
    let orphans: i64 = conn
        .query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))
        .expect("count");
    assert_eq!(orphans, 0);
}

#[test]
fn words_list_newest_first_and_filter_by_tag() {
    let (mut store, _logs) = open_store("by-tag");
    let older = store.add_word(word_request("alpha", "en", 100)).expect("a");
    let newer = store.add_word(word_request("beta", "en", 200)).expect("b");
    let other = store.add_word(word_request("gamma", "ja", 300)).expect("c");

    for (id, tag) in [(older.id, "english"), (newer.id, "english"), (other.id, "japanese")] {
        store
            .add_tags(AddTagsRequest {
                word_id: id,
                tags: vec![NewTag::new(tag, TagType::AutoLanguage)],
                now_ms: 400,
            })
            .expect("tag");
    }

    let all = store
        .get_all_words()
        .expect("list")
        .into_iter()
        .map(|w| w.word.original_text)
        .collect::<Vec<_>>();
    assert_eq!(all, vec!["gamma", "beta", "alpha"]);

    let english = store
        .get_words_by_tag("english")
        .expect("by tag")
        .into_iter()
        .map(|w| w.word.original_text)
        .collect::<Vec<_>>();
    assert_eq!(english, vec!["beta", "alpha"]);

    assert!(store.get_words_by_tag("nope").expect("by tag").is_empty());
}

#[test]
fn storage_open_is_fail_closed_on_foreign_schema() {
    let dir = temp_storage_dir("reset-required");
    let conn = Connection::open(dir.join("vocab.db")).expect("legacy db must open");
    conn.execute("CREATE TABLE words(id INTEGER PRIMARY KEY, text TEXT)", [])
        .expect("legacy table should be created");
    drop(conn);

    let err = SqliteStore::open(&dir, LogService::new(10)).expect_err("must be rejected");
    assert_eq!(err.code(), "RESET_REQUIRED");
    assert!(matches!(
        err,
        StoreError::InvalidInput(message) if message.starts_with("RESET_REQUIRED")
    ));
}

#[test]
fn reopening_keeps_data() {
    let dir = temp_storage_dir("reopen");
    {
        let mut store = SqliteStore::open(&dir, LogService::new(10)).expect("open");
        store.add_word(word_request("persist", "en", 1)).expect("add");
    }
    let store = SqliteStore::open(&dir, LogService::new(10)).expect("reopen");
    let words = store.get_all_words().expect("list");
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word.original_text, "persist");
}
