#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use vc_core::logbook::LogService;
use vc_storage::{AddWordRequest, SqliteStore};

pub fn temp_storage_dir(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic enough for tests")
        .as_nanos();
    path.push(format!(
        "vc-storage-{label}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&path).expect("temp storage dir must be creatable");
    path
}

pub fn open_store(label: &str) -> (SqliteStore, LogService) {
    let logs = LogService::new(200);
    let store =
        SqliteStore::open(temp_storage_dir(label), logs.clone()).expect("fresh storage should open");
    (store, logs)
}

pub fn word_request(text: &str, lang: &str, now_ms: i64) -> AddWordRequest {
    AddWordRequest {
        original_text: text.to_string(),
        source_language: lang.to_string(),
        now_ms,
    }
}
