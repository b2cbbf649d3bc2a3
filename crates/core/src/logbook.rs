#![forbid(unsafe_code)]

//! Process-scoped log service.
//!
//! Entries are kept in a fixed-capacity buffer (newest first, oldest dropped on
//! overflow) so the developer console can list, filter and export recent
//! activity. Every entry is also forwarded to `tracing`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const DEFAULT_LOG_CAPACITY: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogSource {
    Main,
    Renderer,
    Database,
    TranslationApi,
    Ocr,
}

impl LogSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Renderer => "renderer",
            Self::Database => "database",
            Self::TranslationApi => "translation-api",
            Self::Ocr => "ocr",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "main" => Some(Self::Main),
            "renderer" => Some(Self::Renderer),
            "database" => Some(Self::Database),
            "translation-api" => Some(Self::TranslationApi),
            "ocr" => Some(Self::Ocr),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub id: String,
    pub timestamp_ms: i64,
    pub level: LogLevel,
    pub source: LogSource,
    pub message: String,
    pub data: Option<String>,
}

impl LogEntry {
    pub fn timestamp_rfc3339(&self) -> String {
        ts_ms_to_rfc3339(self.timestamp_ms)
    }
}

#[derive(Clone, Debug, Default)]
pub struct LogFilter {
    pub level: Option<LogLevel>,
    pub source: Option<LogSource>,
    pub search: Option<String>,
}

impl LogFilter {
    fn matches(&self, entry: &LogEntry, needle: Option<&str>) -> bool {
        if self.level.is_some_and(|level| level != entry.level) {
            return false;
        }
        if self.source.is_some_and(|source| source != entry.source) {
            return false;
        }
        let Some(needle) = needle else {
            return true;
        };
        entry.message.to_lowercase().contains(needle)
            || entry
                .data
                .as_deref()
                .is_some_and(|data| data.to_lowercase().contains(needle))
    }
}

#[derive(Debug)]
struct LogRing {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_seq: u64,
}

#[derive(Clone, Debug)]
pub struct LogService {
    inner: Arc<Mutex<LogRing>>,
}

impl Default for LogService {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl LogService {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(LogRing {
                entries: VecDeque::with_capacity(capacity.min(4096)),
                capacity,
                next_seq: 0,
            })),
        }
    }

    fn ring(&self) -> MutexGuard<'_, LogRing> {
        // A panic while holding the lock leaves the ring structurally intact.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn capacity(&self) -> usize {
        self.ring().capacity
    }

    pub fn log(
        &self,
        level: LogLevel,
        source: LogSource,
        message: impl Into<String>,
        data: Option<String>,
    ) {
        let message = message.into();
        emit_tracing(level, source, &message, data.as_deref());

        let timestamp_ms = now_ms();
        let mut ring = self.ring();
        let seq = ring.next_seq;
        ring.next_seq = ring.next_seq.wrapping_add(1);
        ring.entries.push_front(LogEntry {
            id: format!("{timestamp_ms}-{seq}"),
            timestamp_ms,
            level,
            source,
            message,
            data,
        });
        let capacity = ring.capacity;
        ring.entries.truncate(capacity);
    }

    pub fn debug(&self, source: LogSource, message: impl Into<String>, data: Option<String>) {
        self.log(LogLevel::Debug, source, message, data);
    }

    pub fn info(&self, source: LogSource, message: impl Into<String>, data: Option<String>) {
        self.log(LogLevel::Info, source, message, data);
    }

    pub fn warning(&self, source: LogSource, message: impl Into<String>, data: Option<String>) {
        self.log(LogLevel::Warning, source, message, data);
    }

    pub fn error(&self, source: LogSource, message: impl Into<String>, data: Option<String>) {
        self.log(LogLevel::Error, source, message, data);
    }

    /// Entries matching `filter`, newest first.
    pub fn entries(&self, filter: &LogFilter) -> Vec<LogEntry> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        self.ring()
            .entries
            .iter()
            .filter(|entry| filter.matches(entry, needle.as_deref()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ring().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring().entries.is_empty()
    }

    pub fn clear(&self) {
        self.ring().entries.clear();
        self.info(LogSource::Main, "Logs cleared by user", None);
    }

    pub fn export(&self) -> String {
        self.ring()
            .entries
            .iter()
            .map(|entry| {
                let mut block = format!(
                    "[{}] [{}] {}: {}",
                    entry.timestamp_rfc3339(),
                    entry.source.as_str().to_uppercase(),
                    entry.level.as_str().to_uppercase(),
                    entry.message
                );
                if let Some(data) = entry.data.as_deref() {
                    block.push_str("\n  Data: ");
                    block.push_str(data);
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn emit_tracing(level: LogLevel, source: LogSource, message: &str, data: Option<&str>) {
    let source = source.as_str();
    let data = data.unwrap_or("");
    match level {
        LogLevel::Debug => tracing::debug!(source, data, "{message}"),
        LogLevel::Info => tracing::info!(source, data, "{message}"),
        LogLevel::Warning => tracing::warn!(source, data, "{message}"),
        LogLevel::Error => tracing::error!(source, data, "{message}"),
    }
}

pub fn now_ms() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let ms = nanos / 1_000_000i128;
    if ms <= 0 {
        0
    } else if ms >= i64::MAX as i128 {
        i64::MAX
    } else {
        ms as i64
    }
}

pub fn ts_ms_to_rfc3339(ts_ms: i64) -> String {
    let nanos = (ts_ms as i128) * 1_000_000i128;
    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    dt.format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}
