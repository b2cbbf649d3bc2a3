#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::time::Duration;
use vc_core::logbook::DEFAULT_LOG_CAPACITY;

pub(crate) const DEFAULT_STORAGE_DIR: &str = ".vocab_capture";
pub(crate) const DEFAULT_TARGET_LANGUAGE: &str = "zh";
pub(crate) const DEFAULT_TRANSLATOR_TIMEOUT_MS: u64 = 30_000;

const MIN_LOG_CAPACITY: usize = 10;
const MAX_LOG_CAPACITY: usize = 100_000;

/// External translator program: `program args.. <word> <source> <target>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TranslatorCommand {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RuntimeConfig {
    pub(crate) storage_dir: PathBuf,
    /// Explicit target language from CLI or env. `None` defers to the
    /// settings file and then to [`DEFAULT_TARGET_LANGUAGE`].
    pub(crate) target_lang: Option<String>,
    pub(crate) log_capacity: usize,
    pub(crate) translator: Option<TranslatorCommand>,
}

impl RuntimeConfig {
    pub(crate) fn from_process() -> Self {
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::parse(&args, &|key| std::env::var(key).ok())
    }

    /// CLI flags win over environment variables, which win over defaults.
    pub(crate) fn parse(args: &[String], env: &dyn Fn(&str) -> Option<String>) -> Self {
        Self {
            storage_dir: parse_storage_dir(args, env),
            target_lang: parse_target_lang(args, env),
            log_capacity: parse_log_capacity(args, env),
            translator: parse_translator(args, env),
        }
    }
}

fn cli_value(args: &[String], flag: &str) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.as_str() == flag
            && let Some(value) = iter.next()
        {
            return Some(value.clone());
        }
    }
    None
}

fn cli_values(args: &[String], flag: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.as_str() == flag
            && let Some(value) = iter.next()
        {
            out.push(value.clone());
        }
    }
    out
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_storage_dir(
    args: &[String],
    env: &dyn Fn(&str) -> Option<String>,
) -> PathBuf {
    non_blank(cli_value(args, "--storage-dir"))
        .or_else(|| non_blank(env("VOCAB_STORAGE_DIR")))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
}

pub(crate) fn parse_target_lang(
    args: &[String],
    env: &dyn Fn(&str) -> Option<String>,
) -> Option<String> {
    non_blank(cli_value(args, "--target-lang"))
        .or_else(|| non_blank(env("VOCAB_TARGET_LANG")))
        .map(|v| v.to_ascii_lowercase())
}

pub(crate) fn parse_log_capacity(args: &[String], env: &dyn Fn(&str) -> Option<String>) -> usize {
    non_blank(cli_value(args, "--log-capacity"))
        .or_else(|| non_blank(env("VOCAB_LOG_CAPACITY")))
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_LOG_CAPACITY)
        .clamp(MIN_LOG_CAPACITY, MAX_LOG_CAPACITY)
}

pub(crate) fn parse_translator(
    args: &[String],
    env: &dyn Fn(&str) -> Option<String>,
) -> Option<TranslatorCommand> {
    let timeout_ms = non_blank(cli_value(args, "--translator-timeout-ms"))
        .or_else(|| non_blank(env("VOCAB_TRANSLATOR_TIMEOUT_MS")))
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TRANSLATOR_TIMEOUT_MS);
    let timeout = Duration::from_millis(timeout_ms);

    if let Some(program) = non_blank(cli_value(args, "--translator-cmd")) {
        return Some(TranslatorCommand {
            program,
            args: cli_values(args, "--translator-arg"),
            timeout,
        });
    }

    // The env form is a whitespace-separated command line without quoting.
    let raw = non_blank(env("VOCAB_TRANSLATOR_CMD"))?;
    let mut parts = raw.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some(TranslatorCommand {
        program,
        args: parts.collect(),
        timeout,
    })
}
