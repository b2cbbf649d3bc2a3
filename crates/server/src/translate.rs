#![forbid(unsafe_code)]

//! Translation provider boundary.
//!
//! A provider turns `(word, source, target)` into [`TranslationData`] or
//! nothing. Absence and failure are the same to callers: the word is stored
//! without a translation.

use crate::support::TranslatorCommand;
use serde::Deserialize;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use vc_core::logbook::{LogService, LogSource};
use vc_core::model::TranslationData;

pub(crate) trait TranslationProvider {
    fn translate(&self, word: &str, source: &str, target: &str) -> Option<TranslationData>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderReply {
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    pronunciation: Option<String>,
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    examples: Vec<String>,
    #[serde(default)]
    usage_notes: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Extracts the span from the first `{` to the last `}` of free text and
/// decodes it as a camelCase translation reply.
pub(crate) fn parse_provider_reply(text: &str) -> Option<TranslationData> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    let reply: ProviderReply = serde_json::from_str(&text[start..=end]).ok()?;
    let translation = non_blank(reply.translation)?;
    Some(TranslationData {
        translation: translation.trim().to_string(),
        definition: non_blank(reply.definition),
        pronunciation: non_blank(reply.pronunciation),
        part_of_speech: non_blank(reply.part_of_speech),
        examples: reply.examples,
        usage_notes: non_blank(reply.usage_notes),
    })
}

/// No provider configured: every request yields nothing.
#[derive(Clone, Debug)]
pub(crate) struct Unconfigured {
    logbook: LogService,
}

impl Unconfigured {
    pub(crate) fn new(logbook: LogService) -> Self {
        Self { logbook }
    }
}

impl TranslationProvider for Unconfigured {
    fn translate(&self, word: &str, _source: &str, _target: &str) -> Option<TranslationData> {
        self.logbook.warning(
            LogSource::TranslationApi,
            "Translation provider not configured",
            Some(format!("word={word}")),
        );
        None
    }
}

/// Runs an external program per request and parses its stdout.
#[derive(Clone, Debug)]
pub(crate) struct CommandProvider {
    command: TranslatorCommand,
    logbook: LogService,
}

const POLL_INTERVAL: Duration = Duration::from_millis(10);

impl CommandProvider {
    pub(crate) fn new(command: TranslatorCommand, logbook: LogService) -> Self {
        Self { command, logbook }
    }

    fn run(&self, word: &str, source: &str, target: &str) -> Result<String, String> {
        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(word)
            .arg(source)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| format!("spawn failed: {err}"))?;

        let Some(mut stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err("stdout unavailable".to_string());
        };
        // Drain stdout concurrently so a chatty child never blocks on a full pipe.
        let reader = std::thread::spawn(move || {
            let mut out = String::new();
            stdout.read_to_string(&mut out).map(|_| out)
        });

        let deadline = Instant::now() + self.command.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!(
                        "timed out after {}ms",
                        self.command.timeout.as_millis()
                    ));
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!("wait failed: {err}"));
                }
            }
        };

        let output = match reader.join() {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => return Err(format!("read failed: {err}")),
            Err(_) => return Err("reader thread panicked".to_string()),
        };
        if !status.success() {
            return Err(format!("exited with {status}"));
        }
        Ok(output)
    }
}

impl TranslationProvider for CommandProvider {
    fn translate(&self, word: &str, source: &str, target: &str) -> Option<TranslationData> {
        self.logbook.info(
            LogSource::TranslationApi,
            "Translation request started",
            Some(format!("word={word} source={source} target={target}")),
        );

        let output = match self.run(word, source, target) {
            Ok(output) => output,
            Err(err) => {
                self.logbook.error(
                    LogSource::TranslationApi,
                    "Translation request failed",
                    Some(format!("word={word} error={err}")),
                );
                return None;
            }
        };

        let parsed = parse_provider_reply(&output);
        if parsed.is_none() {
            self.logbook.warning(
                LogSource::TranslationApi,
                "Translation reply could not be parsed",
                Some(format!("word={word} len={}", output.len())),
            );
        }
        self.logbook.info(
            LogSource::TranslationApi,
            "Translation request completed",
            Some(format!("word={word} success={}", parsed.is_some())),
        );
        parsed
    }
}
