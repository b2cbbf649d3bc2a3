#![forbid(unsafe_code)]

mod dto;
mod entry;
mod server;
mod support;
mod translate;

use crate::server::{VocabServer, VocabServerConfig};
use crate::support::{RuntimeConfig, SystemClock, load_settings};
use crate::translate::{CommandProvider, TranslationProvider, Unconfigured};
use tracing_subscriber::EnvFilter;
use vc_core::logbook::{LogService, LogSource};
use vc_storage::SqliteStore;

const SERVER_NAME: &str = "vc_server";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage() -> &'static str {
    "vc_server: vocabulary capture command server (newline JSON-RPC on stdio)\n\n\
USAGE:\n\
  vc_server [--storage-dir DIR] [--target-lang CODE] [--log-capacity N]\n\
            [--translator-cmd PROG [--translator-arg ARG]...] [--translator-timeout-ms MS]\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version and exit\n\
\n\
ENVIRONMENT:\n\
  VOCAB_STORAGE_DIR, VOCAB_TARGET_LANG, VOCAB_LOG_CAPACITY,\n\
  VOCAB_TRANSLATOR_CMD, VOCAB_TRANSLATOR_TIMEOUT_MS, RUST_LOG\n"
}

fn version_line() -> String {
    format!("{SERVER_NAME} {SERVER_VERSION}")
}

/// Diagnostics go to stderr; stdout carries protocol frames only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{}", version_line());
        return Ok(());
    }

    init_tracing();
    let config = RuntimeConfig::from_process();
    let logbook = LogService::new(config.log_capacity);

    let store = SqliteStore::open(&config.storage_dir, logbook.clone())?;
    let settings = match load_settings(&config.storage_dir) {
        Ok(settings) => settings,
        Err(err) => {
            logbook.warning(
                LogSource::Main,
                "Settings file unreadable; using defaults",
                Some(format!("error={err}")),
            );
            Default::default()
        }
    };

    let provider: Box<dyn TranslationProvider> = match config.translator.clone() {
        Some(command) => {
            logbook.info(
                LogSource::TranslationApi,
                "Translation provider configured",
                Some(format!("program={}", command.program)),
            );
            Box::new(CommandProvider::new(command, logbook.clone()))
        }
        None => Box::new(Unconfigured::new(logbook.clone())),
    };

    logbook.info(
        LogSource::Main,
        "Server started",
        Some(format!(
            "version={SERVER_VERSION} storage_dir={}",
            config.storage_dir.display()
        )),
    );

    let mut server = VocabServer::new(
        store,
        VocabServerConfig {
            provider,
            clock: Box::new(SystemClock),
            settings,
            target_override: config.target_lang,
        },
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let result = entry::run_stdio(&mut server, stdin.lock(), &mut stdout);
    if let Err(err) = &result {
        logbook.error(LogSource::Main, "Server loop failed", Some(err.to_string()));
    }
    result
}
