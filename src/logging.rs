#![cfg(feature = "std")]

use std::env;
use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "NAVAL_LOG";

/// Writes `LEVEL [target] message` lines to stderr, keeping stdout free for
/// command output.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let target = record.target();
            let short = target.rsplit("::").next().unwrap_or(target);
            eprintln!("{:<5} [{}] {}", record.level(), short, record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Initialize logging with a level taken from `NAVAL_LOG`, falling back to
/// `default` when the variable is unset or unparsable.
pub fn init_logging_with(default: LevelFilter) {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default);
    // A second call keeps the first logger.
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

/// Initialize logging at `info` unless `NAVAL_LOG` says otherwise.
pub fn init_logging() {
    init_logging_with(LevelFilter::Info);
}
