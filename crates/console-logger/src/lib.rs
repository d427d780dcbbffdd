//! Console Logger
//!
//! `log` backend for the browser. Each record is formatted as
//! `[LEVEL target] message` and sent to the matching `console.*` method.
//! Targets inside the application crate are shown without its name; other
//! crates keep their full path.
//! Outside wasm the lines go to stderr, which keeps native tests quiet
//! unless `--nocapture` is passed.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Logger writing to the browser console
pub struct ConsoleLogger {
    level: LevelFilter,
    /// Crate name stripped from targets
    local_crate: &'static str,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter, local_crate: &'static str) -> Self {
        Self { level, local_crate }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            record.level(),
            record.target(),
            self.local_crate,
            &record.args().to_string(),
        );
        write_line(record.level(), &line);
    }

    fn flush(&self) {}
}

/// Install the console logger as the global `log` backend.
///
/// `local_crate` is the application's crate name (`env!("CARGO_CRATE_NAME")`).
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter, local_crate: &'static str) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(level, local_crate)))?;
    log::set_max_level(level);
    Ok(())
}

/// Parse a level name such as `debug` or `WARN`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Format one log line
pub fn format_line(level: Level, target: &str, local_crate: &str, message: &str) -> String {
    let target = target
        .strip_prefix(local_crate)
        .and_then(|rest| rest.strip_prefix("::"))
        .unwrap_or(target);
    format!("[{} {}] {}", level, target, message)
}

#[cfg(target_arch = "wasm32")]
fn write_line(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(_level: Level, line: &str) {
    eprintln!("{}", line);
}
