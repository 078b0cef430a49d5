//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("build"; "wrote {} pages", count);
//! debug!("query"; "range {}..={}", start, end);
//! ```

use owo_colors::{OwoColorize, Stream};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbose flag, set from `--verbose`.
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a message with a colored module prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message only when verbose output is enabled.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Writes `[module] message`. Errors go to stderr, everything else to stdout.
pub fn log(module: &str, message: &str) {
    let prefix = format!("[{module}]");

    if module.eq_ignore_ascii_case("error") {
        let mut err = std::io::stderr().lock();
        let prefix = prefix.if_supports_color(Stream::Stderr, |p| p.bright_red().bold().to_string());
        writeln!(err, "{prefix} {message}").ok();
        return;
    }

    let mut out = std::io::stdout().lock();
    let prefix = prefix.if_supports_color(Stream::Stdout, |p| colorize(module, p));
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

fn colorize(module: &str, prefix: &str) -> String {
    match module.to_ascii_lowercase().as_str() {
        "build" => prefix.bright_blue().bold().to_string(),
        "auth" => prefix.bright_green().bold().to_string(),
        "warn" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}
