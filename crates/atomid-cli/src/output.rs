use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::EnvFilter;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Logs go to stderr so stdout stays parseable. `ATOMID_LOG` overrides `level`.
pub fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_env("ATOMID_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// Print `value` as JSON in JSON mode, otherwise the human rendering.
pub fn print<T: Serialize>(value: &T, human: impl FnOnce() -> String) -> anyhow::Result<()> {
    if is_json() {
        let s = serde_json::to_string_pretty(value)?;
        println!("{s}");
        return Ok(());
    }
    let s = human();
    println!("{}", s.trim_end());
    Ok(())
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

/// Write `text` in `color`, then reset.
pub fn write_colored(out: &mut StandardStream, color: Color, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(out, "{text}")?;
    out.reset()
}

/// Spinner on stderr; hidden in JSON mode.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
