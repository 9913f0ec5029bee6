//! Log setup for the `ngtax` binary.
//!
//! Everything goes to stderr so stdout stays clean for command output. A log
//! file, when requested, receives the same records without colour.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self as sub_fmt, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Filter used when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_FILTER: &str = "info";

/// Target prefix of events that are labelled by target instead of location.
const TARGET_PREFIX: &str = "ngtax::";

/// Logging choices taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions<'a> {
    /// Filter directives; overrides `RUST_LOG` when set.
    pub level: Option<&'a str>,
    /// Also append every record to this file.
    pub file: Option<&'a Path>,
}

/// One line per event: `14:03:22.117  WARN app.rs:96 message key=value`.
struct CliFormat;

impl<S, N> FormatEvent<S, N> for CliFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();

        write!(writer, "{} ", Local::now().format("%H:%M:%S%.3f"))?;
        if writer.has_ansi_escapes() {
            write!(writer, "\x1b[{}m{:>5}\x1b[0m ", level_colour(level), level)?;
        } else {
            write!(writer, "{level:>5} ")?;
        }
        if let Some(origin) = origin(meta) {
            write!(writer, "{origin} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "1;32",
        Level::DEBUG => "1;34",
        Level::TRACE => "1;35",
    }
}

/// `[target]` for the tool's own named targets (analytics), otherwise the
/// source file relative to its crate's `src/`, with the line number.
fn origin(meta: &Metadata<'_>) -> Option<String> {
    if meta.target().starts_with(TARGET_PREFIX) {
        return Some(format!("[{}]", meta.target()));
    }
    let file = meta.file()?;
    let short = file
        .rsplit_once("src/")
        .or_else(|| file.rsplit_once("src\\"))
        .map_or(file, |(_, rest)| rest);
    Some(match meta.line() {
        Some(line) => format!("{short}:{line}"),
        None => short.to_string(),
    })
}

fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log level '{directives}'")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber. Call once, after argument parsing.
///
/// # Errors
///
/// Fails on an unparsable `--log-level`, an unopenable `--log-file`, or if
/// a global subscriber is already installed.
pub fn init_logging(options: &LogOptions<'_>) -> Result<()> {
    let filter = build_filter(options.level)?;

    let file_layer = match options.file {
        Some(path) => Some(
            sub_fmt::layer()
                .event_format(CliFormat)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };
    let stderr_layer = sub_fmt::layer()
        .event_format(CliFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
