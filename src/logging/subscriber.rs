//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// How an event is presented, decided once from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Stage,
    DryRun,
    Error,
    Warn,
    Info,
    Debug,
}

impl LineKind {
    const STAGE_TARGET: &'static str = "skillkit::stage";
    const DRY_RUN_TARGET: &'static str = "skillkit::dry_run";

    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => Self::Error,
            (tracing::Level::WARN, _) => Self::Warn,
            (tracing::Level::INFO, Self::STAGE_TARGET) => Self::Stage,
            (tracing::Level::INFO, Self::DRY_RUN_TARGET) => Self::DryRun,
            (tracing::Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Plain-text line for the log file.
    fn file_line(self, ts: &str, msg: &str) -> String {
        match self {
            Self::Stage => format!("[{ts}] ==> {msg}"),
            Self::DryRun => format!("[{ts}]     [dry run] {msg}"),
            Self::Error => format!("[{ts}]     [error] {msg}"),
            Self::Warn => format!("[{ts}]     [warn] {msg}"),
            Self::Debug => format!("[{ts}]     [debug] {msg}"),
            Self::Info => format!("[{ts}]     {msg}"),
        }
    }

    /// Coloured line for the terminal.
    fn console_line(self, msg: &str) -> String {
        match self {
            Self::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::DryRun => format!("  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut extractor = MessageExtractor::default();
    event.record(&mut extractor);
    extractor.message
}

/// A [`tracing_subscriber::Layer`] that appends all events to the persistent
/// log file with timestamps and ANSI codes stripped.
///
/// Created by [`init_subscriber`] so that file output goes through the same
/// tracing pipeline as console output.  Always captures events at `DEBUG`
/// level and above regardless of the console verbosity setting.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open (or create) the log file for `command`, write a run header, and
    /// return a new `FileLayer` ready to receive events.
    ///
    /// Returns `None` if the cache directory cannot be created or the file
    /// cannot be opened.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version = crate::VERSION;
        let header = format!(
            "==========================================\n\
             skillkit {version} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let msg = strip_ansi(&message_of(event));
        let line = LineKind::of(event.metadata()).file_line(&format_utc_time(), &msg);

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits `sk` console
/// output: stage arrows, indented info lines, and level tags on stderr.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let line = LineKind::of(event.metadata()).console_line(&message_of(event));
        writeln!(writer, "{line}")
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Sets up a console layer that formats events in the `sk` output style and
/// a file layer that writes all events (including `debug`) to
/// `$XDG_CACHE_HOME/skillkit/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_lines_are_marked_on_both_outputs() {
        assert_eq!(
            LineKind::DryRun.file_line("12:00:00", "foo → claude"),
            "[12:00:00]     [dry run] foo → claude"
        );
        assert_eq!(
            strip_ansi(&LineKind::DryRun.console_line("foo → claude")),
            "  [DRY RUN] foo → claude"
        );
    }

    #[test]
    fn level_tags_survive_ansi_stripping() {
        assert_eq!(strip_ansi(&LineKind::Error.console_line("x")), "ERROR x");
        assert_eq!(strip_ansi(&LineKind::Warn.console_line("x")), "WARN  x");
        assert_eq!(strip_ansi(&LineKind::Stage.console_line("x")), "==> x");
        assert_eq!(strip_ansi(&LineKind::Info.console_line("x")), "  x");
        assert_eq!(
            LineKind::Warn.file_line("00:00:01", "x"),
            "[00:00:01]     [warn] x"
        );
    }
}
