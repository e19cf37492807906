//! Structured logger with dry-run awareness and summary collection.
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{ItemEntry, ItemStatus, Log};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// The `record_item` method is **not** included because its signature differs
/// from the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// All messages are always written to a persistent log file at
/// `$XDG_CACHE_HOME/skillkit/<command>.log` (default `~/.cache/skillkit/<command>.log`)
/// with timestamps and ANSI codes stripped, regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    items: Mutex<Vec<ItemEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the summary.  The log file
    /// itself is created by [`init_subscriber`](super::subscriber::init_subscriber);
    /// this constructor does not write to it.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded item entries (test-only).
    #[cfg(test)]
    pub(crate) fn item_entries(&self) -> Vec<ItemEntry> {
        self.items.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "skillkit::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file via the [`FileLayer`](super::subscriber::FileLayer)).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "skillkit::dry_run", "{msg}");
    }

    /// Record an item result for the summary.
    pub fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.items.lock() {
            guard.push(ItemEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed items.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(ItemStatus::Failed)
    }

    fn count(&self, status: ItemStatus) -> usize {
        self.items.lock().map_or(0, |guard| {
            guard.iter().filter(|t| t.status == status).count()
        })
    }

    /// Print the aggregate count of all recorded items.
    ///
    /// Per-item lines are logged as they happen, so only the totals and the
    /// log file location are printed here.
    pub fn print_summary(&self) {
        let ok = self.count(ItemStatus::Ok);
        let dry_run = self.count(ItemStatus::DryRun);
        let failed = self.failure_count();
        if ok + dry_run + failed == 0 {
            return;
        }

        writeln!(std::io::stdout()).ok();
        if dry_run > 0 {
            self.info(&format!("\x1b[37mPreviewed: {dry_run}\x1b[0m"));
        } else {
            self.info(&format!(
                "\x1b[32mSuccess: {ok}\x1b[0m  \x1b[31mFailed: {failed}\x1b[0m"
            ));
        }

        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        self.record_item(name, status, message);
    }
}
