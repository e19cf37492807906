//! Core logging types: outcome entries, status, and the [`Log`] trait.

/// Per-item result recorded for the batch summary.
#[derive(Debug, Clone)]
pub struct ItemEntry {
    /// Item label, e.g. `"foo → claude"`.
    pub name: String,
    /// Final status of the item.
    pub status: ItemStatus,
    /// Optional detail message (e.g., the error description).
    pub message: Option<String>,
}

/// Status of a processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// The link was created, replaced or removed.
    Ok,
    /// Previewed only; no changes were applied.
    DryRun,
    /// The operation was refused or failed.
    Failed,
}

/// Abstraction over logging backends.
///
/// The reconciliation engine and the interactive session log through this
/// trait so that tests can capture per-item outcomes without a console.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an item result for the summary.
    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>);
}
