use crate::entities::{HistoryEntry, Interpretation};
use crate::infrastructure::SaveHook;
use anyhow::Result;

/// Plugin that logs every save and clear through the `log` facade
pub struct SimpleLoggerHook;

impl SimpleLoggerHook {
    fn describe(entry: &HistoryEntry) -> String {
        match entry.result() {
            Interpretation::Resolved(range) => format!("{} to {}", range.start, range.end),
            Interpretation::Unresolved => "NULL".to_string(),
        }
    }
}

impl SaveHook for SimpleLoggerHook {
    fn on_entry_saved(&self, entry: &HistoryEntry, history_len: usize) -> Result<()> {
        log::info!(
            "[{}] Entry {} saved - Input: {:?} - Result: {} - History length: {}",
            entry.timestamp().format("%Y-%m-%d %H:%M:%S UTC"),
            entry.id(),
            entry.input(),
            Self::describe(entry),
            history_len
        );
        Ok(())
    }

    fn on_history_cleared(&self, removed: usize) -> Result<()> {
        log::info!("History cleared - {} entries removed", removed);
        Ok(())
    }

    fn name(&self) -> &str {
        "Simple Logger"
    }
}
