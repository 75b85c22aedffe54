use crate::entities::HistoryEntry;
use anyhow::Result;

/// Trait for plugins that respond to history changes
pub trait SaveHook: Send + Sync {
    /// Called after an entry has been prepended to the history
    fn on_entry_saved(&self, entry: &HistoryEntry, history_len: usize) -> Result<()>;

    /// Called after the history has been emptied
    fn on_history_cleared(&self, _removed: usize) -> Result<()> {
        Ok(())
    }

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing save hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn SaveHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new save hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: SaveHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Run every hook for a saved entry. Failures are logged and skipped.
    pub fn execute_save_hooks(&self, entry: &HistoryEntry, history_len: usize) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_entry_saved(entry, history_len) {
                log::warn!("Hook '{}' failed after save: {}", hook.name(), e);
            }
        }
    }

    /// Run every hook for a cleared history. Failures are logged and skipped.
    pub fn execute_clear_hooks(&self, removed: usize) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_history_cleared(removed) {
                log::warn!("Hook '{}' failed after clear: {}", hook.name(), e);
            }
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
