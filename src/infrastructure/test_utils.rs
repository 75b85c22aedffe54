/// Test utilities for session-level tests
///
/// Provides deterministic stand-ins for the interpreter, the clock and save
/// hooks so that session behavior can be checked without depending on the
/// real period grammar or wall-clock time.
///
/// ## Usage Examples
///
/// ```rust,ignore
/// use crate::infrastructure::test_utils::test_harness::*;
///
/// #[test]
/// fn my_test() {
///     let interpreter = StubInterpreter::new().with("1789", some_interpretation);
///     let session = Session::new(Box::new(interpreter), Box::new(FixedClock::default()));
///     // Every save gets the same timestamp...
/// }
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::entities::{HistoryEntry, Interpretation};
    use crate::infrastructure::{Clock, Interpreter, SaveHook};
    use anyhow::Result;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Interpreter backed by a lookup table; anything else is unresolved
    #[derive(Debug, Clone, Default)]
    pub struct StubInterpreter {
        answers: HashMap<String, Interpretation>,
    }

    impl StubInterpreter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, text: &str, interpretation: Interpretation) -> Self {
            self.answers.insert(text.to_string(), interpretation);
            self
        }
    }

    impl Interpreter for StubInterpreter {
        fn interpret(&self, text: &str) -> Interpretation {
            self.answers
                .get(text)
                .copied()
                .unwrap_or(Interpretation::Unresolved)
        }
    }

    /// Clock frozen at a single instant
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock(pub DateTime<Utc>);

    impl Default for FixedClock {
        fn default() -> Self {
            Self(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap())
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[derive(Debug, Default)]
    struct Recorded {
        saves: Vec<String>,
        cleared: Vec<usize>,
    }

    /// Hook that remembers every call; clones share the same record
    #[derive(Debug, Clone, Default)]
    pub struct RecordingHook {
        recorded: Arc<Mutex<Recorded>>,
    }

    impl RecordingHook {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn saves(&self) -> usize {
            self.recorded.lock().unwrap().saves.len()
        }

        pub fn saved_inputs(&self) -> Vec<String> {
            self.recorded.lock().unwrap().saves.clone()
        }

        pub fn cleared(&self) -> Vec<usize> {
            self.recorded.lock().unwrap().cleared.clone()
        }
    }

    impl SaveHook for RecordingHook {
        fn on_entry_saved(&self, entry: &HistoryEntry, _history_len: usize) -> Result<()> {
            self.recorded.lock().unwrap().saves.push(entry.input().to_string());
            Ok(())
        }

        fn on_history_cleared(&self, removed: usize) -> Result<()> {
            self.recorded.lock().unwrap().cleared.push(removed);
            Ok(())
        }

        fn name(&self) -> &str {
            "Recording"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::entities::{HistoryEntry, HistoryId, Interpretation};
    use crate::infrastructure::{Clock, Interpreter, SaveHook};
    use chrono::NaiveDate;

    #[test]
    fn test_stub_interpreter_lookup() {
        let day = NaiveDate::from_ymd_opt(1789, 7, 14).unwrap();
        let interpreter =
            StubInterpreter::new().with("bastille", Interpretation::resolved(day, day));

        assert!(interpreter.interpret("bastille").is_resolved());
        assert_eq!(interpreter.interpret("Bastille"), Interpretation::Unresolved);
    }

    #[test]
    fn test_fixed_clock_never_moves() {
        let clock = FixedClock::default();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_recording_hook_clones_share_state() {
        let hook = RecordingHook::new();
        let clone = hook.clone();
        let entry = HistoryEntry::new(
            HistoryId(7),
            "1789",
            Interpretation::Unresolved,
            FixedClock::default().now(),
        );

        clone.on_entry_saved(&entry, 1).unwrap();
        assert_eq!(hook.saved_inputs(), vec!["1789".to_string()]);
    }
}
