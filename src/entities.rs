use crate::infrastructure::{Clock, HookRegistry, Interpreter};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// ============================================================================
// Date Range and Interpretation
// ============================================================================

/// Two calendar dates. Ordering is whatever the interpreter produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether both ends are in order
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

/// Outcome of interpreting a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Interpretation {
    Resolved(DateRange),
    Unresolved,
}

impl Interpretation {
    pub fn resolved(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Resolved(DateRange::new(start, end))
    }

    pub fn range(&self) -> Option<DateRange> {
        match self {
            Self::Resolved(range) => Some(*range),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Option<DateRange>> for Interpretation {
    fn from(range: Option<DateRange>) -> Self {
        range.map_or(Self::Unresolved, Self::Resolved)
    }
}

// ============================================================================
// Display State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    AwaitingInput,
    Interpreting,
    Resolved(DateRange),
    /// No interpretation was available for non-empty input
    Unreachable,
}

impl DisplayState {
    /// Derive what the presentation layer should show.
    ///
    /// Conditions are checked in order and the first match wins: blank input
    /// always awaits input, whatever `interpretation` holds. `None` for a
    /// non-empty input means the caller skipped interpretation, which the
    /// session never does, so it is logged as a defect.
    pub fn derive(input: &str, interpretation: Option<&Interpretation>) -> Self {
        if input.trim().is_empty() {
            return Self::AwaitingInput;
        }

        match interpretation {
            Some(Interpretation::Unresolved) => Self::Interpreting,
            Some(Interpretation::Resolved(range)) => Self::Resolved(*range),
            None => {
                log::error!(
                    "No interpretation for non-empty input {:?}; display state is unreachable",
                    input
                );
                Self::Unreachable
            }
        }
    }
}

// ============================================================================
// History
// ============================================================================

/// Creation-time-derived identifier, strictly increasing within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HistoryId(pub i64);

impl HistoryId {
    /// Next id after `previous`: the timestamp in milliseconds, or one past
    /// the previous id when the clock has not moved forward.
    pub fn next(previous: Option<HistoryId>, created_at: DateTime<Utc>) -> Self {
        let millis = created_at.timestamp_millis();
        match previous {
            Some(HistoryId(prev)) if millis <= prev => HistoryId(prev.saturating_add(1)),
            _ => HistoryId(millis),
        }
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable snapshot of one save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    id: HistoryId,
    input: String,
    result: Interpretation,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        id: HistoryId,
        input: impl Into<String>,
        result: Interpretation,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            input: input.into(),
            result,
            timestamp,
        }
    }

    pub fn id(&self) -> HistoryId {
        self.id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Interpretation {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Saved entries, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    /// Empty the history, returning how many entries were dropped
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Session
// ============================================================================

/// The three ways the outside world can change a [`Session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    TextChanged(String),
    SaveRequested,
    HistoryCleared,
}

/// Read-only view handed to the presentation layer after each event
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub input: &'a str,
    pub display_state: DisplayState,
    pub history: &'a History,
}

/// Owns the input text and history and applies the session events.
///
/// The live interpretation is never stored: every read re-runs the
/// interpreter on the current input.
pub struct Session {
    input: String,
    history: History,
    last_id: Option<HistoryId>,
    interpreter: Box<dyn Interpreter>,
    clock: Box<dyn Clock>,
    hooks: HookRegistry,
}

impl Session {
    pub fn new(interpreter: Box<dyn Interpreter>, clock: Box<dyn Clock>) -> Self {
        Self::with_hooks(interpreter, clock, HookRegistry::new())
    }

    pub fn with_hooks(
        interpreter: Box<dyn Interpreter>,
        clock: Box<dyn Clock>,
        hooks: HookRegistry,
    ) -> Self {
        Self {
            input: String::new(),
            history: History::new(),
            last_id: None,
            interpreter,
            clock,
            hooks,
        }
    }

    /// Start the session with `input` already typed
    pub fn with_initial_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::TextChanged(text) => self.text_changed(text),
            SessionEvent::SaveRequested => {
                self.save_requested();
            }
            SessionEvent::HistoryCleared => self.history_cleared(),
        }
    }

    /// Replace the input verbatim
    pub fn text_changed(&mut self, text: impl Into<String>) {
        self.input = text.into();
        log::debug!("Input changed to {:?}", self.input);
    }

    /// Save the current input and its interpretation, then clear the input.
    ///
    /// Blank input is ignored and `None` is returned.
    pub fn save_requested(&mut self) -> Option<&HistoryEntry> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let result = self.interpreter.interpret(&self.input);
        let timestamp = self.clock.now();
        let id = HistoryId::next(self.last_id, timestamp);
        let entry = HistoryEntry::new(id, trimmed, result, timestamp);

        self.history.prepend(entry);
        self.last_id = Some(id);
        self.input.clear();

        let entry = self.history.latest()?;
        log::info!("Saved {:?} as entry {}", entry.input(), entry.id());
        self.hooks.execute_save_hooks(entry, self.history.len());
        Some(entry)
    }

    pub fn history_cleared(&mut self) {
        let removed = self.history.clear();
        log::info!("Cleared {} history entries", removed);
        self.hooks.execute_clear_hooks(removed);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Interpret the current input. Recomputed on every call.
    pub fn interpretation(&self) -> Interpretation {
        self.interpreter.interpret(&self.input)
    }

    pub fn display_state(&self) -> DisplayState {
        let interpretation = self.interpretation();
        DisplayState::derive(&self.input, Some(&interpretation))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            input: &self.input,
            display_state: self.display_state(),
            history: &self.history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::*;
    use chrono::TimeZone;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn first_century_bc() -> Interpretation {
        Interpretation::resolved(date(-99, 1, 1), date(0, 12, 31))
    }

    fn session_with(interpreter: StubInterpreter) -> Session {
        Session::new(Box::new(interpreter), Box::new(FixedClock::default()))
    }

    #[test]
    fn blank_input_awaits_input_whatever_the_result() {
        let resolved = first_century_bc();
        for input in ["", " ", "\t\n  "] {
            assert_eq!(
                DisplayState::derive(input, Some(&resolved)),
                DisplayState::AwaitingInput
            );
            assert_eq!(
                DisplayState::derive(input, Some(&Interpretation::Unresolved)),
                DisplayState::AwaitingInput
            );
            assert_eq!(DisplayState::derive(input, None), DisplayState::AwaitingInput);
        }
    }

    #[test]
    fn unresolved_non_empty_input_is_interpreting() {
        let session = session_with(StubInterpreter::new()).with_initial_input("1st cen");
        assert_eq!(session.display_state(), DisplayState::Interpreting);
    }

    #[test]
    fn resolved_range_is_passed_through_untouched() {
        let interpreter = StubInterpreter::new().with("1st century BC", first_century_bc());
        let session = session_with(interpreter).with_initial_input("1st century BC");

        assert_eq!(
            session.display_state(),
            DisplayState::Resolved(DateRange::new(date(-99, 1, 1), date(0, 12, 31)))
        );
    }

    #[test]
    fn missing_interpretation_for_non_empty_input_is_unreachable() {
        assert_eq!(DisplayState::derive("1789", None), DisplayState::Unreachable);
    }

    #[test]
    fn repeated_text_changes_are_idempotent() {
        let interpreter = StubInterpreter::new().with(
            "1789",
            Interpretation::resolved(date(1789, 1, 1), date(1789, 12, 31)),
        );
        let mut session = session_with(interpreter);

        session.text_changed("1789");
        let first = (session.input().to_string(), session.display_state());
        for _ in 0..3 {
            session.text_changed("1789");
            assert_eq!(session.input(), first.0);
            assert_eq!(session.display_state(), first.1);
        }
    }

    #[test]
    fn text_changed_stores_text_verbatim() {
        let mut session = session_with(StubInterpreter::new());
        session.text_changed("  mid 1789  ");
        assert_eq!(session.input(), "  mid 1789  ");
    }

    #[test]
    fn live_result_follows_current_input() {
        let interpreter = StubInterpreter::new().with(
            "1789",
            Interpretation::resolved(date(1789, 1, 1), date(1789, 12, 31)),
        );
        let mut session = session_with(interpreter);

        session.text_changed("1789");
        assert!(session.interpretation().is_resolved());
        session.text_changed("17");
        assert_eq!(session.interpretation(), Interpretation::Unresolved);
        session.text_changed("1789");
        assert!(session.interpretation().is_resolved());
    }

    #[test]
    fn saving_whitespace_is_a_no_op() {
        let mut session = session_with(StubInterpreter::new());
        session.text_changed("   ");

        assert!(session.save_requested().is_none());
        assert!(session.history().is_empty());
        assert_eq!(session.input(), "   ");
    }

    #[test]
    fn save_captures_trimmed_input_and_result_then_clears_input() {
        let interpreter = StubInterpreter::new().with("1st century BC", first_century_bc());
        let mut session = session_with(interpreter);
        session.text_changed("1st century BC");

        let saved = session.save_requested().cloned().unwrap();

        assert_eq!(session.history().len(), 1);
        let latest = session.history().get(0).unwrap();
        assert_eq!(latest, &saved);
        assert_eq!(latest.input(), "1st century BC");
        assert_eq!(latest.result(), first_century_bc());
        assert_eq!(session.input(), "");
        assert_eq!(session.display_state(), DisplayState::AwaitingInput);
    }

    #[test]
    fn save_trims_surrounding_whitespace() {
        let interpreter = StubInterpreter::new().with("  1st century BC ", first_century_bc());
        let mut session = session_with(interpreter);
        session.text_changed("  1st century BC ");

        session.save_requested();

        let latest = session.history().latest().unwrap();
        assert_eq!(latest.input(), "1st century BC");
        // Interpreted from the untrimmed input, as displayed
        assert_eq!(latest.result(), first_century_bc());
    }

    #[test]
    fn unresolved_input_is_saved_as_unresolved() {
        let mut session = session_with(StubInterpreter::new());
        session.text_changed("gibberish");
        session.save_requested();

        assert_eq!(session.history().latest().unwrap().result(), Interpretation::Unresolved);
    }

    #[test]
    fn history_is_newest_first_even_with_identical_timestamps() {
        let mut session = session_with(StubInterpreter::new());

        session.text_changed("A");
        session.save_requested();
        session.text_changed("B");
        session.save_requested();

        let inputs: Vec<&str> = session.history().iter().map(|e| e.input()).collect();
        assert_eq!(inputs, vec!["B", "A"]);

        let a = session.history().get(1).unwrap();
        let b = session.history().get(0).unwrap();
        assert_eq!(a.timestamp(), b.timestamp());
        assert!(b.id() > a.id());
    }

    #[test]
    fn clear_empties_history_and_later_saves_still_append() {
        let mut session = session_with(StubInterpreter::new());
        for text in ["A", "B", "C"] {
            session.text_changed(text);
            session.save_requested();
        }
        session.text_changed("draft");

        session.history_cleared();
        assert!(session.history().is_empty());
        assert_eq!(session.input(), "draft");

        session.history_cleared();
        assert!(session.history().is_empty());

        session.save_requested();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().latest().unwrap().input(), "draft");
    }

    #[test]
    fn input_changes_never_touch_saved_entries() {
        let interpreter = StubInterpreter::new().with("1st century BC", first_century_bc());
        let mut session = session_with(interpreter);
        session.text_changed("1st century BC");
        session.save_requested();
        let saved = session.history().latest().cloned().unwrap();

        session.text_changed("something else");
        session.text_changed("1st century BC");

        assert_eq!(session.history().latest(), Some(&saved));
    }

    #[test]
    fn handle_routes_each_event() {
        let mut session = session_with(StubInterpreter::new());

        session.handle(SessionEvent::TextChanged("A".to_string()));
        assert_eq!(session.input(), "A");

        session.handle(SessionEvent::SaveRequested);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.input(), "");

        session.handle(SessionEvent::HistoryCleared);
        assert!(session.history().is_empty());
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let interpreter = StubInterpreter::new().with("1st century BC", first_century_bc());
        let mut session = session_with(interpreter).with_initial_input("1st century BC");

        let snapshot = session.snapshot();
        assert_eq!(snapshot.input, "1st century BC");
        assert!(matches!(snapshot.display_state, DisplayState::Resolved(_)));
        assert!(snapshot.history.is_empty());

        session.save_requested();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.input, "");
        assert_eq!(snapshot.display_state, DisplayState::AwaitingInput);
        assert_eq!(snapshot.history.len(), 1);
    }

    #[test]
    fn hooks_run_after_saves_and_clears() {
        let hook = RecordingHook::new();
        let mut hooks = HookRegistry::new();
        hooks.register(hook.clone());
        let mut session = Session::with_hooks(
            Box::new(StubInterpreter::new()),
            Box::new(FixedClock::default()),
            hooks,
        );

        session.save_requested();
        assert_eq!(hook.saves(), 0);

        session.text_changed("A");
        session.save_requested();
        session.text_changed("B");
        session.save_requested();
        session.history_cleared();

        assert_eq!(hook.saves(), 2);
        assert_eq!(hook.cleared(), vec![2]);
    }

    #[test]
    fn history_id_is_clock_derived_and_strictly_increasing() {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let first = HistoryId::next(None, t);
        assert_eq!(first, HistoryId(t.timestamp_millis()));

        let second = HistoryId::next(Some(first), t);
        assert_eq!(second, HistoryId(first.0 + 1));

        let later = t + chrono::Duration::seconds(1);
        assert_eq!(HistoryId::next(Some(second), later), HistoryId(later.timestamp_millis()));
    }

    #[test]
    fn interpretation_serializes_with_status_tag() {
        let json = serde_json::to_value(first_century_bc()).unwrap();
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["start"], "-0099-01-01");
        assert_eq!(json["end"], "0000-12-31");

        let json = serde_json::to_value(Interpretation::Unresolved).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "unresolved" }));
    }
}
