use super::theme::Theme;
use crate::entities::{DisplayState, Interpretation};
use crate::infrastructure::DateFormatter;

pub const AWAITING_INPUT_TEXT: &str = "Waiting for input...";
pub const INTERPRETING_TEXT: &str = "Keep typing...";
pub const UNREACHABLE_TEXT: &str = "Invalid state...how did you get here?";
pub const UNRESOLVED_TEXT: &str = "NULL";

/// Headline and optional second line for a display state
pub fn display_state_text(
    state: &DisplayState,
    formatter: &dyn DateFormatter,
) -> (String, Option<String>) {
    match state {
        DisplayState::AwaitingInput => (AWAITING_INPUT_TEXT.to_string(), None),
        DisplayState::Interpreting => (INTERPRETING_TEXT.to_string(), None),
        DisplayState::Resolved(range) => (
            formatter.format(range.start),
            Some(format!("→ {}", formatter.format(range.end))),
        ),
        DisplayState::Unreachable => (UNREACHABLE_TEXT.to_string(), None),
    }
}

/// One-line summary of a saved result
pub fn result_summary(result: &Interpretation, formatter: &dyn DateFormatter) -> String {
    match result {
        Interpretation::Resolved(range) => format!(
            "{} to {}",
            formatter.format(range.start),
            formatter.format(range.end)
        ),
        Interpretation::Unresolved => UNRESOLVED_TEXT.to_string(),
    }
}

/// Prints display states to stdout for non-interactive use
pub struct PlainRenderer<'a> {
    theme: &'a Theme,
    formatter: &'a dyn DateFormatter,
}

impl<'a> PlainRenderer<'a> {
    pub fn new(theme: &'a Theme, formatter: &'a dyn DateFormatter) -> Self {
        Self { theme, formatter }
    }

    pub fn render_display_state(&self, input: &str, state: &DisplayState) {
        println!("{}", self.theme.colors.subtitle.colorize(input.trim()));

        let (headline, detail) = display_state_text(state, self.formatter);
        let headline_color = match state {
            DisplayState::Resolved(_) => &self.theme.colors.resolved_start,
            DisplayState::Unreachable => &self.theme.colors.invalid,
            _ => &self.theme.colors.status,
        };
        println!("  {}", headline_color.colorize_bold(&headline));

        if let Some(detail) = detail {
            println!("  {}", self.theme.colors.resolved_end.colorize(&detail));
        }
    }
}
