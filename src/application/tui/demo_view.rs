use super::keymap::{KeyAction, action_for_key};
use super::plain::{display_state_text, result_summary};
use super::theme::Theme;
use crate::entities::{DisplayState, History, Session, SessionSnapshot};
use crate::infrastructure::DateFormatter;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEvent, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{self, Stdout, stdout};

const MAX_WIDTH: u16 = 80;
const HEADER_HEIGHT: u16 = 3;
const INPUT_HEIGHT: u16 = 3;
const HELP_HEIGHT: u16 = 2;
const PLACEHOLDER: &str = "Enter any string...";

pub struct DemoView<'a> {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Whether we should exit
    should_exit: bool,
    /// Whether to show the full key list
    show_help: bool,
    theme: Theme,
    formatter: &'a dyn DateFormatter,
    /// All state changes go through the session's events
    session: &'a mut Session,
}

impl<'a> DemoView<'a> {
    pub fn new(
        session: &'a mut Session,
        theme: Theme,
        formatter: &'a dyn DateFormatter,
    ) -> io::Result<Self> {
        if !IsTty::is_tty(&stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        log::debug!("Demo view started with theme {}", theme.name);

        Ok(Self {
            terminal,
            should_exit: false,
            show_help: false,
            theme,
            formatter,
            session,
        })
    }

    /// Calculate centered area with both horizontal and vertical centering
    fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
        let width = std::cmp::min(available.width, needed_width);
        let height = std::cmp::min(available.height, needed_height);

        Rect {
            x: available.x + available.width.saturating_sub(width) / 2,
            y: available.y + available.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// The end of `input` that fits in `width` columns
    fn visible_tail(input: &str, width: usize) -> &str {
        let count = input.chars().count();
        if count <= width {
            return input;
        }
        match input.char_indices().nth(count - width) {
            Some((index, _)) => &input[index..],
            None => input,
        }
    }

    fn history_height(history: &History, available: u16) -> u16 {
        if history.is_empty() {
            return 0;
        }
        // Header plus two lines per entry, capped at a third of the screen
        let wanted = 1 + 2 * history.len().min(u16::MAX as usize / 2) as u16;
        wanted.min(available / 3).max(3)
    }

    fn create_header(theme: &Theme) -> Paragraph<'static> {
        Paragraph::new(vec![
            Line::from(Span::styled(
                "E P O C H A L",
                theme.colors.title.to_ratatui_with_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("String → Time", theme.colors.subtitle.to_ratatui())),
        ])
        .alignment(Alignment::Center)
    }

    fn create_input(input: &str, width: u16, theme: &Theme) -> Paragraph<'static> {
        let can_save = !input.trim().is_empty();
        let save_style = if can_save {
            theme.colors.input_border.to_ratatui_with_modifier(Modifier::BOLD)
        } else {
            theme.colors.placeholder.to_ratatui()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.colors.input_border.to_ratatui())
            .title(Line::from(Span::styled(" ⏎ SAVE ", save_style)).right_aligned());

        let content = if input.is_empty() {
            Span::styled(PLACEHOLDER, theme.colors.placeholder.to_ratatui())
        } else {
            let inner_width = width.saturating_sub(3) as usize;
            Span::styled(
                Self::visible_tail(input, inner_width).to_string(),
                theme.colors.input_text.to_ratatui(),
            )
        };

        Paragraph::new(Line::from(content)).block(block)
    }

    fn create_result(
        state: &DisplayState,
        formatter: &dyn DateFormatter,
        theme: &Theme,
    ) -> Paragraph<'static> {
        let (headline, detail) = display_state_text(state, formatter);
        let headline_style = match state {
            DisplayState::Resolved(_) => &theme.colors.resolved_start,
            DisplayState::Unreachable => &theme.colors.invalid,
            DisplayState::AwaitingInput | DisplayState::Interpreting => &theme.colors.status,
        }
        .to_ratatui_with_modifier(Modifier::BOLD);

        let mut lines = vec![Line::from(""), Line::from(Span::styled(headline, headline_style))];
        if let Some(detail) = detail {
            lines.push(Line::from(Span::styled(detail, theme.colors.resolved_end.to_ratatui())));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }

    fn create_history(
        history: &History,
        formatter: &dyn DateFormatter,
        theme: &Theme,
    ) -> Paragraph<'static> {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                "HISTORY",
                theme.colors.history_header.to_ratatui_with_modifier(Modifier::BOLD),
            ),
            Span::styled("  Ctrl+L clear", theme.colors.help_text.to_ratatui()),
        ])];

        for entry in history.iter() {
            let result_style = if entry.result().is_resolved() {
                theme.colors.history_resolved.to_ratatui()
            } else {
                theme.colors.history_unresolved.to_ratatui()
            };
            lines.push(Line::from(Span::styled(
                entry.input().to_string(),
                theme.colors.history_input.to_ratatui_with_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", result_summary(&entry.result(), formatter)),
                result_style,
            )));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(theme.colors.history_header.to_ratatui()),
        )
    }

    fn create_help_text(show_help: bool, theme: &Theme) -> Paragraph<'static> {
        let text = if show_help {
            "Type to interpret • Enter=Save • Backspace/Ctrl+W/Ctrl+U=Delete • Ctrl+L=Clear history • F1=Help • Esc=Quit"
        } else {
            "Enter=Save • F1=Help • Esc=Quit"
        };

        Paragraph::new(Line::from(Span::styled(text, theme.colors.help_text.to_ratatui())))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }

    fn draw(
        frame: &mut Frame,
        snapshot: &SessionSnapshot,
        formatter: &dyn DateFormatter,
        theme: &Theme,
        show_help: bool,
    ) {
        let size = frame.area();
        let area = Self::calculate_centered_area(size, MAX_WIDTH, size.height);
        let history_height = Self::history_height(snapshot.history, area.height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(history_height),
                Constraint::Length(HELP_HEIGHT),
            ])
            .split(area);

        frame.render_widget(Self::create_header(theme), chunks[0]);
        frame.render_widget(Self::create_input(snapshot.input, chunks[1].width, theme), chunks[1]);
        frame.render_widget(
            Self::create_result(&snapshot.display_state, formatter, theme),
            chunks[2],
        );
        if !snapshot.history.is_empty() {
            let history = Self::create_history(snapshot.history, formatter, theme);
            frame.render_widget(history, chunks[3]);
        }
        frame.render_widget(Self::create_help_text(show_help, theme), chunks[4]);

        let inner_width = chunks[1].width.saturating_sub(3) as usize;
        let typed = Self::visible_tail(snapshot.input, inner_width).chars().count() as u16;
        frame.set_cursor_position((chunks[1].x + 1 + typed, chunks[1].y + 1));
    }

    /// Handle keyboard input
    fn handle_key_event(&mut self, key: KeyEvent) {
        match action_for_key(key, self.session.input()) {
            KeyAction::Session(event) => self.session.handle(event),
            KeyAction::ToggleHelp => self.show_help = !self.show_help,
            KeyAction::Quit => self.should_exit = true,
            KeyAction::Ignore => {}
        }
    }

    /// Run the demo loop until the user quits
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if self.should_exit {
                break;
            }

            let snapshot = self.session.snapshot();
            let formatter = self.formatter;
            let theme = &self.theme;
            let show_help = self.show_help;

            self.terminal
                .draw(|frame| Self::draw(frame, &snapshot, formatter, theme, show_help))?;

            // Poll with a timeout so resizes redraw promptly
            if poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key);
                }
            }
        }

        self.cleanup()?;
        log::debug!("Demo view closed with {} history entries", self.session.history().len());
        Ok(())
    }

    /// Explicit cleanup method
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<'a> Drop for DemoView<'a> {
    fn drop(&mut self) {
        // Fallback cleanup if explicit cleanup wasn't called
        let _ = self.cleanup();
    }
}
