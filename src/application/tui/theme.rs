use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Heading
    pub title: ColorPair,
    pub subtitle: ColorPair,

    // Input line
    pub input_border: ColorPair,
    pub input_text: ColorPair,
    pub placeholder: ColorPair,

    // Live result
    pub status: ColorPair,
    pub resolved_start: ColorPair,
    pub resolved_end: ColorPair,
    pub invalid: ColorPair,

    // History panel
    pub history_header: ColorPair,
    pub history_input: ColorPair,
    pub history_resolved: ColorPair,
    pub history_unresolved: ColorPair,

    // Text
    pub help_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(Self::crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(Self::crossterm_to_ratatui(bg));
        }
        style
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    pub fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
        match color {
            CrosstermColor::Black => RatatuiColor::Black,
            CrosstermColor::DarkRed => RatatuiColor::Red,
            CrosstermColor::DarkGreen => RatatuiColor::Green,
            CrosstermColor::DarkYellow => RatatuiColor::Yellow,
            CrosstermColor::DarkBlue => RatatuiColor::Blue,
            CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
            CrosstermColor::DarkCyan => RatatuiColor::Cyan,
            CrosstermColor::Grey => RatatuiColor::Gray,
            CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
            CrosstermColor::Red => RatatuiColor::LightRed,
            CrosstermColor::Green => RatatuiColor::LightGreen,
            CrosstermColor::Yellow => RatatuiColor::LightYellow,
            CrosstermColor::Blue => RatatuiColor::LightBlue,
            CrosstermColor::Magenta => RatatuiColor::LightMagenta,
            CrosstermColor::Cyan => RatatuiColor::LightCyan,
            CrosstermColor::White => RatatuiColor::White,
            CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
            CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
            _ => RatatuiColor::White,
        }
    }

    /// Apply color to text for plain terminal output
    pub fn colorize(&self, text: &str) -> String {
        let mut styled = text.with(self.fg);
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }

    pub fn colorize_bold(&self, text: &str) -> String {
        let mut styled = text.with(self.fg).bold();
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(CrosstermColor::Rgb { r: 221, g: 214, b: 254 }),
                subtitle: ColorPair::new(CrosstermColor::Grey),

                input_border: ColorPair::new(CrosstermColor::Magenta),
                input_text: ColorPair::new(CrosstermColor::White),
                placeholder: ColorPair::new(CrosstermColor::DarkGrey),

                status: ColorPair::new(CrosstermColor::Green),
                resolved_start: ColorPair::new(CrosstermColor::Green),
                resolved_end: ColorPair::new(CrosstermColor::Grey),
                invalid: ColorPair::new(CrosstermColor::Cyan),

                history_header: ColorPair::new(CrosstermColor::Grey),
                history_input: ColorPair::new(CrosstermColor::White),
                history_resolved: ColorPair::new(CrosstermColor::Green),
                history_unresolved: ColorPair::new(CrosstermColor::Red),

                help_text: ColorPair::new(CrosstermColor::DarkGrey),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(CrosstermColor::DarkMagenta),
                subtitle: ColorPair::new(CrosstermColor::DarkGrey),

                input_border: ColorPair::new(CrosstermColor::DarkBlue),
                input_text: ColorPair::new(CrosstermColor::Black),
                placeholder: ColorPair::new(CrosstermColor::Grey),

                status: ColorPair::new(CrosstermColor::DarkGreen),
                resolved_start: ColorPair::new(CrosstermColor::DarkGreen),
                resolved_end: ColorPair::new(CrosstermColor::DarkGrey),
                invalid: ColorPair::new(CrosstermColor::DarkCyan),

                history_header: ColorPair::new(CrosstermColor::DarkGrey),
                history_input: ColorPair::new(CrosstermColor::Black),
                history_resolved: ColorPair::new(CrosstermColor::DarkGreen),
                history_unresolved: ColorPair::new(CrosstermColor::DarkRed),

                help_text: ColorPair::new(CrosstermColor::DarkBlue),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                title: ColorPair::new(CrosstermColor::White),
                subtitle: ColorPair::new(CrosstermColor::Grey),

                input_border: ColorPair::new(CrosstermColor::White),
                input_text: ColorPair::new(CrosstermColor::White),
                placeholder: ColorPair::new(CrosstermColor::DarkGrey),

                status: ColorPair::new(CrosstermColor::White),
                resolved_start: ColorPair::new(CrosstermColor::White),
                resolved_end: ColorPair::new(CrosstermColor::Grey),
                invalid: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),

                history_header: ColorPair::new(CrosstermColor::Grey),
                history_input: ColorPair::new(CrosstermColor::White),
                history_resolved: ColorPair::new(CrosstermColor::White),
                history_unresolved: ColorPair::new(CrosstermColor::DarkGrey),

                help_text: ColorPair::new(CrosstermColor::Grey),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }
}
