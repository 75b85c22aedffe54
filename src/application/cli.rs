use crate::application::{Config, EpochalApp, check_terminal, init_file_logging};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "epochal")]
#[command(about = "Turn descriptions of historical periods into date ranges, live as you type")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive demo (default)
    Tui {
        /// Color theme: dark, light or minimal
        #[arg(short, long)]
        theme: Option<String>,
        /// Text already typed when the demo opens
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Interpret a period once and print the result
    Interpret {
        /// Print the interpretation as JSON
        #[arg(long)]
        json: bool,
        /// Period description, e.g. "1st century BC"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Check that the terminal supports the interactive demo
    CheckTerminal,
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let config = Config::from_env();

        // Logging is optional; a read-only data dir must not stop the demo
        let logging = init_file_logging(&config.log_file(), config.log_level);

        // The TUI owns the terminal, so only line-oriented commands report it
        if matches!(cli.command, Some(Commands::Interpret { .. } | Commands::CheckTerminal)) {
            if let Some(warning) = logging_warning(&logging) {
                eprintln!("{}", warning);
            }
        }

        match cli.command {
            Some(Commands::Tui { theme, input }) => {
                let mut app = EpochalApp::new(config);
                if let Some(theme) = theme {
                    app = app.with_theme(&theme);
                }
                if let Some(input) = input {
                    app = app.with_initial_input(input);
                }
                app.run_tui()?;
            }
            Some(Commands::Interpret { json, text }) => {
                let mut app = EpochalApp::new(config);
                app.print_interpretation(&text.join(" "), json)?;
            }
            Some(Commands::CheckTerminal) => {
                check_terminal()?;
            }
            None => {
                EpochalApp::new(config).run_tui()?;
            }
        }

        Ok(())
    }
}

fn logging_warning(result: &anyhow::Result<()>) -> Option<String> {
    result
        .as_ref()
        .err()
        .map(|e| format!("Warning: file logging disabled: {:#}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_interpret_joins_words() {
        let cli = Cli::try_parse_from(["epochal", "interpret", "1st", "century", "BC"]).unwrap();
        match cli.command {
            Some(Commands::Interpret { json, text }) => {
                assert!(!json);
                assert_eq!(text.join(" "), "1st century BC");
            }
            _ => panic!("expected interpret"),
        }
    }

    #[test]
    fn test_logging_failure_is_reported() {
        assert_eq!(logging_warning(&Ok(())), None);

        let failed: anyhow::Result<()> =
            Err(anyhow::anyhow!("permission denied").context("Failed to open log file"));
        let warning = logging_warning(&failed).unwrap();
        assert!(warning.starts_with("Warning: file logging disabled"));
        assert!(warning.contains("Failed to open log file"));
        assert!(warning.contains("permission denied"));
    }

    #[test]
    fn test_interpret_requires_text() {
        assert!(Cli::try_parse_from(["epochal", "interpret"]).is_err());
    }

    #[test]
    fn test_tui_flags() {
        let cli =
            Cli::try_parse_from(["epochal", "tui", "--theme", "light", "-i", "1789"]).unwrap();
        match cli.command {
            Some(Commands::Tui { theme, input }) => {
                assert_eq!(theme.as_deref(), Some("light"));
                assert_eq!(input.as_deref(), Some("1789"));
            }
            _ => panic!("expected tui"),
        }
        assert!(Cli::try_parse_from(["epochal"]).unwrap().command.is_none());
    }
}
