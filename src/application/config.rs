use crate::infrastructure::DateStyle;
use log::LevelFilter;
use std::path::PathBuf;

pub const DEFAULT_INITIAL_INPUT: &str = "1st century BC";

pub struct Config {
    pub data_dir: PathBuf,
    pub theme: String,
    pub date_style: DateStyle,
    pub log_level: LevelFilter,
    pub initial_input: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("EPOCHAL_DIR").map(PathBuf::from).unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("epochal")
        });

        let theme = lookup("EPOCHAL_THEME").unwrap_or_else(|| "dark".to_string());

        let date_style = lookup("EPOCHAL_DATE_STYLE")
            .map(|style| DateStyle::by_name(&style))
            .unwrap_or_default();

        let log_level = lookup("EPOCHAL_LOG_LEVEL")
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info);

        let initial_input =
            lookup("EPOCHAL_INITIAL_INPUT").unwrap_or_else(|| DEFAULT_INITIAL_INPUT.to_string());

        Self {
            data_dir,
            theme,
            date_style,
            log_level,
            initial_input,
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("epochal.log")
    }
}
