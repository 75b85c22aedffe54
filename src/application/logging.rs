use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

/// Send `epochal` log records to `path`.
///
/// The terminal belongs to the UI, so records only ever go to the file.
pub fn init_file_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let file = open_log_file(path)?;

    let config = ConfigBuilder::new()
        .add_filter_allow_str("epochal")
        .build();

    WriteLogger::init(level, config, file).context("Failed to install logger")?;
    Ok(())
}

/// Open `path` for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
