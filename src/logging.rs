// src/logging.rs
use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::Path;

/// Routes `log` records to `path`. Stdout is owned by the terminal UI, so
/// nothing is echoed there.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = fern::log_file(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // Keep the HTTP stack quiet unless explicitly debugging.
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(file)
        .apply()
        .context("Failed to install logger")?;

    Ok(())
}
