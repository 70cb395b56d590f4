//! File logging. The terminal belongs to the TUI, so nothing is written to stderr.

use anyhow::Result;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_FILE: &str = concat!(env!("CARGO_PKG_NAME"), ".log");

/// Parse a level name, falling back to `info`
pub fn parse_level(level: &str) -> tracing::Level {
    level.parse().unwrap_or(tracing::Level::INFO)
}

/// Log to `path` at `level`; `RUST_LOG` directives take precedence
pub fn init(path: &Path, level: tracing::Level) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(Mutex::new(file))
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(file_layer).try_init()?;

    tracing::info!("Logging to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("debug"), tracing::Level::DEBUG);
        assert_eq!(parse_level("WARN"), tracing::Level::WARN);
        assert_eq!(parse_level("loud"), tracing::Level::INFO);
    }
}
