//! Output handling for reports.

use crate::reports::{ReportError, ReportFormat, ReportGenerator, create_reporter_with_options};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }

    /// Check if output is to a terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Determine if color should be used based on flags and environment
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Render with the chosen format and write to the target.
///
/// Color is only used when writing to a terminal.
pub fn output_report<F>(
    format: ReportFormat,
    no_color: bool,
    target: &OutputTarget,
    quiet: bool,
    render: F,
) -> Result<()>
where
    F: FnOnce(&dyn ReportGenerator) -> Result<String, ReportError>,
{
    let use_color = should_use_color(no_color) && target.is_terminal();
    let reporter = create_reporter_with_options(format, use_color);
    let content = render(reporter.as_ref()).context("Failed to render report")?;
    write_output(&content, target, quiet)
}
