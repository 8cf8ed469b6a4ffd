use crate::OutputFormat;
use crate::config::Config;
use crate::launch::{self, LaunchSummary};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Average the launch times of day found in the CSV at `path`.
pub fn average(config: &Config, path: &Path, format: OutputFormat) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("Error opening file {}", path.display()))?;

    let summary = launch::summarize(BufReader::new(file), &config.launch)
        .with_context(|| format!("Failed to average {}", path.display()))?;

    println!("{}", render(&summary, format)?);
    Ok(())
}

pub fn render(summary: &LaunchSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{} data points.\nAVERAGE: {}",
            summary.data_points, summary.average
        )),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "data_points": summary.data_points,
                "skipped": summary.skipped,
                "average": summary.average.to_string(),
                "average_seconds": summary.average.to_seconds(),
            });
            serde_json::to_string_pretty(&value).context("Failed to serialize summary")
        }
    }
}
