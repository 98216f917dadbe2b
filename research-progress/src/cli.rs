//! CLI argument parsing

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::{OutputFormat, ProgressConfig, StepScope};

/// Render the task/step progress view of a research pipeline event log
#[derive(Parser, Debug, Clone)]
#[command(name = "research-progress", version)]
pub struct Args {
    /// Event log (JSON array, JSON lines, or an SSE capture)
    pub events: PathBuf,

    /// Message transcript in the same layouts as the event log
    #[arg(short, long)]
    pub messages: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "RESEARCH_PROGRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,

    /// Only feed a task the events whose payload carries this field equal to its id
    #[arg(long)]
    pub scope_field: Option<String>,

    /// Keep watching the event log and re-render when it grows
    #[arg(long)]
    pub follow: bool,

    /// Poll interval for --follow, in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "research_progress=trace")
    #[arg(long, env = "RESEARCH_PROGRESS_LOG", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Config file values with command-line overrides applied
    pub fn resolve_config(&self) -> Result<ProgressConfig> {
        let mut config = match &self.config {
            Some(path) => ProgressConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ProgressConfig::default(),
        };

        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.compact {
            config.output.pretty = false;
        }
        if let Some(field) = &self.scope_field {
            config.step_scope = StepScope::TaskField {
                field: field.clone(),
            };
        }
        if let Some(ms) = self.poll_interval_ms {
            config.follow.poll_interval_ms = ms;
        }
        Ok(config)
    }
}
