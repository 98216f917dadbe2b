//! Output rendering for the CLI

use research_progress_sdk::ProcessedResearchData;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::RenderError;
use crate::summary::summarize;

pub fn render(data: &ProcessedResearchData, output: &OutputConfig) -> Result<String, RenderError> {
    let text = match output.format {
        OutputFormat::Json if output.pretty => serde_json::to_string_pretty(data)?,
        OutputFormat::Json => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Summary => summarize(data).to_string(),
    };
    Ok(text)
}
