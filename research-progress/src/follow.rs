//! Follow mode: re-render the view whenever the event log grows
//!
//! The log is polled rather than watched. Each time its length changes the
//! whole file is re-read and the view recomputed from scratch, which is cheap
//! compared to the pipeline that produces the events and keeps the output
//! identical to a one-shot run over the same file.

use anyhow::{Context, Result};
use research_progress_sdk::{EventRecord, Message};
use std::path::{Path, PathBuf};

use crate::config::ProgressConfig;
use crate::error::LogError;
use crate::log::{load_events_from_str, read_log};
use crate::render::render;
use crate::transform::ResearchTransformer;

pub struct LogFollower {
    path: PathBuf,
    transformer: ResearchTransformer,
    messages: Vec<Message>,
    config: ProgressConfig,
    last_len: Option<u64>,
}

impl LogFollower {
    pub fn new(
        path: impl Into<PathBuf>,
        transformer: ResearchTransformer,
        messages: Vec<Message>,
        config: ProgressConfig,
    ) -> Self {
        Self {
            path: path.into(),
            transformer,
            messages,
            config,
            last_len: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rendered view if the log changed since the previous call
    pub async fn poll(&mut self) -> Result<Option<String>> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .with_context(|| format!("Failed to stat {}", self.path.display()))?;
        let len = metadata.len();
        if self.last_len == Some(len) {
            return Ok(None);
        }

        let text = read_log(&self.path).await?;
        // A log that fails to parse is not retried until it changes again.
        self.last_len = Some(len);
        let events = parse_growing_log(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), bytes = len, events = events.len(), "Event log changed");
        let data = self.transformer.transform(&events, &self.messages);
        Ok(Some(render(&data, &self.config.output)?))
    }

    /// Poll until Ctrl-C, printing every new rendering to stdout
    pub async fn run(mut self) -> Result<()> {
        let mut interval = tokio::time::interval(self.config.follow.poll_interval());
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        tracing::info!(
            path = %self.path.display(),
            poll_ms = self.config.follow.poll_interval().as_millis() as u64,
            "Following event log"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.poll().await {
                        Ok(Some(rendered)) => println!("{}", rendered),
                        Ok(None) => {}
                        Err(e) => tracing::warn!("Failed to refresh view: {:#}", e),
                    }
                }
                result = &mut shutdown => {
                    result.context("Failed to listen for Ctrl-C")?;
                    tracing::info!("Stopped following event log");
                    return Ok(());
                }
            }
        }
    }
}

/// Parse a log that may still be mid-write. A trailing line without a newline
/// that fails to parse is treated as incomplete and dropped.
pub fn parse_growing_log(text: &str) -> Result<Vec<EventRecord>, LogError> {
    match load_events_from_str(text) {
        Ok(events) => Ok(events),
        Err(err) if !text.ends_with('\n') && !text.trim_start().starts_with('[') => {
            match text.rfind('\n') {
                Some(end) => load_events_from_str(&text[..=end]),
                None if text.trim().is_empty() => Ok(Vec::new()),
                None => Err(err),
            }
        }
        Err(err) => Err(err),
    }
}
