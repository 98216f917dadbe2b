use anyhow::{Context, Result};
use clap::Parser;
use research_progress::cli::Args;
use research_progress::follow::LogFollower;
use research_progress::log::{load_events, load_messages};
use research_progress::render::render;
use research_progress::{ResearchTransformer, TracingObserver};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the rendered view only
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.resolve_config()?;
    tracing::debug!(?config, "Configuration resolved");

    let messages = match &args.messages {
        Some(path) => load_messages(path)
            .with_context(|| format!("Failed to load messages from {}", path.display()))?,
        None => Vec::new(),
    };

    let transformer = ResearchTransformer::from_config(&config).with_observer(TracingObserver);

    if args.follow {
        return LogFollower::new(&args.events, transformer, messages, config)
            .run()
            .await;
    }

    let events = load_events(&args.events)
        .with_context(|| format!("Failed to load events from {}", args.events.display()))?;
    let data = transformer.transform(&events, &messages);
    println!("{}", render(&data, &config.output)?);
    Ok(())
}
