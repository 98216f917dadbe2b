// Shared JSON readers
pub mod utils;

// Latest-state reconstruction
pub mod snapshot;

// Plan extraction
pub mod plan;

// Per-task step synthesis
pub mod steps;

// Task assembly and status resolution
pub mod status;
pub mod tasks;

// Transformation facade
pub mod observer;
pub mod summary;
pub mod transform;

// I/O surfaces
pub mod cli;
pub mod config;
pub mod error;
pub mod follow;
pub mod log;
pub mod render;

pub use config::{ProgressConfig, StepScope};
pub use observer::{NoopObserver, TracingObserver, TransformObserver};
pub use snapshot::StateSnapshot;
pub use summary::{log_summary, summarize, ResearchSummary};
pub use transform::{transform, ResearchTransformer};
