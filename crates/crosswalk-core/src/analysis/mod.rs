pub mod config;
mod orchestrator;
mod types;

pub use config::{AnalysisConfig, BatchFile, ThresholdBasis};
pub use orchestrator::{analyze_batch, analyze_stripes, analyze_stripes_reported};
pub use types::{AnalysisStage, ProgressReporter, SignalTrace, StripeAnalysis};
