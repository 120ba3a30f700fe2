//! IPL Insights - exploratory analysis of IPL match data
//!
//! Loads the team and match CSV tables, joins them, works out the winner of
//! every match row and answers a fixed set of questions about the seasons.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod data;
pub mod model;
pub mod pipeline;
pub mod stats;

pub use config::AnalysisConfig;
pub use pipeline::{analyze, Analysis, PipelineError};
