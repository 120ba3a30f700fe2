//! Analysis module - Winner resolution, aggregation and the fixed questions

mod aggregator;
mod questions;
mod resolver;

pub use aggregator::{AggregateError, Aggregator, Dimension, Extreme, ValueCounts};
pub use questions::{answer_questions, InsightReport, LargestMargin, DEFAULT_CLOSE_MARGIN};
pub use resolver::{resolve_all, resolve_winner, Resolution, ResolveError};
