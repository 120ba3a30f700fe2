//! Data module - CSV loading, joining and cleaning

mod cleaner;
pub mod columns;
mod joiner;
mod loader;

pub use cleaner::{DataCleaner, DROPPED_COLUMNS, IDENTIFIER_COLUMNS, MEASURE_COLUMNS};
pub use joiner::{join, JoinError, JoinOutcome, JoinReport, UnmatchedPolicy};
pub use loader::{DatasetLoader, LoaderError, RawTables, DEFAULT_MATCH_FILE, DEFAULT_TEAM_FILE};
