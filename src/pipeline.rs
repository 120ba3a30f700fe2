//! End-to-end analysis: load, join, clean, resolve, aggregate.

use crate::analysis::{answer_questions, resolve_all, Aggregator, InsightReport, ResolveError};
use crate::data::columns::TEAM_ID;
use crate::data::{join, DataCleaner, DatasetLoader, JoinError, LoaderError, UnmatchedPolicy};
use crate::model::{EnrichedMatch, RecordError, ResolvedMatch, TableError, TeamTable};
use crate::stats::{ColumnSummary, StatsCalculator};
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Invalid team table: {0}")]
    Teams(#[from] TableError),
    #[error(transparent)]
    Join(#[from] JoinError),
    #[error("Invalid match row: {0}")]
    Record(#[from] RecordError),
    #[error("Failed to summarize columns: {0}")]
    Describe(#[from] PolarsError),
}

/// Everything the analysis produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub teams: TeamTable,
    pub summaries: Vec<ColumnSummary>,
    pub rows: Vec<ResolvedMatch>,
    pub issues: Vec<ResolveError>,
    pub report: InsightReport,
}

impl Analysis {
    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(&self.rows)
    }
}

/// Run the whole analysis over the tables `loader` points at.
pub fn analyze(
    loader: &DatasetLoader,
    policy: UnmatchedPolicy,
    close_margin: u32,
) -> Result<Analysis, PipelineError> {
    let raw = loader.load()?;
    let teams = TeamTable::from_frame(&raw.teams)?;
    if teams.is_empty() {
        tracing::warn!("Team table is empty; every match row will be unmatched");
    }

    let joined = join(&raw.matches, &raw.teams, TEAM_ID, policy)?;
    let cleaned = DataCleaner::clean(joined.frame);
    tracing::debug!(schema = ?cleaned.schema(), "Cleaned match frame");

    let summaries = StatsCalculator::describe(&cleaned)?;
    let records = EnrichedMatch::from_frame(&cleaned)?;
    let resolution = resolve_all(records, &teams);

    let agg = Aggregator::new(&resolution.rows);
    if agg.is_empty() {
        tracing::warn!("No match rows left to analyse");
    }
    let report = answer_questions(
        &agg,
        close_margin,
        joined.report,
        resolution.issues.len(),
    );
    tracing::info!(rows = report.rows, "Analysis complete");

    Ok(Analysis {
        teams,
        summaries,
        rows: resolution.rows,
        issues: resolution.issues,
        report,
    })
}
