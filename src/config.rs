//! Command line and environment configuration.

use crate::analysis::DEFAULT_CLOSE_MARGIN;
use crate::data::{UnmatchedPolicy, DEFAULT_MATCH_FILE, DEFAULT_TEAM_FILE};
use clap::Parser;
use std::path::PathBuf;

/// Environment variable naming the dataset directory.
pub const DATA_DIR_ENV: &str = "IPL_DATA_DIR";

/// Directory used when neither the command line nor the environment names one.
pub const DEFAULT_DATA_DIR: &str = "./indian-premier-league-csv-dataset";

#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-insights")]
#[command(about = "Exploratory analysis of IPL match and team CSV tables")]
pub struct AnalysisConfig {
    /// Directory holding the team and match CSV files
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Team table file name inside DATA_DIR
    #[arg(long, default_value = DEFAULT_TEAM_FILE)]
    pub team_file: String,

    /// Match table file name inside DATA_DIR
    #[arg(long, default_value = DEFAULT_MATCH_FILE)]
    pub match_file: String,

    /// Write PNG charts into this directory
    #[arg(long, value_name = "DIR")]
    pub charts: Option<PathBuf>,

    /// What to do with match rows whose team is not in the team table
    #[arg(long, value_enum, default_value_t = UnmatchedPolicy::Warn)]
    pub unmatched: UnmatchedPolicy,

    /// Wins by fewer runs than this count as close matches
    #[arg(long, default_value_t = DEFAULT_CLOSE_MARGIN)]
    pub close_margin: u32,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl AnalysisConfig {
    /// Dataset directory: the command line first, then `IPL_DATA_DIR`, then
    /// [`DEFAULT_DATA_DIR`].
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir_with(std::env::var(DATA_DIR_ENV).ok())
    }

    fn data_dir_with(&self, env_value: Option<String>) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}
