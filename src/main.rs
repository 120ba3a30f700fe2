//! IPL Insights - command line entry point
//!
//! Prints the describe table and the answers to the match questions, and
//! optionally writes the charts as PNG files.

use anyhow::{Context, Result};
use clap::Parser;
use ipl_insights::charts::{standard_charts, StaticChartRenderer};
use ipl_insights::data::DatasetLoader;
use ipl_insights::stats::DescribeTable;
use ipl_insights::{analyze, AnalysisConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AnalysisConfig::parse();
    let data_dir = config.resolved_data_dir();
    tracing::info!("Analysing IPL data in {}", data_dir.display());

    let loader = DatasetLoader::new(&data_dir).with_file_names(&config.team_file, &config.match_file);
    let analysis = analyze(&loader, config.unmatched, config.close_margin)
        .with_context(|| format!("Analysis of {} failed", data_dir.display()))?;

    if let Some(dir) = &config.charts {
        let charts = standard_charts(&analysis.aggregator(), config.close_margin);
        let written = StaticChartRenderer::render_all(&charts, dir)
            .with_context(|| format!("Could not write charts to {}", dir.display()))?;
        tracing::info!("Wrote {} of {} charts", written.len(), charts.len());
    }

    if config.json {
        let output = serde_json::json!({
            "describe": analysis.summaries,
            "report": analysis.report,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize report")?
        );
    } else {
        println!("{}", DescribeTable(&analysis.summaries));
        println!("{}", analysis.report);
    }

    Ok(())
}
