//! Static Chart Renderer
//! Draws chart specifications to PNG files with plotters.
//!
//! Layout:
//! - Bar charts: caption on top, one bar per category, category labels
//!   rotated under the x axis.
//! - Pie charts: caption on top, slices with labels and percentages.

use crate::charts::ChartSpec;
use plotters::element::Pie;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

const BAR_COLOR: RGBColor = RGBColor(91, 155, 213);

const PALETTE: [RGBColor; 6] = [
    RGBColor(91, 155, 213),  // Blue
    RGBColor(237, 125, 49),  // Orange
    RGBColor(112, 173, 71),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(255, 192, 0),   // Gold
    RGBColor(96, 125, 139),  // Blue Grey
];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create chart directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to render '{chart}': {message}")]
    Render { chart: String, message: String },
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart into `output_dir` as `<file_stem>.png`.
    ///
    /// Empty charts are skipped and a chart that fails to render is logged;
    /// neither stops the remaining charts. Returns the files written.
    pub fn render_all(charts: &[ChartSpec], output_dir: &Path) -> Result<Vec<PathBuf>, ChartError> {
        std::fs::create_dir_all(output_dir).map_err(|source| ChartError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::new();
        for chart in charts {
            if chart.is_empty() {
                tracing::warn!(chart = chart.file_stem(), "Nothing to plot; chart skipped");
                continue;
            }

            let path = output_dir.join(format!("{}.png", chart.file_stem()));
            match Self::render(chart, &path) {
                Ok(()) => {
                    tracing::info!("Wrote chart {}", path.display());
                    written.push(path);
                }
                Err(err) => tracing::warn!("{}", err),
            }
        }
        Ok(written)
    }

    /// Render a single chart to `path`.
    pub fn render(chart: &ChartSpec, path: &Path) -> Result<(), ChartError> {
        let fail = |err: &dyn Display| ChartError::Render {
            chart: chart.file_stem().to_string(),
            message: err.to_string(),
        };

        match chart {
            ChartSpec::Bar {
                title,
                x_label,
                y_label,
                bars,
                ..
            } => Self::draw_bar_chart(path, title, x_label, y_label, bars).map_err(|e| fail(&e)),
            ChartSpec::Pie { title, slices, .. } => {
                Self::draw_pie_chart(path, title, slices).map_err(|e| fail(&e))
            }
        }
    }

    fn draw_bar_chart(
        path: &Path,
        title: &str,
        x_label: &str,
        y_label: &str,
        bars: &[(String, usize)],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let labels: Vec<String> = bars.iter().map(|(label, _)| label.clone()).collect();
        let y_max = bars.iter().map(|(_, n)| *n).max().unwrap_or(0) as u32;
        // Headroom above the tallest bar.
        let y_top = y_max + (y_max / 10).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(180)
            .y_label_area_size(60)
            .build_cartesian_2d((0..labels.len()).into_segmented(), 0u32..y_top)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .x_labels(labels.len())
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_label_style(
                ("sans-serif", 14)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(6)
                .data(bars.iter().enumerate().map(|(i, (_, n))| (i, *n as u32))),
        )?;

        root.present()?;
        Ok(())
    }

    fn draw_pie_chart(
        path: &Path,
        title: &str,
        slices: &[(String, usize)],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.titled(title, ("sans-serif", 28))?;

        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;

        // Zero-sized slices would only add overlapping labels.
        let visible: Vec<&(String, usize)> = slices.iter().filter(|(_, n)| *n > 0).collect();
        let sizes: Vec<f64> = visible.iter().map(|(_, n)| *n as f64).collect();
        let labels: Vec<String> = visible.iter().map(|(label, _)| label.clone()).collect();
        let colors: Vec<RGBColor> = (0..visible.len())
            .map(|i| PALETTE[i % PALETTE.len()])
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 20).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 18).into_font().color(&WHITE));
        area.draw(&pie)?;

        root.present()?;
        Ok(())
    }
}
