//! Static Chart Renderer
//! Writes histogram, time-series and correlation-heatmap PNGs with plotters.
//!
//! Layout is fixed at 1000x600 px for the histograms and time series and
//! 800x700 px for the heatmap.

use crate::charts::plotter::{ChartPlotter, HistogramBin, TimeSeriesPlan};
use crate::stats::CorrelationMatrix;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const CHART_SIZE: (u32, u32) = (1000, 600);
const HEATMAP_SIZE: (u32, u32) = (800, 700);
const FONT: &str = "sans-serif";

/// Histogram bar colour
const BAR: RGBColor = RGBColor(91, 155, 213);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw {path}: {message}")]
    Draw { path: String, message: String },
    #[error("Failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    fn draw(path: &Path, err: impl std::fmt::Display) -> Self {
        RenderError::Draw {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    fn open(
        path: &Path,
        size: (u32, u32),
    ) -> Result<DrawingArea<BitMapBackend<'_>, Shift>, RenderError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| RenderError::draw(path, e))?;
        Ok(root)
    }

    /// Draw a histogram of precomputed bins.
    pub fn draw_histogram(
        path: &Path,
        title: &str,
        x_label: &str,
        bins: &[HistogramBin],
    ) -> Result<(), RenderError> {
        let root = Self::open(path, CHART_SIZE)?;

        let (x_min, x_max) = match (bins.first(), bins.last()) {
            (Some(first), Some(last)) => (first.lo, last.hi),
            _ => (0.0, 1.0),
        };
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let y_max = (max_count as f64 * 1.05).ceil();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, 24.0))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(|e| RenderError::draw(path, e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_label)
            .y_desc("Count")
            .draw()
            .map_err(|e| RenderError::draw(path, e))?;

        chart
            .draw_series(bins.iter().map(|b| {
                let mut bar = Rectangle::new(
                    [(b.lo, 0.0), (b.hi, b.count as f64)],
                    BAR.mix(0.75).filled(),
                );
                bar.set_margin(0, 0, 1, 1);
                bar
            }))
            .map_err(|e| RenderError::draw(path, e))?;

        root.present().map_err(|e| RenderError::draw(path, e))?;
        Ok(())
    }

    /// Draw one line with circle markers per entity series.
    pub fn draw_time_series(
        path: &Path,
        title: &str,
        y_label: &str,
        plan: &TimeSeriesPlan,
    ) -> Result<(), RenderError> {
        let root = Self::open(path, CHART_SIZE)?;

        let (year_min, year_max) = plan.year_range().unwrap_or((1990, 2020));
        let (x_min, x_max) = if year_min == year_max {
            (year_min - 1, year_max + 1)
        } else {
            (year_min, year_max)
        };
        let value_range = plan.value_range().unwrap_or((0.0, 1.0));
        let (y_min, y_max) = ChartPlotter::padded(value_range, 0.05);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, 24.0))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| RenderError::draw(path, e))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(y_label)
            .x_label_formatter(&|y| y.to_string())
            .draw()
            .map_err(|e| RenderError::draw(path, e))?;

        for (idx, series) in plan.series.iter().enumerate() {
            let color = ChartPlotter::series_color(idx);

            chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(|e| RenderError::draw(path, e))?
                .label(series.entity.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                )
                .map_err(|e| RenderError::draw(path, e))?;
        }

        if !plan.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(|e| RenderError::draw(path, e))?;
        }

        root.present().map_err(|e| RenderError::draw(path, e))?;
        Ok(())
    }

    /// Draw an annotated heatmap, row 0 at the top.
    pub fn draw_heatmap(
        path: &Path,
        title: &str,
        labels: &[&str],
        matrix: &CorrelationMatrix,
    ) -> Result<(), RenderError> {
        let root = Self::open(path, HEATMAP_SIZE)?;
        let k = matrix.size() as i32;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, 24.0))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(130)
            .build_cartesian_2d((0..k).into_segmented(), (0..k).into_segmented())
            .map_err(|e| RenderError::draw(path, e))?;

        let label_of = |v: &SegmentValue<i32>, flip: bool| -> String {
            match v {
                SegmentValue::CenterOf(i) if (0..k).contains(i) => {
                    let idx = if flip { k - 1 - i } else { *i };
                    labels.get(idx as usize).copied().unwrap_or_default().to_string()
                }
                _ => String::new(),
            }
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(k as usize)
            .y_labels(k as usize)
            .x_label_formatter(&|v| label_of(v, false))
            .y_label_formatter(&|v| label_of(v, true))
            .draw()
            .map_err(|e| RenderError::draw(path, e))?;

        let cells: Vec<(i32, i32, f64)> = (0..k)
            .flat_map(|row| (0..k).map(move |col| (row, col)))
            .map(|(row, col)| (row, col, matrix.get(row as usize, col as usize)))
            .collect();

        chart
            .draw_series(cells.iter().map(|&(row, col, value)| {
                let y = k - 1 - row;
                Rectangle::new(
                    [
                        (SegmentValue::Exact(col), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(col + 1), SegmentValue::Exact(y + 1)),
                    ],
                    ChartPlotter::heatmap_color(value).filled(),
                )
            }))
            .map_err(|e| RenderError::draw(path, e))?;

        let annotation = (FONT, 20.0)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        chart
            .draw_series(cells.iter().map(|&(row, col, value)| {
                let y = k - 1 - row;
                Text::new(
                    format!("{:.2}", value),
                    (SegmentValue::CenterOf(col), SegmentValue::CenterOf(y)),
                    annotation.clone(),
                )
            }))
            .map_err(|e| RenderError::draw(path, e))?;

        root.present().map_err(|e| RenderError::draw(path, e))?;
        Ok(())
    }
}
