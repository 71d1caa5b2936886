//! Chart Plotter Module
//! Turns the dataset into plottable series: histogram bins, per-entity time
//! series and heatmap colours. No drawing happens here.

use crate::data::Dataset;
use plotters::style::RGBColor;

/// Line colours for entities, in order of appearance.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(91, 155, 213),  // Blue
    RGBColor(237, 125, 49),  // Orange
    RGBColor(112, 173, 71),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(231, 76, 60),   // Red
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

/// Heatmap colour for an undefined correlation.
pub const NAN_COLOR: RGBColor = RGBColor(200, 200, 200);

const NEGATIVE: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (247.0, 247.0, 247.0);
const POSITIVE: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// One equal-width histogram bin, `[lo, hi)` except the last which is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// GDP-per-capita points of one entity, ordered as in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeries {
    pub entity: String,
    pub points: Vec<(i64, f64)>,
}

/// Series to draw plus the entities that had no rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesPlan {
    pub series: Vec<EntitySeries>,
    pub skipped: Vec<String>,
}

impl TimeSeriesPlan {
    pub fn year_range(&self) -> Option<(i64, i64)> {
        let years = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .filter(|v| v.is_finite())
            .collect();
        ChartPlotter::finite_range(&values)
    }
}

pub struct ChartPlotter;

impl ChartPlotter {
    /// Equal-width bins over `[min, max]` (NumPy `histogram` convention).
    /// A constant input gets the range `[v - 0.5, v + 0.5]`.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let Some((mut min, mut max)) = Self::finite_range(values) else {
            return Vec::new();
        };
        if bins == 0 {
            return Vec::new();
        }
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &v in values.iter().filter(|v| v.is_finite()) {
            let idx = (((v - min) / (max - min)) * bins as f64).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lo: min + i as f64 * width,
                hi: if i + 1 == bins {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect()
    }

    /// Collect per-entity series; entities without rows are listed in
    /// `skipped` and produce no line.
    pub fn time_series(dataset: &Dataset, entities: &[String]) -> TimeSeriesPlan {
        let mut plan = TimeSeriesPlan::default();

        for entity in entities {
            let points: Vec<(i64, f64)> = dataset
                .for_entity(entity)
                .map(|r| (r.year, r.gdp_per_capita))
                .collect();

            if points.is_empty() {
                plan.skipped.push(entity.clone());
            } else {
                plan.series.push(EntitySeries {
                    entity: entity.clone(),
                    points,
                });
            }
        }

        plan
    }

    /// Get color for a series by index.
    pub fn series_color(index: usize) -> RGBColor {
        PALETTE[index % PALETTE.len()]
    }

    /// Diverging blue-white-red colour for a correlation in [-1, 1].
    pub fn heatmap_color(value: f64) -> RGBColor {
        if value.is_nan() {
            return NAN_COLOR;
        }
        let v = value.clamp(-1.0, 1.0);
        let (from, to, t) = if v < 0.0 {
            (NEUTRAL, NEGATIVE, -v)
        } else {
            (NEUTRAL, POSITIVE, v)
        };
        let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
        RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
    }

    /// Min and max over finite values.
    pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Range padded by a fraction of its span; a flat range gets unit padding.
    pub fn padded(range: (f64, f64), fraction: f64) -> (f64, f64) {
        let (lo, hi) = range;
        let pad = if hi > lo { (hi - lo) * fraction } else { 1.0 };
        (lo - pad, hi + pad)
    }
}
