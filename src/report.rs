//! Console rendering of the stage reports.

use crate::charts::EdaReport;
use crate::data::{CleanOutcome, FrameSummary};
use crate::fetch::FetchReport;
use crate::stats::hypothesis::{CorrelationTest, GroupComparison, GroupOrder};
use crate::stats::{CorrelationMatrix, DescribeTable, HypothesisReport, SIGNIFICANCE_THRESHOLD};
use std::fmt;

const NAME_WIDTH: usize = 40;

fn verdict(significant: bool) -> String {
    if significant {
        format!("significant at {SIGNIFICANCE_THRESHOLD}")
    } else {
        format!("not significant at {SIGNIFICANCE_THRESHOLD}")
    }
}

fn truncate(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH {
        name.to_string()
    } else {
        let head: String = name.chars().take(NAME_WIDTH - 1).collect();
        format!("{head}~")
    }
}

impl fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: ({}, {})", self.rows, self.columns.len())?;
        writeln!(
            f,
            " #  {:<w$} {:>14}  Dtype",
            "Column",
            "Non-Null Count",
            w = NAME_WIDTH
        )?;
        for (i, col) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "{:>2}  {:<w$} {:>14}  {}",
                i,
                truncate(&col.name),
                col.non_null,
                col.dtype,
                w = NAME_WIDTH
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for DescribeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<w$} {:>8} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
            "",
            "count",
            "mean",
            "std",
            "min",
            "25%",
            "50%",
            "75%",
            "max",
            w = NAME_WIDTH
        )?;
        for row in &self.rows {
            let s = &row.summary;
            writeln!(
                f,
                "{:<w$} {:>8} {:>14.6} {:>14.6} {:>14.6} {:>14.6} {:>14.6} {:>14.6} {:>14.6}",
                truncate(&row.column),
                s.count,
                s.mean,
                s.std,
                s.min,
                s.q25,
                s.median,
                s.q75,
                s.max,
                w = NAME_WIDTH
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for CleanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source: {}", self.source.display())?;
        writeln!(f, "\n--- RAW INFO ---")?;
        write!(f, "{}", self.raw)?;
        writeln!(f, "\n--- AFTER FILTER & DROPNA ---")?;
        write!(f, "{}", self.filtered)?;
        writeln!(f)?;
        write!(f, "{}", self.describe)
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<w$}", "", w = NAME_WIDTH)?;
        for i in 0..self.size() {
            write!(f, " {:>12}", format!("[{i}]"))?;
        }
        writeln!(f)?;
        for (i, label) in self.labels.iter().enumerate() {
            write!(f, "{:<w$}", format!("[{i}] {}", truncate(label)), w = NAME_WIDTH)?;
            for value in &self.values[i] {
                write!(f, " {:>12.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for EdaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EDA ===")?;
        for path in &self.saved {
            writeln!(f, "Saved: {}", path.display())?;
        }
        for entity in &self.skipped_entities {
            writeln!(f, "No data for: {}", entity)?;
        }
        writeln!(f, "\n=== Correlation matrix ===")?;
        write!(f, "{}", self.correlation)
    }
}

impl fmt::Display for GroupComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.split_metric.short_label().to_lowercase();
        writeln!(f, "{}", self.title)?;
        writeln!(f, "q25: {}  q75: {}", self.q25, self.q75)?;
        writeln!(f, "low {} mean: {} (n={})", tag, self.low_mean, self.low_n)?;
        writeln!(f, "high {} mean: {} (n={})", tag, self.high_mean, self.high_n)?;
        let order = match self.order {
            GroupOrder::HighVsLow => "high vs low",
            GroupOrder::LowVsHigh => "low vs high",
        };
        writeln!(
            f,
            "t-stat: {} p-val: {} ({})",
            self.ttest.statistic, self.ttest.p_value, order
        )?;
        writeln!(f, "{}", verdict(self.ttest.is_significant()))
    }
}

impl fmt::Display for CorrelationTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "corr: {} p-val: {} (n={})",
            self.pearson.r, self.pearson.p_value, self.pearson.n
        )?;
        writeln!(f, "{}", verdict(self.pearson.is_significant()))
    }
}

impl fmt::Display for HypothesisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Hypothesis tests ===\n")?;
        writeln!(f, "{}", self.trade)?;
        writeln!(f, "{}", self.gov_expenditure)?;
        write!(f, "{}", self.inflation)
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source: {}", self.url)?;
        writeln!(f, "Saved to: {}", self.output.display())?;
        writeln!(f, "Shape: ({}, {})", self.rows, self.columns.len())?;
        write!(f, "{}", self.preview)
    }
}
