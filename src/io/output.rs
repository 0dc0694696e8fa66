use crate::pipeline::{IndexOutcome, PreparedData};
use crate::scoring::{ClassifiedRow, FeatureWeight, Tier, TierCounts, WeightVector};
use colored::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "terminal" => Some(Self::Terminal),
            _ => None,
        }
    }
}

pub trait OutputWriter {
    fn write_index(&mut self, outcome: &IndexOutcome) -> anyhow::Result<()>;
    fn write_weights(&mut self, weights: &WeightVector) -> anyhow::Result<()>;
    fn write_partition(&mut self, prepared: &PreparedData) -> anyhow::Result<()>;
}

/// Serialized shape of an index run
#[derive(Debug, Serialize)]
pub struct IndexDocument<'a> {
    pub reference: &'a str,
    pub weights: Vec<&'a FeatureWeight>,
    /// Classified rows, highest index first
    pub rows: Vec<ClassifiedRow>,
    pub dropped_rows: &'a [usize],
    pub tier_counts: TierCounts,
    /// Absent when no partition was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<PartitionDocument<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PartitionDocument<'a> {
    pub train_rows: &'a [usize],
    pub test_rows: &'a [usize],
}

impl<'a> IndexDocument<'a> {
    pub fn new(outcome: &'a IndexOutcome) -> Self {
        Self {
            reference: outcome.weights.reference(),
            weights: outcome.weights.iter().collect(),
            rows: outcome.report.sorted_by_index_desc(),
            dropped_rows: outcome.report.dropped_rows(),
            tier_counts: outcome.report.tier_counts(),
            partition: outcome.split.as_ref().map(|split| PartitionDocument {
                train_rows: &split.train_rows,
                test_rows: &split.test_rows,
            }),
        }
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_index(&mut self, outcome: &IndexOutcome) -> anyhow::Result<()> {
        self.write_json(&IndexDocument::new(outcome))
    }

    fn write_weights(&mut self, weights: &WeightVector) -> anyhow::Result<()> {
        self.write_json(weights)
    }

    fn write_partition(&mut self, prepared: &PreparedData) -> anyhow::Result<()> {
        self.write_json(&PartitionDocument {
            train_rows: &prepared.split.train_rows,
            test_rows: &prepared.split.test_rows,
        })
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_weight_table(&mut self, weights: &WeightVector) -> anyhow::Result<()> {
        writeln!(self.writer, "## Weights (reference: `{}`)", weights.reference())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Feature | abs(r) | Weight |")?;
        writeln!(self.writer, "|---------|--------|--------|")?;
        for entry in weights.iter() {
            writeln!(
                self.writer,
                "| {} | {:.4} | {:.4} |",
                entry.feature, entry.correlation, entry.weight
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_index(&mut self, outcome: &IndexOutcome) -> anyhow::Result<()> {
        writeln!(self.writer, "# Socioeconomic Index")?;
        writeln!(self.writer)?;
        self.write_weight_table(&outcome.weights)?;

        writeln!(self.writer, "## Classification")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Row | Id | Index | Tier |")?;
        writeln!(self.writer, "|-----|----|-------|------|")?;
        for row in outcome.report.sorted_by_index_desc() {
            writeln!(
                self.writer,
                "| {} | {} | {:.4} | {} |",
                row.row,
                row.id.as_deref().unwrap_or("-"),
                row.index.get(),
                row.tier
            )?;
        }
        writeln!(self.writer)?;

        let counts = outcome.report.tier_counts();
        writeln!(
            self.writer,
            "Tiers: {} low, {} medium, {} high. Dropped rows: {}.",
            counts.low,
            counts.medium,
            counts.high,
            outcome.report.dropped_rows().len()
        )?;
        Ok(())
    }

    fn write_weights(&mut self, weights: &WeightVector) -> anyhow::Result<()> {
        self.write_weight_table(weights)
    }

    fn write_partition(&mut self, prepared: &PreparedData) -> anyhow::Result<()> {
        writeln!(self.writer, "# Train/Test Partition")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Set | Rows | Positions |")?;
        writeln!(self.writer, "|-----|------|-----------|")?;
        writeln!(
            self.writer,
            "| train | {} | {} |",
            prepared.split.n_train(),
            join_rows(&prepared.split.train_rows)
        )?;
        writeln!(
            self.writer,
            "| test | {} | {} |",
            prepared.split.n_test(),
            join_rows(&prepared.split.test_rows)
        )?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn print_header(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(title.len()).blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_weights(&mut self, weights: &WeightVector) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "Weights (correlation with '{}'):",
            weights.reference().bold()
        )?;
        let width = weights.features().map(str::len).max().unwrap_or(0);
        for entry in weights.iter() {
            writeln!(
                self.writer,
                "  {:<width$}  |r| = {:.4}  weight = {:.4}",
                entry.feature, entry.correlation, entry.weight
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn colored_tier(tier: Tier) -> ColoredString {
    match tier {
        Tier::High => tier.label().green(),
        Tier::Medium => tier.label().yellow(),
        Tier::Low => tier.label().red(),
    }
}

fn join_rows(rows: &[usize]) -> String {
    rows.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_index(&mut self, outcome: &IndexOutcome) -> anyhow::Result<()> {
        self.print_header("Socioeconomic Index")?;
        self.print_weights(&outcome.weights)?;

        let rows = outcome.report.sorted_by_index_desc();
        let labels: Vec<String> = rows
            .iter()
            .map(|r| r.id.clone().unwrap_or_else(|| format!("#{}", r.row)))
            .collect();
        let width = labels.iter().map(String::len).max().unwrap_or(0);

        writeln!(self.writer, "Index:")?;
        for (row, label) in rows.iter().zip(&labels) {
            writeln!(
                self.writer,
                "  {:<width$}  {:.4}  {}",
                label,
                row.index.get(),
                colored_tier(row.tier)
            )?;
        }
        writeln!(self.writer)?;

        let counts = outcome.report.tier_counts();
        writeln!(
            self.writer,
            "Tiers: {} {}, {} {}, {} {}",
            counts.high,
            colored_tier(Tier::High),
            counts.medium,
            colored_tier(Tier::Medium),
            counts.low,
            colored_tier(Tier::Low)
        )?;
        let dropped = outcome.report.dropped_rows();
        if !dropped.is_empty() {
            writeln!(
                self.writer,
                "{} {} row(s) without a defined index: {}",
                "Dropped".yellow(),
                dropped.len(),
                join_rows(dropped)
            )?;
        }
        if let Some(split) = &outcome.split {
            writeln!(
                self.writer,
                "Partition: {} train / {} test",
                split.n_train(),
                split.n_test()
            )?;
        }
        Ok(())
    }

    fn write_weights(&mut self, weights: &WeightVector) -> anyhow::Result<()> {
        self.print_header("Correlation Weights")?;
        self.print_weights(weights)
    }

    fn write_partition(&mut self, prepared: &PreparedData) -> anyhow::Result<()> {
        self.print_header("Train/Test Partition")?;
        writeln!(
            self.writer,
            "  train ({}): {}",
            prepared.split.n_train(),
            join_rows(&prepared.split.train_rows)
        )?;
        writeln!(
            self.writer,
            "  test  ({}): {}",
            prepared.split.n_test(),
            join_rows(&prepared.split.test_rows)
        )?;
        Ok(())
    }
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
