//! Report assembly: terminal, JSON, and Markdown writers.

use colored::*;
use std::io::Write;
use std::path::Path;

use crate::core::{AnalysisReport, FileReport, UnitComplexity};
use crate::metrics::raw::RawMetrics;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
    top: Option<usize>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink, top)),
    })
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    top: Option<usize>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, top: Option<usize>) -> Self {
        Self { writer, top }
    }

    fn write_file(&mut self, file: &FileReport, threshold: u32) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            format!("Code Complexity Analysis for {}:", file.path.display()).bold()
        )?;
        writeln!(self.writer)?;
        for unit in &file.units {
            self.write_unit(unit, threshold)?;
        }
        if file.units.is_empty() {
            writeln!(self.writer, "  (no functions or classes)")?;
        }
        writeln!(self.writer)?;

        if let Some(raw) = &file.raw {
            self.write_raw(raw)?;
        }
        Ok(())
    }

    fn write_unit(&mut self, unit: &UnitComplexity, threshold: u32) -> anyhow::Result<()> {
        let score = if unit.exceeds_threshold {
            unit.complexity.to_string().red().bold()
        } else {
            unit.complexity.to_string().green()
        };
        writeln!(
            self.writer,
            "  - {} {} (lines {}-{}): Complexity = {}",
            unit.kind.to_string().dimmed(),
            unit.name,
            unit.start_line,
            unit.end_line,
            score,
        )?;
        if unit.exceeds_threshold {
            writeln!(
                self.writer,
                "    {}",
                format!("Warning: Complexity exceeds threshold ({threshold})!").yellow()
            )?;
        }
        Ok(())
    }

    fn write_raw(&mut self, raw: &RawMetrics) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Raw Code Metrics:".bold())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "  - loc: {}", raw.loc)?;
        writeln!(self.writer, "  - sloc: {}", raw.sloc)?;
        writeln!(self.writer, "  - lloc: {}", raw.lloc)?;
        writeln!(self.writer, "  - comments: {}", raw.comments)?;
        writeln!(self.writer, "  - single_comments: {}", raw.single_comments)?;
        writeln!(self.writer, "  - multi: {}", raw.multi)?;
        writeln!(self.writer, "  - blank: {}", raw.blank)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_top(&mut self, report: &AnalysisReport, top: usize) -> anyhow::Result<()> {
        let mut units: Vec<_> = report.all_units().collect();
        units.sort_by(|(fa, a), (fb, b)| {
            b.complexity
                .cmp(&a.complexity)
                .then_with(|| fa.path.cmp(&fb.path))
                .then_with(|| a.start_line.cmp(&b.start_line))
        });

        writeln!(
            self.writer,
            "{}",
            format!("Top {top} most complex units:").bold()
        )?;
        writeln!(self.writer)?;
        for (file, unit) in units.into_iter().take(top) {
            self.write_unit_with_file(file, unit, report.threshold)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_unit_with_file(
        &mut self,
        file: &FileReport,
        unit: &UnitComplexity,
        threshold: u32,
    ) -> anyhow::Result<()> {
        let score = if unit.exceeds_threshold {
            unit.complexity.to_string().red().bold()
        } else {
            unit.complexity.to_string().green()
        };
        writeln!(
            self.writer,
            "  - {}:{} {}: Complexity = {}",
            file.path.display(),
            unit.start_line,
            unit.name,
            score,
        )?;
        if unit.exceeds_threshold {
            writeln!(
                self.writer,
                "    {}",
                format!("Warning: Complexity exceeds threshold ({threshold})!").yellow()
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if let Some(top) = self.top {
            return self.write_top(report, top);
        }
        for file in &report.files {
            self.write_file(file, report.threshold)?;
        }
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let summary = report.total_summary();
        writeln!(self.writer, "# Code Complexity Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Analyzed: `{}`", report.root.display())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Files Analyzed | {} |", report.files.len())?;
        writeln!(self.writer, "| Total Units | {} |", summary.total_units)?;
        writeln!(
            self.writer,
            "| Average Complexity | {:.1} |",
            summary.average_complexity
        )?;
        writeln!(
            self.writer,
            "| Max Complexity | {} |",
            summary.max_complexity
        )?;
        writeln!(
            self.writer,
            "| Over Threshold ({}) | {} |",
            report.threshold, summary.flagged_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_hotspots(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let mut units: Vec<_> = report.all_units().collect();
        if units.is_empty() {
            return Ok(());
        }
        units.sort_by(|(_, a), (_, b)| b.complexity.cmp(&a.complexity));

        writeln!(self.writer, "## Hotspots")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| File:Line | Unit | Kind | Complexity | Flagged |"
        )?;
        writeln!(
            self.writer,
            "|-----------|------|------|------------|---------|"
        )?;
        for (file, unit) in units.iter().take(10) {
            writeln!(
                self.writer,
                "| {}:{} | `{}` | {} | {} | {} |",
                file.path.display(),
                unit.start_line,
                unit.name,
                unit.kind,
                unit.complexity,
                if unit.exceeds_threshold { "yes" } else { "-" },
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_raw_metrics(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        if report.files.iter().all(|file| file.raw.is_none()) {
            return Ok(());
        }
        writeln!(self.writer, "## Raw Metrics")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| File | LOC | SLOC | LLOC | Comments | Blank |"
        )?;
        writeln!(
            self.writer,
            "|------|-----|------|------|----------|-------|"
        )?;
        for file in &report.files {
            if let Some(raw) = &file.raw {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} | {} | {} |",
                    file.path.display(),
                    raw.loc,
                    raw.sloc,
                    raw.lloc,
                    raw.comments,
                    raw.blank,
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_summary(report)?;
        self.write_hotspots(report)?;
        self.write_raw_metrics(report)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ComplexitySummary, UnitKind};
    use std::path::PathBuf;

    fn sample_report() -> AnalysisReport {
        let units = vec![
            UnitComplexity {
                name: "simple".to_string(),
                kind: UnitKind::Function,
                start_line: 1,
                end_line: 2,
                depth: 0,
                decision_points: 0,
                complexity: 1,
                exceeds_threshold: false,
            },
            UnitComplexity {
                name: "tangled".to_string(),
                kind: UnitKind::Function,
                start_line: 4,
                end_line: 30,
                depth: 0,
                decision_points: 12,
                complexity: 13,
                exceeds_threshold: true,
            },
        ];
        let summary = ComplexitySummary::from_units(&units);
        AnalysisReport {
            root: PathBuf::from("app.py"),
            threshold: 10,
            files: vec![FileReport {
                path: PathBuf::from("app.py"),
                units,
                raw: None,
                summary,
            }],
        }
    }

    #[test]
    fn test_json_writer_round_trips() {
        let mut buf = Vec::new();
        JsonWriter::new(&mut buf)
            .write_report(&sample_report())
            .unwrap();
        let parsed: AnalysisReport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, sample_report());
    }

    #[test]
    fn test_terminal_writer_flags_threshold() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf, None)
            .write_report(&sample_report())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("tangled (lines 4-30): Complexity = 13"));
        assert!(text.contains("Warning: Complexity exceeds threshold (10)!"));
        assert!(!text.contains("simple (lines 1-2): Complexity = 1\n    Warning"));
    }

    #[test]
    fn test_terminal_writer_top_listing() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        TerminalWriter::new(&mut buf, Some(1))
            .write_report(&sample_report())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Top 1 most complex units:"));
        assert!(text.contains("tangled"));
        assert!(!text.contains("simple"));
    }

    #[test]
    fn test_markdown_writer_tables() {
        let mut buf = Vec::new();
        MarkdownWriter::new(&mut buf)
            .write_report(&sample_report())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Code Complexity Report"));
        assert!(text.contains("| Total Units | 2 |"));
        assert!(text.contains("| app.py:4 | `tangled` | function | 13 | yes |"));
    }
}
