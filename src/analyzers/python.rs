//! Python source analysis: parse, walk, count, score, classify.

use std::path::{Path, PathBuf};

use log::debug;
use rustpython_parser::{ast, Mode};

use crate::complexity::{self, count_decision_points, UnitWalker};
use crate::config::AnalysisConfig;
use crate::core::{ComplexitySummary, Error, FileReport, LineIndex, UnitComplexity};
use crate::metrics::raw::RawMetrics;

/// A parsed module ready for traversal.
pub struct ParsedModule {
    pub path: PathBuf,
    pub module: ast::Mod,
    pub index: LineIndex,
}

pub struct PythonAnalyzer {
    config: AnalysisConfig,
}

impl PythonAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Parse source text, mapping parser failures to [`Error::Parse`].
    pub fn parse(&self, source: &str, path: &Path) -> Result<ParsedModule, Error> {
        let index = LineIndex::new(source);
        let module = rustpython_parser::parse(source, Mode::Module, &path.to_string_lossy())
            .map_err(|e| Error::Parse {
                file: path.to_path_buf(),
                line: index.line_of(e.offset.to_usize()),
                message: e.error.to_string(),
            })?;
        Ok(ParsedModule {
            path: path.to_path_buf(),
            module,
            index,
        })
    }

    /// Score every unit of the module, in traversal order.
    pub fn analyze(&self, parsed: &ParsedModule, source: &str) -> Result<FileReport, Error> {
        self.config.validate()?;

        let units = score_units(&parsed.module, &parsed.index, &self.config)?;
        let summary = ComplexitySummary::from_units(&units);
        let raw = self
            .config
            .report_raw
            .then(|| RawMetrics::analyze(source, &parsed.module));

        Ok(FileReport {
            path: parsed.path.clone(),
            units,
            raw,
            summary,
        })
    }
}

/// Walk the module and produce one scored record per unit.
///
/// Each unit is either at module level or was skipped exactly once as a
/// nested boundary by its parent's counter; the totals must agree or the
/// exclusive-subtree guarantee was violated and the file gets no result.
fn score_units(
    module: &ast::Mod,
    index: &LineIndex,
    config: &AnalysisConfig,
) -> Result<Vec<UnitComplexity>, Error> {
    let mut units = Vec::new();
    let mut module_level = 0usize;
    let mut boundaries = 0usize;

    for unit in UnitWalker::new(module, index) {
        if unit.depth == 0 {
            module_level += 1;
        }
        let points = count_decision_points(&unit, config.include_imports);
        boundaries += points.nested_units as usize;
        let score = complexity::score(points.count);
        units.push(UnitComplexity {
            name: unit.name,
            kind: unit.kind,
            start_line: unit.start_line,
            end_line: unit.end_line,
            depth: unit.depth,
            decision_points: points.count,
            complexity: score,
            exceeds_threshold: complexity::exceeds_threshold(score, config.threshold),
        });
    }

    if module_level + boundaries != units.len() {
        return Err(Error::Traversal(format!(
            "walked {} units but parents accounted for {}",
            units.len(),
            module_level + boundaries
        )));
    }

    Ok(units)
}

/// Analyze in-memory source text.
pub fn analyze_source(
    source: &str,
    path: &Path,
    config: &AnalysisConfig,
) -> Result<FileReport, Error> {
    config.validate()?;
    let analyzer = PythonAnalyzer::new(config.clone());
    let parsed = analyzer.parse(source, path)?;
    analyzer.analyze(&parsed, source)
}

/// Read and analyze one file.
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<FileReport, Error> {
    debug!("analyzing {}", path.display());
    let source = std::fs::read_to_string(path)?;
    analyze_source(&source, path, config)
}
