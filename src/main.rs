use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;

use cyclomap::cli::Cli;
use cyclomap::config::AnalysisConfig;
use cyclomap::core::{AnalysisReport, FileReport};
use cyclomap::io::output::create_writer;
use cyclomap::io::walker::FileWalker;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<i32> {
    let config = AnalysisConfig::new(cli.threshold)
        .with_imports(cli.include_imports)
        .with_raw(cli.report_raw);
    config.validate()?;

    // ANSI sequences have no place in a report file
    if cli.output.is_some() {
        colored::control::set_override(false);
    }

    let files = FileWalker::new(cli.path.clone())
        .with_ignore_patterns(cli.ignore_patterns.clone().unwrap_or_default())
        .walk()?;
    if files.is_empty() {
        info!("no Python files found under {}", cli.path.display());
        return Ok(0);
    }

    let reports = analyze_all(&files, &config, cli.no_parallel);
    if reports.is_empty() {
        info!("No results to display.");
        return Ok(1);
    }

    let report = AnalysisReport {
        root: cli.path,
        threshold: cli.threshold,
        files: reports,
    };
    let mut writer = create_writer(cli.format.into(), cli.output.as_deref(), cli.top)?;
    writer.write_report(&report)?;
    Ok(0)
}

fn analyze_all(files: &[PathBuf], config: &AnalysisConfig, sequential: bool) -> Vec<FileReport> {
    let analyze = |path: &PathBuf| match cyclomap::analyzers::python::analyze_file(path, config) {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("skipping {}: {e}", path.display());
            None
        }
    };

    if sequential {
        files.iter().filter_map(analyze).collect()
    } else {
        files.par_iter().filter_map(analyze).collect()
    }
}
