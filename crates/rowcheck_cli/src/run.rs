use anyhow::{Context, Result};
use rowcheck_core::RuleCatalog;
use rowcheck_parser::{builtin_catalog, parse_file};
use rowcheck_validator::{PipeReader, PipeWriter, RunSummary, ValidationRunner};
use std::path::PathBuf;
use tracing::info;

/// Everything one run needs from the command line.
pub struct RunOptions {
    pub sourcetype: String,
    pub input: PathBuf,
    pub good_output: PathBuf,
    pub bad_output: PathBuf,
    pub rules: Option<PathBuf>,
}

pub fn execute(options: &RunOptions) -> Result<RunSummary> {
    let catalog = load_catalog(options)?;
    let runner = ValidationRunner::from_catalog(&catalog, &options.sourcetype)?;

    info!("Input: {}", options.input.display());

    let mut source = PipeReader::from_path(&options.input)?;
    let mut accepted = PipeWriter::from_path(&options.good_output)?;
    let mut rejected = PipeWriter::from_path(&options.bad_output)?;

    runner
        .run(&mut source, &mut accepted, &mut rejected)
        .with_context(|| format!("Failed to validate {}", options.input.display()))
}

fn load_catalog(options: &RunOptions) -> Result<RuleCatalog> {
    match &options.rules {
        Some(path) => {
            info!("Loading rule catalog: {}", path.display());
            parse_file(path)
                .with_context(|| format!("Failed to load rule catalog: {}", path.display()))
        }
        None => builtin_catalog().context("Built-in rule catalog is invalid"),
    }
}
