mod output;
mod run;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rowcheck")]
#[command(
    version,
    about = "Split a pipe-delimited file into accepted and rejected records",
    long_about = None
)]
struct Cli {
    /// Rule set to apply ("novalidate" accepts every record)
    sourcetype: String,

    /// Pipe-delimited input file; the first record is the header
    inputfile: PathBuf,

    /// Output file for accepted records
    goodoutputfile: PathBuf,

    /// Output file for rejected records, with an ERROR_MESSAGE column
    badoutputfile: PathBuf,

    /// Rule catalog (YAML or TOML) to use instead of the built-in one
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Summary format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Lists the rule sets of the built-in catalog for usage messages.
fn available_rule_sets() -> String {
    let names = rowcheck_parser::builtin_catalog()
        .map(|catalog| catalog.names().join(" "))
        .unwrap_or_default();
    format!("Available sourcetype validators: {}", names)
}

/// Parses the command line, adding the rule set names to help and usage errors.
fn parse_cli() -> Cli {
    let rule_sets = available_rule_sets();
    let result = Cli::command()
        .after_help(rule_sets.clone())
        .try_get_matches()
        .and_then(|mut matches| Cli::from_arg_matches_mut(&mut matches));

    match result {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            eprintln!("\n{}", rule_sets);
            std::process::exit(err.exit_code());
        }
        Err(err) => err.exit(),
    }
}

fn main() -> Result<()> {
    let cli = parse_cli();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let options = run::RunOptions {
        sourcetype: cli.sourcetype,
        input: cli.inputfile,
        good_output: cli.goodoutputfile,
        bad_output: cli.badoutputfile,
        rules: cli.rules,
    };

    let summary = run::execute(&options)?;
    output::print_summary(&summary, cli.format)
}
