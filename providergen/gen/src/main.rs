//! providergen Code Generator
//!
//! Generates provider data sources, resources and the constructor aggregate
//! from entity definitions.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use providergen_gen::config::load_definitions;
use providergen_gen::errors::GeneratorError;
use providergen_gen::orchestrator::{GenerationReport, RunOptions, run};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// providergen - transforms data source and resource definitions into provider code
#[derive(Parser, Debug)]
#[command(name = "providergen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Only generate the data source or resource with this name
    #[arg(long)]
    filter: Option<String>,

    /// Output directory for generated code
    #[arg(short, long, default_value = "internal/provider")]
    output: PathBuf,

    /// Load definitions from a JSON or YAML file instead of the built-in set
    #[arg(short, long)]
    definitions: Option<PathBuf>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(report: &GenerationReport, dry_run: bool) {
    let verb = if dry_run { "rendered" } else { "wrote" };
    for file in &report.files {
        eprintln!("  {} {}", verb.green(), file.path.display());
    }
    for failure in &report.failures {
        eprintln!("  {} {}: {}", "failed".red().bold(), failure.task, failure.error);
    }
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let definitions = load_definitions(cli.definitions.as_deref())?;
    info!(
        data_sources = definitions.data_sources.len(),
        resources = definitions.resources.len(),
        output = %cli.output.display(),
        "generating provider code"
    );

    let options = RunOptions {
        output_dir: cli.output,
        filter: cli.filter,
        dry_run: cli.dry_run,
    };
    let report = run(&definitions, &options)?;

    if options.dry_run {
        for file in &report.files {
            println!("// ==> {}", file.path.display());
            println!("{}", file.content);
        }
    }

    print_summary(&report, options.dry_run);

    if report.is_success() {
        eprintln!("{} {} file(s)", "✨ Done:".green().bold(), report.files.len());
    }
    report.into_result().map(|_| ())
}
