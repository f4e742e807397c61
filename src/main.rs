/*!
 * Command-line interface for flatdump
 */

use std::io;
use std::path::Path;
use std::process;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use flatdump::aggregator::Aggregator;
use flatdump::config::{Args, Config};
use flatdump::error::{FlatDumpError, Result};
use flatdump::report::{ReportFormat, Reporter};
use flatdump::types::RunReport;

/// Exit code for a run that finished with recorded failures
const EXIT_PARTIAL: i32 = 2;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(args.quiet, args.verbose);
    log::debug!("CLI args parsed: {:?}", args);

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    let exit_code = match run(&args) {
        Ok(report) => {
            // Completion is announced even when every file failed
            if !args.quiet {
                let line = format!("Operation completed: {}", report.output_dir.display());
                // Keep stdout parseable when it carries JSON
                match args.format {
                    ReportFormat::Json => eprintln!("{}", line),
                    ReportFormat::ConsoleTable => println!("{}", line),
                }
            }
            if report.is_clean() {
                0
            } else {
                EXIT_PARTIAL
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run(args: &Args) -> Result<RunReport> {
    let input = args
        .input
        .as_deref()
        .ok_or_else(|| FlatDumpError::Config("no input path given".to_string()))?;

    // Create and validate configuration
    let config = Config::from_args(args);
    config.validate()?;

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress.set_prefix("Processing");
        progress
    };

    let aggregator = Aggregator::new(config).with_progress(progress.clone());
    let report = process(&aggregator, input);
    progress.finish_and_clear();
    let report = report?;

    if !args.quiet {
        Reporter::new(args.format).print_report(&report)?;
    }
    Ok(report)
}

fn process(aggregator: &Aggregator, input: &Path) -> Result<RunReport> {
    if input.is_dir() {
        aggregator.process_folder(input)
    } else if input.is_file() {
        aggregator.process_single_file(input)
    } else {
        flatdump::bail!(NotFound, "{}", input.display())
    }
}
