mod commands;
mod logging;
mod progress;

use std::process;

use anyhow::{bail, Context};
use clap::Parser;
use colored::*;
use commands::{Cli, ProgressMode};
use dotenv::dotenv;
use movie_sorter_core::config::load_configuration;
use movie_sorter_core::{
    LogReporter, OmdbClient, Organizer, ProgressReporter, ReleaseNameParser, RunContext,
    SilentReporter,
};
use progress::CliReporter;
use tracing::{error, info, warn};

fn main() {
    dotenv().ok();

    // Usage errors exit here, before any logging or filesystem side effect.
    let args = Cli::parse();

    let guard = logging::init_logger(args.log_format);

    if let Err(err) = run(&args) {
        error!("Error: {:#}", err);
        drop(guard);
        process::exit(1);
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let config = load_configuration().context("Error loading configuration")?;
    if config.api_key.trim().is_empty() {
        bail!("No OMDb API key configured; set MOVIE_SORTER_API_KEY or api_key in Config.toml");
    }

    let context = RunContext::new(&args.root, config)?;
    let client = OmdbClient::new(&context.config).context("Error creating HTTP client")?;
    let organizer = Organizer::new(context, ReleaseNameParser::new(), client);

    let reporter: Box<dyn ProgressReporter> = match args.progress {
        ProgressMode::Bar => Box::new(CliReporter::new()),
        ProgressMode::Log => Box::new(LogReporter),
        ProgressMode::None => Box::new(SilentReporter),
    };
    let result = organizer.run(&*reporter)?;
    let report = &result.report;

    println!();
    info!(
        "Rename: {}, Dedup: {}, Classify: {}",
        format!("{:.2}s", result.rename_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.dedup_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.classify_duration.as_secs_f64()).green(),
    );
    info!(
        "{} folders renamed, {} duplicates removed, {} of {} titles moved",
        format!("{}", report.renamed()).cyan(),
        format!("{}", report.removed()).red(),
        format!("{}", report.moved()).cyan(),
        format!("{}", result.titles).cyan(),
    );
    info!("{}", result.summary.to_string().yellow());

    if report.failed_count() > 0 {
        warn!(
            "{} operations failed, see the log for details",
            format!("{}", report.failed_count()).red()
        );
        for failure in report.failures() {
            warn!(stage = %failure.stage, path = %failure.item.display(), "{:?}", failure.outcome);
        }
    }

    Ok(())
}
