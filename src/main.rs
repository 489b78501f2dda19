pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod utils;

use std::{
    fmt::Arguments,
    path::{Path, PathBuf},
};

use clap::Parser;
use config::Config;
use crate::core::{inbound, orchestrator::Orchestrator, outbound::report};
use fern::colors::{Color, ColoredLevelConfig};
use log::info;
use miette::IntoDiagnostic;

/// Runs a batch of records through the staged worker pipeline and writes a report.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file (.toml or .json). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source JSON file, overrides `source.path`.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Report file, overrides `report.path`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fixed worker count, overrides `pipeline.workers`.
    #[arg(short, long)]
    workers: Option<usize>,

    #[arg(long, default_value = "output.log")]
    log_file: PathBuf,
}

fn setup_logger(log_file: &Path) -> std::result::Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .debug(Color::Cyan)
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .trace(Color::Magenta);

    let make_formatter = |use_color: bool| {
        move |out: fern::FormatCallback, message: &Arguments, record: &log::Record| {
            let now = jiff::Zoned::now();
            let now = now.strftime("%Y-%m-%d %H:%M:%S");

            let target = record.target();
            let mut target = target.replacen("stagehand", "app", 1);
            if let Some(line) = record.line() {
                target = format!("{}:{}", target, line);
            }
            let target = target;

            if use_color {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    now,
                    colors.color(record.level()),
                    target,
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    now,
                    record.level(),
                    target,
                    message
                ))
            }
        }
    };

    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::LevelFilter::Info);

    let file_dispatch = fern::Dispatch::new()
        .format(make_formatter(false))
        .level(log_level)
        .chain(fern::log_file(log_file)?);

    let stdout_dispatch = fern::Dispatch::new()
        .format(make_formatter(true))
        .level(log_level)
        .chain(std::io::stdout());

    fern::Dispatch::new()
        .chain(stdout_dispatch)
        .chain(file_dispatch)
        .apply()?;

    Ok(())
}

#[tokio::main]
pub async fn main() -> miette::Result<()> {
    let args = Args::parse();

    setup_logger(&args.log_file).into_diagnostic()?;

    info!("Starting the application");
    let config = match &args.config {
        Some(path) => {
            let config = Config::load_from_file(path)?;
            info!("Loaded config from {}", path.display());
            config
        }
        None => Config::default(),
    };
    let config = config
        .with_input(args.input)
        .with_output(args.output)
        .with_workers(args.workers)
        .finalize()?;

    let records = timeit! { "Loading records", {
        inbound::load_records(&config.source.path)?
    }};
    info!(
        "Loaded {} records from {}",
        records.len(),
        config.source.path.display()
    );

    let worker_count = config.pipeline.workers.resolve(records.len());
    let orchestrator = Orchestrator::try_create_from(&config.pipeline)?;

    let output = timeit! { "Pipeline run", {
        orchestrator.run(records, worker_count).await?
    }};

    timeit! { "Writing report", {
        report::save(&config.report, &output)?
    }};

    info!("Application has exited");
    Ok(())
}
