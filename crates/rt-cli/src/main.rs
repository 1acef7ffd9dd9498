use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use rt_core::MetadataTables;
use tracing_subscriber::EnvFilter;

use rt_cli::commands::best::Attempt;
use rt_cli::commands::util::{objective_segments, read_events};
use rt_cli::commands::{best, classify, run, segments};
use rt_cli::{Cli, Commands, Config};

/// Load config and the metadata tables it points at.
fn load_metadata(config_path: Option<&Path>) -> Result<(MetadataTables, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let tables = rt_meta::load_dir(&config.metadata_dir).with_context(|| {
        format!(
            "failed to load metadata from {}",
            config.metadata_dir.display()
        )
    })?;
    Ok((tables, config))
}

fn attempt_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays parseable. try_init avoids a
    // panic if tracing is already initialized (e.g., in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Classify { events }) => {
            let (tables, _config) = load_metadata(cli.config.as_deref())?;
            let events = read_events(events)?;
            classify::run(&mut stdout, &tables, &events)?;
        }
        Some(Commands::Segments { events, json }) => {
            let (tables, _config) = load_metadata(cli.config.as_deref())?;
            let events = read_events(events)?;
            segments::run(&mut stdout, &objective_segments(&tables, &events), *json)?;
        }
        Some(Commands::Run { events, json }) => {
            let (tables, _config) = load_metadata(cli.config.as_deref())?;
            let events = read_events(events)?;
            run::run(&mut stdout, &objective_segments(&tables, &events), *json)?;
        }
        Some(Commands::Best { runs, json }) => {
            let (tables, config) = load_metadata(cli.config.as_deref())?;
            let attempts = runs
                .iter()
                .map(|path| {
                    let events = read_events(path)?;
                    Ok(Attempt {
                        name: attempt_name(path),
                        segments: objective_segments(&tables, &events),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            best::run(&mut stdout, &attempts, config.rolling_window, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
