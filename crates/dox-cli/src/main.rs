use anyhow::Context;
use clap::Parser;
use dox_config::DoxConfig;

mod cli;
mod commands;
mod output;
mod prune;

fn main() {
    if let Err(error) = run() {
        eprintln!("doxymark error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => DoxConfig::load_from(path),
        None => DoxConfig::load_with_dotenv(),
    }
    .context("failed to load doxymark configuration")?;

    match &cli.command {
        cli::Commands::Extract => commands::extract::handle(&config, cli.quiet),
        cli::Commands::Collect(args) => commands::collect::handle(args, &config),
        cli::Commands::List(args) => commands::list::handle(args, &config),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DOXYMARK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
