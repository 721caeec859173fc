use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;

use commands::CommandStatus;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(CommandStatus::Success) => {}
        Ok(CommandStatus::SoftFailure) => std::process::exit(2),
        Err(error) => {
            eprintln!("ccm error: {error:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<CommandStatus> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config()?;
    context::warn_unconfigured(&config);

    commands::dispatch::dispatch(cli.command, config, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CCM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
