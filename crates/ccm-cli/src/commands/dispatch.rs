use anyhow::Context;
use ccm_config::CcmConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands::{self, CommandStatus};
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
///
/// `resolve` and `table` run against the configuration alone; every other
/// command first opens the store and output bucket.
pub async fn dispatch(
    command: Commands,
    config: CcmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<CommandStatus> {
    match command {
        Commands::Resolve(args) => commands::resolve::handle(&args, &config, flags),
        Commands::Table { action } => commands::table::handle(&action, &config, flags),
        Commands::Process(args) => {
            commands::process::handle(&args, &open_context(config).await?, flags).await
        }
        Commands::HandleEvent(args) => {
            commands::handle_event::handle(&args, &open_context(config).await?, flags).await
        }
        Commands::Ingest(args) => {
            commands::ingest::handle(&args, &open_context(config).await?, flags).await
        }
        Commands::Publish { action } => {
            commands::publish::handle(&action, &open_context(config).await?, flags).await
        }
    }
}

async fn open_context(config: CcmConfig) -> anyhow::Result<AppContext> {
    AppContext::init(config)
        .await
        .context("failed to initialize ccm application context")
}
