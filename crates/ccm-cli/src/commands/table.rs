use ccm_config::CcmConfig;
use ccm_core::conversion::RuleOverlap;
use serde::Serialize;

use crate::bootstrap::load_table;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::TableCommands;
use crate::commands::CommandStatus;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TableCheckResponse {
    path: String,
    rules: usize,
    overlaps: Vec<RuleOverlap>,
}

/// Handle `ccm table`. Needs only the conversion table.
pub fn handle(
    action: &TableCommands,
    config: &CcmConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<CommandStatus> {
    match action {
        TableCommands::Check => {
            let table = load_table(config)?;
            output(
                &TableCheckResponse {
                    path: config.conversion.table_path.clone(),
                    rules: table.len(),
                    overlaps: table.overlapping_rules(),
                },
                flags.format,
            )?;
        }
    }
    Ok(CommandStatus::Success)
}
