use anyhow::bail;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PublishCommands;
use crate::commands::CommandStatus;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct IndexResponse {
    path: String,
    entities: Vec<String>,
}

/// Handle `ccm publish`.
pub async fn handle(
    action: &PublishCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<CommandStatus> {
    match action {
        PublishCommands::Index => {
            let entities = ctx.publisher.publish_entity_index(&ctx.service).await?;
            output(
                &IndexResponse {
                    path: ctx.publisher.index_path().to_string(),
                    entities,
                },
                flags.format,
            )?;
        }
        PublishCommands::Entity { id } => {
            let Some(entity) = ctx.service.get_reporting_entity(id).await? else {
                bail!("unknown reporting entity '{id}'");
            };
            let summary = ctx.publisher.publish_entity_summary(&ctx.service, &entity).await?;
            output(&summary, flags.format)?;
        }
    }
    Ok(CommandStatus::Success)
}
