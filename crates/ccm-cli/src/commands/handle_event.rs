use std::io::Read;

use anyhow::Context;
use ccm_ingest::StorageEvent;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HandleEventArgs;
use crate::commands::CommandStatus;
use crate::commands::process::process_location;
use crate::context::AppContext;

/// Handle `ccm handle-event`.
pub async fn handle(
    args: &HandleEventArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<CommandStatus> {
    let body = match &args.event {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read event from stdin")?;
            buf
        }
    };

    let location = StorageEvent::from_slice(&body)?.first_location()?;
    tracing::info!(bucket = %location.bucket, key = %location.key, "received storage event");
    process_location(&location.bucket, &location.key, ctx, flags).await
}
