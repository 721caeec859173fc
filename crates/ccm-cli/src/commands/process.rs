use anyhow::Context;
use ccm_publish::open_bucket;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProcessArgs;
use crate::commands::{CommandStatus, report_outcome};
use crate::context::AppContext;

/// Handle `ccm process`.
pub async fn handle(
    args: &ProcessArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<CommandStatus> {
    process_location(&args.bucket, &args.key, ctx, flags).await
}

/// Process one object of `bucket` on the configured storage backend.
pub async fn process_location(
    bucket: &str,
    key: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<CommandStatus> {
    let store = open_bucket(&ctx.config.storage, bucket)
        .with_context(|| format!("failed to open bucket '{bucket}'"))?;
    let outcome = ctx
        .processor()
        .process_object(store.as_ref(), bucket, key)
        .await
        .with_context(|| format!("failed to process '{key}' from bucket '{bucket}'"))?;
    report_outcome(&outcome, flags)
}
