use anyhow::Context;
use ccm_ingest::{DetectedFormat, FileOutcome, detect_format};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IngestArgs;
use crate::commands::{CommandStatus, report_outcome};
use crate::context::AppContext;

/// Handle `ccm ingest`.
pub async fn handle(
    args: &IngestArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<CommandStatus> {
    let name = args
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid file path {}", args.path.display()))?;

    let outcome = match detect_format(name) {
        DetectedFormat::Known(format) => {
            let bytes = tokio::fs::read(&args.path)
                .await
                .with_context(|| format!("failed to read {}", args.path.display()))?;
            ctx.processor()
                .process_bytes(format, &bytes)
                .await
                .with_context(|| format!("failed to process {}", args.path.display()))?
        }
        DetectedFormat::Unrecognized(extension) => {
            tracing::warn!(path = %args.path.display(), %extension, "unrecognized file format");
            FileOutcome::Unrecognized { extension }
        }
        DetectedFormat::MissingExtension => {
            tracing::info!(path = %args.path.display(), "no extension on file, nothing to do");
            FileOutcome::MissingExtension
        }
    };

    report_outcome(&outcome, flags)
}
