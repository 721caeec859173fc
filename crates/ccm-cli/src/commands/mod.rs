pub mod dispatch;
pub mod handle_event;
pub mod ingest;
pub mod process;
pub mod publish;
pub mod resolve;
pub mod table;

use ccm_ingest::FileOutcome;

use crate::cli::GlobalFlags;
use crate::output::output;

/// How a command finished when it did not error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommandStatus {
    Success,
    /// Completed without error but reported a failure signal (exit status 2).
    SoftFailure,
}

/// Print a file outcome and map it to a command status.
pub fn report_outcome(outcome: &FileOutcome, flags: &GlobalFlags) -> anyhow::Result<CommandStatus> {
    output(outcome, flags.format)?;
    Ok(if outcome.is_success() {
        CommandStatus::Success
    } else {
        CommandStatus::SoftFailure
    })
}
