use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{PublishCommands, TableCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Process one uploaded object.
    Process(ProcessArgs),
    /// Decode an object-store event and process the object it names.
    HandleEvent(HandleEventArgs),
    /// Process a local file.
    Ingest(IngestArgs),
    /// Republish the index or an entity summary.
    Publish {
        #[command(subcommand)]
        action: PublishCommands,
    },
    /// Show the conversion a measurement would receive.
    Resolve(ResolveArgs),
    /// Conversion table tools.
    Table {
        #[command(subcommand)]
        action: TableCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ProcessArgs {
    /// Bucket holding the upload.
    #[arg(long)]
    pub bucket: String,
    /// Object key, already decoded.
    #[arg(long)]
    pub key: String,
}

#[derive(Clone, Debug, Args)]
pub struct HandleEventArgs {
    /// Event JSON file. Reads stdin when omitted.
    #[arg(long)]
    pub event: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct IngestArgs {
    /// File to process; the format follows its extension.
    pub path: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    #[arg(long)]
    pub measure: String,
    #[arg(long)]
    pub unit: String,
    /// Period start (ISO-8601).
    #[arg(long)]
    pub start: String,
    /// Period end (ISO-8601).
    #[arg(long)]
    pub end: String,
    #[arg(long, allow_negative_numbers = true)]
    pub value: f64,
}
