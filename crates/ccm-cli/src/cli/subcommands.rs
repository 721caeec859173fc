use clap::Subcommand;

/// Republication of derived artifacts.
#[derive(Clone, Debug, Subcommand)]
pub enum PublishCommands {
    /// Rewrite the entity index from the store.
    Index,
    /// Rewrite one entity's emission summary from the store.
    Entity {
        /// Reporting entity id.
        id: String,
    },
}

/// Conversion table inspection.
#[derive(Clone, Debug, Subcommand)]
pub enum TableCommands {
    /// Load the table and report rule count and overlapping windows.
    Check,
}
