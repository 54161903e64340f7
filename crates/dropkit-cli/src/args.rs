use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "dropkit", version, about = "dropkit CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Query the chain registry.
    Chains {
        /// Chains API host.
        #[arg(long, default_value = dropkit_chains::DEFAULT_CHAINS_HOST)]
        host: String,

        #[command(subcommand)]
        command: ChainsCommand,
    },

    /// Validate item metadata files and print the lazy-mint batch plan.
    Plan {
        /// Directory of item metadata JSON files.
        dir: String,

        /// Items the collection has already loaded.
        #[arg(long, default_value_t = 0)]
        loaded: u64,
    },

    /// Derive client-side PDAs for a drop collection.
    Inspect {
        /// Drop collection (candy machine) address.
        candy_machine: String,

        /// Also derive metadata/edition accounts for this mint.
        #[arg(long)]
        mint: Option<String>,
    },

    /// Run environment checks.
    Doctor,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ChainsCommand {
    /// List every chain with enrichment overlay.
    List,

    /// Fetch one chain by numeric id or slug.
    Get { id_or_slug: String },
}
