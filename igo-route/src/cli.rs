//! CLI commands for igo-route

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "igo-route")]
#[command(about = "Congestion-aware routing engine for a city street network", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch (or load from cache), project, and build a congestion-aware
    /// snapshot once, then print a summary and exit.
    Build {
        /// Place name to route within, overriding `IGO_PLACE`.
        #[arg(long)]
        place: Option<String>,
    },
    /// Build a snapshot, resolve two place strings, and print the
    /// shortest path between them.
    Route {
        /// Source location: `"lon lat"` or a free-text place name.
        from: String,
        /// Destination location: `"lon lat"` or a free-text place name.
        to: String,
    },
}
