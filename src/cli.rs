// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "greenlight")]
#[command(about = "Zero-downtime blue/green traffic cutover for PaaS applications")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new greenlight.yml configuration file
    Init {
        /// Application name to scaffold with
        #[arg(long)]
        app: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Cut live traffic over to the deployed green candidate
    Cutover {
        /// Target overrides (defined in config)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Show live, candidate, and backup application status
    Status {
        /// Target overrides (defined in config)
        #[arg(short, long)]
        target: Option<String>,
    },
}
