use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "passlock", about = "passlock: app lock with a grace period")]
pub struct Cli {
    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the secret (one symbol per character)
    SetSecret {
        #[arg(long)]
        secret: String,
    },

    /// Remove the secret and all expiry settings
    ClearSecret,

    /// Enable the grace period
    SetExpiry {
        #[arg(long)]
        seconds: f64,
    },

    /// Disable the grace period
    ClearExpiry,

    /// Check a candidate secret against the stored one
    Verify {
        #[arg(long)]
        secret: String,
    },

    /// Print the current configuration as JSON
    Status,

    /// Drive a lock presenter through scripted lifecycle events
    Simulate {
        /// Comma-separated steps, e.g. "launch@0,active@1,accept@2,background@100,active@120"
        #[arg(long)]
        script: String,
    },
}
