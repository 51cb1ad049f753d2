//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Consent-gated writing agent for local note vaults")]
pub struct Cli {
    /// Path to a config file (overrides discovered configs)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ignore all config files and use built-in defaults
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Vault root (overrides the configured one)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Approve and release everything without asking
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the vault, with both consent gates
    Search {
        query: String,
        /// Match file names instead of contents
        #[arg(long)]
        names: bool,
    },
    /// Read one vault file, with both consent gates
    Read { path: String },
    /// Search the web, with both consent gates
    #[cfg(feature = "web-tools")]
    Web { query: String },
    /// Show configuration sources and the effective settings
    Config,
}
