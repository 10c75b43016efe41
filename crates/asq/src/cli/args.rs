//! Clap argument definitions for the `asq` CLI.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "asq")]
#[command(about = "Asset catalog search with a structured query language")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared flags naming the requesting user.
#[derive(Args, Debug, Clone, Default)]
pub struct UserArgs {
    /// Run as this user (affects field visibility and validation)
    #[arg(short = 'u', long)]
    pub user: Option<String>,
}

/// Supported `asq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a query and print its clause tree
    Parse {
        /// The query text
        query: String,

        /// Also print the tree with NOT nodes eliminated
        #[arg(long)]
        normalize: bool,
    },

    /// Validate a query against the searchable fields
    Validate {
        /// The query text
        query: String,

        #[command(flatten)]
        /// Requesting user.
        user: UserArgs,

        /// Output messages in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the backend query a valid query compiles to, without searching
    Explain {
        /// The query text
        query: String,

        #[command(flatten)]
        /// Requesting user.
        user: UserArgs,
    },

    /// Search the asset index
    Search {
        /// The query text
        query: String,

        /// Maximum results to return
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[command(flatten)]
        /// Requesting user.
        user: UserArgs,

        /// Output hits in JSON format
        #[arg(long)]
        json: bool,
    },
}
