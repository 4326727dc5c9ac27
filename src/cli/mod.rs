//! CLI module - Command-line interface for Flickarr
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};

/// Flickarr - Movie Search Gateway
/// Proxies TMDB search for a movie UI and tracks search popularity
#[derive(Parser)]
#[command(name = "flickarr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web API daemon
    #[command(alias = "-d", alias = "--daemon")]
    Daemon,

    /// Search for movies without starting the server
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show the most-searched terms
    #[command(alias = "t")]
    Trending {
        /// Number of entries to show
        #[arg(default_value = "5")]
        limit: usize,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}
