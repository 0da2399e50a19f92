//! CLI module - Command-line interface for yuzutube
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// yuzutube - a small video search front end
#[derive(Parser)]
#[command(name = "yuzutube")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Search from the terminal using the configured provider
    #[command(alias = "s")]
    Search {
        /// Search keywords
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    Init,
}
