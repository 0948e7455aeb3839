use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `sidefetch` - call a configured endpoint with conversation context and render the JSON reply.
#[derive(Parser, Debug)]
#[command(name = "sidefetch")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(about = "Fetch JSON from a configured endpoint and render it as HTML.", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Call the configured endpoint and render the response
    Fetch {
        /// Endpoint URL (saved as the new default)
        #[arg(long)]
        url: Option<String>,

        /// HTTP method: GET, POST, PUT, PATCH, DELETE, OPTIONS (saved)
        #[arg(short, long)]
        method: Option<String>,

        /// Bearer credential (saved)
        #[arg(long)]
        api_key: Option<String>,

        /// JSON file holding the current conversation record
        #[arg(long)]
        conversation: Option<PathBuf>,

        /// JSON file holding the current contact record
        #[arg(long)]
        contact: Option<PathBuf>,

        /// Write a standalone HTML page here instead of printing markup
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Render JSON from a file (or stdin) as markup
    Render {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Starting indent level
        #[arg(long, default_value_t = 0)]
        indent: usize,

        /// Write a standalone HTML page here instead of printing markup
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Show or edit the persisted endpoint settings
    Settings {
        #[command(subcommand)]
        settings_command: SettingsCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print current settings (credential masked)
    Show,

    /// Update one or more fields
    Set {
        #[arg(long)]
        url: Option<String>,

        #[arg(short, long)]
        method: Option<String>,

        #[arg(long)]
        api_key: Option<String>,
    },
}
