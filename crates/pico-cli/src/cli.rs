//! Command-line arguments.

use clap::{Args, Parser, Subcommand};

/// Pico - a single page of notes
#[derive(Parser, Debug)]
#[command(name = "pico")]
#[command(about = "Pico notebook server and terminal editor", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "PICO_CONFIG")]
    pub config: Option<String>,

    /// Server URL for client commands (overrides client.base_url)
    #[arg(short, long, global = true, env = "PICO_SERVER")]
    pub server: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Print the stored blocks
    List,
    /// Append a block
    Add {
        /// Heading text
        #[arg(long, default_value = "")]
        heading: String,
        /// Body text
        #[arg(long, default_value = "")]
        body: String,
    },
    /// Change a block's heading or body
    Edit {
        /// Position in the list, starting at 0
        index: usize,
        /// New heading
        #[arg(long)]
        heading: Option<String>,
        /// New body
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a block
    Remove {
        /// Position in the list, starting at 0
        index: usize,
    },
    /// Edit interactively with autosave
    Session,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Overrides for `pico serve`.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
    /// JSON data file
    #[arg(long)]
    pub data: Option<String>,
    /// Directory served under /static
    #[arg(long)]
    pub static_dir: Option<String>,
    /// Keep blocks in memory only
    #[arg(long)]
    pub memory: bool,
}

/// `pico config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. server.port)
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a config file with default values
    Init {
        /// Where to write it (defaults to the resolved path)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
