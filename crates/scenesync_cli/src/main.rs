//! SceneSync CLI
//!
//! Offline tools for room keys and stored scene envelopes.
//!
//! # Commands
//!
//! - `keygen` - Generate a room key
//! - `inspect` - Display envelope header fields
//! - `seal` - Encrypt an element collection into an envelope
//! - `open` - Decrypt an envelope to element JSON
//! - `merge` - Reconcile two element collections

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SceneSync command-line envelope tools.
#[derive(Parser)]
#[command(name = "scenesync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new room key
    Keygen {
        /// Key size in bits (128 or 256)
        #[arg(short, long, default_value = "128")]
        bits: u32,
    },

    /// Display envelope header fields without decrypting
    Inspect {
        /// Envelope file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Encrypt an element collection into an envelope
    Seal {
        /// JSON array of elements
        elements: PathBuf,

        /// Room key (base64url)
        #[arg(short, long)]
        key: String,

        /// Output envelope file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decrypt an envelope and print its elements
    Open {
        /// Envelope file
        file: PathBuf,

        /// Room key (base64url)
        #[arg(short, long)]
        key: String,
    },

    /// Reconcile two element collections and print the result
    Merge {
        /// Local collection (JSON)
        local: PathBuf,

        /// Remote collection (JSON)
        remote: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Keygen { bits } => commands::keygen::run(bits)?,
        Commands::Inspect { file, format } => commands::inspect::run(&file, format)?,
        Commands::Seal {
            elements,
            key,
            output,
        } => commands::seal::run(&elements, &key, &output)?,
        Commands::Open { file, key } => commands::open::run(&file, &key)?,
        Commands::Merge { local, remote } => commands::merge::run(&local, &remote)?,
        Commands::Version => {
            println!("SceneSync CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("SceneSync Core v{}", scenesync_core::VERSION);
        }
    }

    Ok(())
}
