//! jsondb CLI
//!
//! Command-line interface for inspecting and appending to a jsondb file.

use std::process;

use clap::{Parser, Subcommand};
use jsondb::{Config, Engine};
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// jsondb CLI
#[derive(Parser, Debug)]
#[command(name = "jsondb-cli")]
#[command(about = "CLI for the jsondb append-only record store")]
#[command(version)]
struct Args {
    /// Database file
    #[arg(short, long, default_value = "./jsondb.jsonl")]
    file: String,

    /// Create missing parent directories
    #[arg(long)]
    create_dirs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append a value under a key
    Add {
        /// The key to append to
        key: String,

        /// The value, as JSON (anything that does not parse is stored as a string)
        value: String,
    },

    /// Print every value stored for the given keys
    Get {
        /// The keys to look up
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Print the index footer
    Index,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,jsondb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> jsondb::Result<()> {
    let config = Config::builder()
        .path(&args.file)
        .create_dirs(args.create_dirs)
        .build();

    let mut engine = Engine::new(config)?;
    let mut db = engine.session()?;

    match args.command {
        Commands::Add { key, value } => {
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            db.add([(key, value)])?;
            db.flush()?;
        }
        Commands::Get { keys } => {
            let values = db.get_many(&keys)?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        Commands::Index => {
            let index = db.index()?;
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
    }

    Ok(())
}
