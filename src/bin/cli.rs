//! localfs-cache CLI
//!
//! Inspect and edit a cache directory holding string values.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use localfs_cache::{Config, FileStore, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// localfs-cache CLI
#[derive(Parser, Debug)]
#[command(name = "localfs-cache")]
#[command(about = "Inspect a filesystem-backed bank/key cache")]
#[command(version)]
struct Args {
    /// Cache root directory
    #[arg(short, long, default_value = "./cache")]
    cache_dir: PathBuf,

    /// Skip fsync before renaming new entries into place
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a string value under bank/key
    Store {
        bank: String,
        key: String,
        value: String,
    },

    /// Print the value stored under bank/key
    Fetch { bank: String, key: String },

    /// List keys and sub-banks of a bank
    List { bank: String },

    /// Remove a whole bank, or one key in it
    Flush { bank: String, key: Option<String> },

    /// Check whether a bank, or one key in it, exists
    Contains { bank: String, key: Option<String> },

    /// Print the modification time (unix seconds) of bank/key
    Updated { bank: String, key: String },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,localfs_cache=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("localfs-cache v{}", localfs_cache::VERSION);
    tracing::debug!("Cache directory: {}", args.cache_dir.display());

    let config = Config::builder()
        .cache_dir(&args.cache_dir)
        .sync_writes(!args.no_sync)
        .build();
    let store = FileStore::new(config);

    match run(&store, args.command) {
        Ok(Outcome::Done) => {}
        Ok(Outcome::NotFound) => process::exit(2),
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    }
}

/// How a successful command ended
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Done,
    /// The addressed entry does not exist (exit status 2)
    NotFound,
}

fn run(store: &FileStore, command: Commands) -> Result<Outcome> {
    match command {
        Commands::Store { bank, key, value } => {
            store.store(&bank, &key, &value)?;
            tracing::info!("Stored {}/{}", bank, key);
        }
        Commands::Fetch { bank, key } => match store.fetch::<String>(&bank, &key)? {
            Some(value) => println!("{}", value),
            None => {
                tracing::info!("{}/{} not found", bank, key);
                return Ok(Outcome::NotFound);
            }
        },
        Commands::List { bank } => {
            for name in store.list(&bank)? {
                println!("{}", name);
            }
        }
        Commands::Flush { bank, key } => {
            println!("{}", store.flush(&bank, key.as_deref())?);
        }
        Commands::Contains { bank, key } => {
            println!("{}", store.contains(&bank, key.as_deref()));
        }
        Commands::Updated { bank, key } => match store.updated(&bank, &key)? {
            Some(secs) => println!("{}", secs),
            None => return Ok(Outcome::NotFound),
        },
    }

    Ok(Outcome::Done)
}
