//! Entity Lookup CLI
//!
//! Runs lookups against a definition file from the command line.
//!
//! Usage:
//!   entity-lookup --definitions words.json find "Contoso signed with Microsoft"
//!   entity-lookup --definitions words.csv find --file document.txt
//!   entity-lookup --config config/entity_lookup.yaml batch request.json
//!   cat request.json | entity-lookup batch

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use entity_lookup::{process_request, CancellationFlag, EntityLookup, LookupConfig, SkillRequest};

/// Find custom entities in text
#[derive(Parser, Debug)]
#[command(name = "entity-lookup")]
#[command(about = "Exact and fuzzy custom entity lookup")]
struct Args {
    /// YAML configuration file (defaults are read from the environment otherwise)
    #[arg(long, short = 'c', env = "ENTITY_LOOKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Entity definition file (.json or .csv), overrides the configured location
    #[arg(long, short = 'd')]
    definitions: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up entities in one text and print them as JSON
    Find {
        /// Text to search
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long, short = 'f', conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Process a {"values": [...]} request envelope and print the response
    Batch {
        /// Request file; stdin when omitted
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "entity_lookup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            LookupConfig::from_file(path)?
        }
        None => LookupConfig::from_env(),
    };
    if let Some(definitions) = args.definitions {
        config.definition_location = definitions;
        config.definition_root = None;
    }

    let engine = EntityLookup::from_config(&config).with_context(|| {
        format!(
            "Failed to load entity definitions from {}",
            config.resolved_definition_path().display()
        )
    })?;

    match args.command {
        Command::Find { text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => bail!("Provide TEXT or --file"),
            };

            let found = engine.lookup(&text)?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Command::Batch { input } => {
            let raw = match input {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let request: SkillRequest =
                serde_json::from_str(&raw).context("Invalid request record array")?;
            let response = process_request(&engine, &request, &CancellationFlag::new());
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
