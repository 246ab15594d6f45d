//! `codable` CLI: inspect, re-key, and check JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Show the tree rendering of a document
//! echo '{"userName":"kit","tags":[1,2]}' | codable inspect
//!
//! # Rename every object key to snake_case (stdin → stdout)
//! echo '{"userName":"kit"}' | codable rekey --to snake
//!
//! # Rename back to camelCase, file to file, indented
//! codable rekey --to camel -i user.json -o user.camel.json --pretty
//!
//! # Check that a document survives a decode/encode round trip
//! codable check -i user.json
//!
//! # Log strategy decisions
//! RUST_LOG=codable_core=trace codable check -i user.json
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codable_core::{CodingPath, JsonDecoder, JsonEncoder, KeyNamingStrategy, Map, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codable", version, about = "Inspect and re-key JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tree rendering of a JSON document
    Inspect {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Rename every object key in a document
    Rekey {
        /// Target key convention
        #[arg(long, value_enum)]
        to: Convention,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Verify that a document parses and survives a decode/encode round trip
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Convention {
    /// snake_case keys
    Snake,
    /// lowerCamelCase keys
    Camel,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { input } => {
            let value = parse_input(input.as_deref())?;
            println!("{value}");
        }
        Commands::Rekey {
            to,
            input,
            output,
            pretty,
        } => {
            let value = parse_input(input.as_deref())?;
            let rekeyed = rekey(value, to, &CodingPath::root())?;
            let bytes = if pretty {
                codable_core::bridge::serialize_pretty(&rekeyed)
            } else {
                codable_core::bridge::serialize(&rekeyed)
            }
            .context("Failed to serialize JSON")?;
            write_output(output.as_deref(), &bytes)?;
        }
        Commands::Check { input } => {
            let value = parse_input(input.as_deref())?;
            let decoded: Value = JsonDecoder::new()
                .decode_value(&value)
                .context("Document failed to decode")?;
            let encoded = JsonEncoder::new()
                .encode_value(&decoded)
                .context("Document failed to encode")?;
            if encoded != value {
                anyhow::bail!("Document changed during the round trip");
            }
            println!("ok: {}", summary(&value));
        }
    }

    Ok(())
}

/// Rename the keys of every object in the tree, recursively. Array order and
/// scalar values are untouched. Two keys renaming to the same key is an error.
fn rekey(value: Value, to: Convention, path: &CodingPath) -> Result<Value> {
    let naming = KeyNamingStrategy::SnakeCase;
    match value {
        Value::Object(object) => {
            let mut renamed_object = Map::with_capacity(object.len());
            let mut sources = Vec::with_capacity(object.len());
            for (key, child) in object {
                let renamed = match to {
                    Convention::Snake => naming.native_to_wire(&key).into_owned(),
                    Convention::Camel => naming.wire_to_native(&key).into_owned(),
                };
                if let Some(index) = renamed_object.get_index_of(&renamed) {
                    let previous: &String = &sources[index];
                    anyhow::bail!(
                        "Keys {previous:?} and {key:?} at {path} both rename to {renamed:?}"
                    );
                }
                if renamed != key {
                    debug!(from = %key, to = %renamed, "renamed key");
                }
                let child = rekey(child, to, &path.appending_key(renamed.as_str()))?;
                renamed_object.insert(renamed, child);
                sources.push(key);
            }
            Ok(Value::Object(renamed_object))
        }
        Value::Array(array) => array
            .into_iter()
            .enumerate()
            .map(|(index, child)| rekey(child, to, &path.appending_index(index)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        scalar => Ok(scalar),
    }
}

fn summary(value: &Value) -> String {
    match value {
        Value::Object(object) => format!("object with {} keys", object.len()),
        Value::Array(array) => format!("array of {} elements", array.len()),
        scalar => scalar.kind().to_string(),
    }
}

fn parse_input(path: Option<&str>) -> Result<Value> {
    let bytes = read_input(path)?;
    let value = codable_core::bridge::parse(&bytes).context("Failed to parse JSON")?;
    info!(kind = value.kind(), bytes = bytes.len(), "parsed input");
    Ok(value)
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", String::from_utf8_lossy(content));
        }
    }
    Ok(())
}
