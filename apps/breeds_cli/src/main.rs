use std::time::Duration;

use anyhow::{Context, Result};
use breed_core::{BreedApiClient, BreedSource, RecordStore, DEFAULT_BREEDS_URL};
use clap::{Parser, Subcommand};
use shared::domain::{origin_label, BreedRecord, OriginFilter};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "breeds", about = "Query the cat breeds API from the terminal")]
struct Cli {
    #[arg(long, env = "BREEDS_API_URL", default_value = DEFAULT_BREEDS_URL)]
    api_url: String,
    #[arg(long, env = "BREEDS_API_KEY")]
    api_key: Option<String>,
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print breeds as a table, optionally restricted to one origin.
    List {
        #[arg(long)]
        origin: Option<String>,
        /// Drop every breed with this name before printing. Repeatable.
        #[arg(long = "without")]
        without: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the distinct origins, one per line.
    Origins,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut client = BreedApiClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?;
    if let Some(api_key) = &cli.api_key {
        client = client.with_api_key(api_key.clone());
    }
    let records = client
        .fetch_breeds()
        .await
        .with_context(|| format!("failed to load breeds from {}", cli.api_url))?;
    let mut store = RecordStore::from_records(records);

    match cli.command {
        Command::List {
            origin,
            without,
            json,
        } => {
            for name in &without {
                let removed = store.delete_by_name(name);
                tracing::debug!(name = %name, removed, "excluded breeds by name");
            }
            let filter = origin.map_or(OriginFilter::All, OriginFilter::Origin);
            let records = store.filter_by_origin(&filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", render_table(&records));
            }
        }
        Command::Origins => {
            for origin in store.list_distinct_origins() {
                println!("{}", origin_label(&origin));
            }
        }
    }

    Ok(())
}

fn render_table(records: &[&BreedRecord]) -> String {
    let name_width = records
        .iter()
        .map(|record| record.name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or_default();
    let origin_width = records
        .iter()
        .map(|record| origin_label(&record.origin).chars().count())
        .chain(std::iter::once("Origin".len()))
        .max()
        .unwrap_or_default();

    let mut out = format!(
        "{:<name_width$}  {:<origin_width$}  Temperament\n",
        "Name", "Origin"
    );
    for record in records {
        out.push_str(&format!(
            "{:<name_width$}  {:<origin_width$}  {}\n",
            record.name,
            origin_label(&record.origin),
            record.temperament
        ));
    }
    out
}
