use clap::{Parser, Subcommand};
use serde::Serialize;

use edge_router::client::{ApiClient, FahrtUpdate, NewFahrt};

#[derive(Parser)]
#[command(name = "edge-cli")]
#[command(about = "Command-line client for the API behind the edge router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8787")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the router answers
    Ping,
    /// Key/value entries per page
    Kv {
        #[command(subcommand)]
        action: KvAction,
    },
    /// Trip records
    Fahrten {
        #[command(subcommand)]
        action: FahrtenAction,
    },
}

#[derive(Subcommand)]
enum KvAction {
    /// List entries for a page
    List { page: String },
    /// Insert or replace an entry; VALUE is parsed as JSON, falling back to a string
    Set { page: String, key: String, value: String },
    /// Delete an entry by id
    Rm { id: i64 },
}

#[derive(Subcommand)]
enum FahrtenAction {
    List,
    Create {
        #[arg(long)]
        start: String,
        #[arg(long)]
        ziel: String,
        #[arg(long)]
        dauer: Option<i64>,
    },
    Update {
        id: i64,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        ziel: Option<String>,
        #[arg(long)]
        dauer: Option<i64>,
    },
    Rm {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let api = ApiClient::new(&cli.url)?;

    match cli.command {
        Commands::Ping => print_json(&api.ping().await?)?,
        Commands::Kv { action } => match action {
            KvAction::List { page } => print_json(&api.kv().list(&page).await?)?,
            KvAction::Set { page, key, value } => {
                let value = serde_json::from_str(&value)
                    .unwrap_or(serde_json::Value::String(value));
                print_json(&api.kv().set(&page, &key, &value).await?)?;
            }
            KvAction::Rm { id } => {
                api.kv().remove(id).await?;
                println!("deleted {}", id);
            }
        },
        Commands::Fahrten { action } => match action {
            FahrtenAction::List => print_json(&api.fahrten().list().await?)?,
            FahrtenAction::Create { start, ziel, dauer } => {
                let payload = NewFahrt {
                    start,
                    ziel,
                    dauer_minutes: dauer,
                };
                print_json(&api.fahrten().create(&payload).await?)?;
            }
            FahrtenAction::Update {
                id,
                start,
                ziel,
                dauer,
            } => {
                let payload = FahrtUpdate {
                    start,
                    ziel,
                    dauer_minutes: dauer,
                };
                print_json(&api.fahrten().update(id, &payload).await?)?;
            }
            FahrtenAction::Rm { id } => {
                api.fahrten().remove(id).await?;
                println!("deleted {}", id);
            }
        },
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
