use clap::{Parser, Subcommand};
use itembox::client::{Action, ItemsClient, Refresh, run};
use itembox::config::Config;
use itembox::utils::logging::init_tracing;
use itembox_schema::ItemPayload;
use std::process::ExitCode;
use tracing::error;
use url::Url;

#[derive(Parser)]
#[command(name = "itembox-cli")]
#[command(about = "Manage items through the itembox HTTP API", long_about = None)]
struct Cli {
    /// API base URL; overrides `client.api_url` from configuration
    #[arg(long, global = true)]
    api_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show all items
    List,
    /// Create a new item
    Create {
        #[arg(value_parser = non_empty)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Replace the name and description of an item
    Update {
        id: i64,
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an item
    Delete { id: i64 },
}

fn non_empty(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("name must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing("warn");

    let cli = Cli::parse();
    let api_url = match cli.api_url {
        Some(url) => url,
        None => match Config::load() {
            Ok(cfg) => cfg.client.api_url,
            Err(e) => {
                error!(error = %e, "failed to load configuration");
                return ExitCode::FAILURE;
            }
        },
    };
    let client = ItemsClient::new(api_url);

    let action = match cli.command {
        Command::List => Action::List,
        Command::Create { name, description } => {
            Action::Create(ItemPayload::new(name, description))
        }
        Command::Update {
            id,
            name,
            description,
        } => Action::Update(id, ItemPayload::new(name, description)),
        Command::Delete { id } => Action::Delete(id),
    };

    match run(&client, action, &mut std::io::stdout().lock()).await {
        Ok(Refresh::Loaded(_)) => ExitCode::SUCCESS,
        Ok(Refresh::Failed) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "failed to write output");
            ExitCode::FAILURE
        }
    }
}
