//! meal-catalog - create and seed the meal catalog database

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use meal_catalog::database::{initialize_database, CatalogStore};
use meal_catalog::seed::{seed_catalog, SeedData};
use meal_catalog::utils::CatalogSettings;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides the settings file)
    #[arg(long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create the schema without inserting rows
    Init,
    /// Create the schema and insert the exemplar rows
    Seed,
    /// Print an order item with its related rows as JSON
    Show { order_item_id: String },
    /// Print the number of rows in each table
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut settings = match &args.config {
        Some(path) => CatalogSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => CatalogSettings::default(),
    };
    if let Some(database) = args.database {
        settings.database_path = database;
    }

    let pool = initialize_database(&settings)
        .await
        .with_context(|| format!("failed to open {}", settings.database_path.display()))?;
    let store = CatalogStore::new(pool);

    let outcome = run(&store, args.command.unwrap_or(Command::Seed)).await;
    store.close().await;
    outcome
}

async fn run(store: &CatalogStore, command: Command) -> Result<()> {
    match command {
        Command::Init => {
            info!("Schema ready");
        }
        Command::Seed => {
            seed_catalog(store, &SeedData::exemplar())
                .await
                .context("failed to seed catalog")?;
        }
        Command::Show { order_item_id } => {
            let Some(detail) = store.get_order_item_detail(&order_item_id).await? else {
                bail!("order item {} not found", order_item_id);
            };
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Stats => {
            for (table, count) in store.table_counts().await? {
                println!("{:<16} {}", table.name(), count);
            }
        }
    }
    Ok(())
}
