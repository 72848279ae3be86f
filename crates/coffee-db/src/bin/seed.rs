//! # Menu Seeder
//!
//! Stocks the menu of a Coffee POS database.
//!
//! ## Usage
//! ```bash
//! # House menu into the default database (the one coffee-pos opens)
//! cargo run -p coffee-db --bin seed
//!
//! # Custom menu into a specific database
//! cargo run -p coffee-db --bin seed -- --db ./data/coffee.db --menu menu.toml
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use coffee_db::seed::{seed_menu, Menu};
use coffee_db::{default_database_path, Database, DbConfig};

/// Stock the coffee shop menu.
#[derive(Debug, Parser)]
#[command(name = "seed", version)]
struct Args {
    /// Database file path [default: <data dir>/coffee.db].
    #[arg(short, long, env = "COFFEE_DB_PATH")]
    db: Option<PathBuf>,

    /// TOML menu file; the house menu is used when omitted.
    #[arg(short, long)]
    menu: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let db_path = args.db.unwrap_or_else(default_database_path);

    println!("Coffee POS Menu Seeder");
    println!("======================");
    println!("Database: {}", db_path.display());

    let menu = match &args.menu {
        Some(path) => {
            println!("Menu:     {}", path.display());
            Menu::load(path)?
        }
        None => {
            println!("Menu:     house menu");
            Menu::house()
        }
    };

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");

    let report = seed_menu(&db, &menu).await?;
    db.close().await;

    println!(
        "✓ {} item(s) added, {} already on the menu",
        report.inserted, report.skipped
    );

    Ok(())
}
