//! Ordergraph CLI - database checks and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Check that the database answers
//! ordergraph-cli ping
//!
//! # Load demo products, orders, shipping rows and recommendations
//! ordergraph-cli seed
//!
//! # Print one page of a customer's orders with shipping attached
//! ordergraph-cli page --customer 1 --first 5 --min-price 20 --sort DESC
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERGRAPH_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "ordergraph-cli")]
#[command(author, version, about = "Ordergraph CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the database and run a trivial query
    Ping,
    /// Insert demo data into an existing schema
    Seed,
    /// Print a page of a customer's orders as JSON
    Page {
        /// Customer whose orders to list
        #[arg(short, long)]
        customer: i32,

        /// Page size
        #[arg(short, long, default_value_t = 10)]
        first: i32,

        /// Cursor of the last order already seen
        #[arg(short, long)]
        after: Option<String>,

        /// Inclusive lower bound on total price
        #[arg(long)]
        min_price: Option<Decimal>,

        /// `ASC` or `DESC`
        #[arg(short, long)]
        sort: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Ping => commands::ping::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Page {
            customer,
            first,
            after,
            min_price,
            sort,
        } => {
            let args = commands::page::PageArgs {
                customer,
                first,
                after,
                min_price,
                sort,
            };
            commands::page::run(args).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_page_arguments() {
        let cli = Cli::try_parse_from([
            "ordergraph-cli",
            "page",
            "--customer",
            "1",
            "--min-price",
            "25.50",
            "--sort",
            "DESC",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::Page {
            customer,
            first,
            after,
            min_price,
            sort,
        } = cli.command
        else {
            panic!("expected page command");
        };
        assert_eq!(customer, 1);
        assert_eq!(first, 10);
        assert_eq!(after, None);
        assert_eq!(min_price, Some(Decimal::new(2550, 2)));
        assert_eq!(sort.as_deref(), Some("DESC"));
    }
}
