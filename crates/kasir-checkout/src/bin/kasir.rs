//! # kasir CLI
//!
//! Runs checkouts and reads history against the configured database.
//! Results are printed as JSON on stdout; logs go to stderr.
//!
//! ## Usage
//! ```bash
//! kasir checkout --cashier <id> --cash 300000 \
//!     --item <product_id>:1 --item <product_id>:2 [--discount 10% | --discount 5000]
//! kasir history [--month 2024-02] [--limit 20]
//! kasir receipt <transaction_id>
//! kasir restock <product_id> <qty>
//! kasir summary --month 2024-02
//! ```
//!
//! Configuration comes from `KASIR_*` environment variables
//! (see `CheckoutConfig::from_env`); `--db` overrides `KASIR_DB_PATH`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use kasir_checkout::telemetry::init_tracing;
use kasir_checkout::{CheckoutConfig, PosService, TransactionFilter};
use kasir_core::{Cart, Discount, Money, YearMonth};
use kasir_db::Database;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(name = "kasir", about = "Kasir point of sale", long_about = None)]
struct Cli {
    /// SQLite database file (`:memory:` for a throwaway store)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a sale and print its receipt
    Checkout(CheckoutArgs),
    /// List recorded sales, newest first
    History(HistoryArgs),
    /// Reprint one sale
    Receipt {
        transaction_id: String,
    },
    /// Add received goods to a product's stock
    Restock {
        product_id: String,
        quantity: i64,
    },
    /// Totals for one month
    Summary {
        /// Month as YYYY-MM
        #[arg(long, short)]
        month: YearMonth,
    },
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Cashier user id
    #[arg(long)]
    cashier: String,

    /// Cash tendered, in Rupiah
    #[arg(long)]
    cash: i64,

    /// Cart line as PRODUCT_ID:QTY; repeat for more lines
    #[arg(long = "item", required = true, value_parser = parse_item)]
    items: Vec<ItemArg>,

    /// `10%` or `12.5%` off, or a fixed amount such as `5000`
    #[arg(long)]
    discount: Option<Discount>,
}

#[derive(Debug, Args)]
struct HistoryArgs {
    /// Month as YYYY-MM; all months when omitted
    #[arg(long, short)]
    month: Option<YearMonth>,

    /// Maximum number of sales to list
    #[arg(long, short)]
    limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemArg {
    product_id: String,
    quantity: i64,
}

fn parse_item(s: &str) -> Result<ItemArg, String> {
    let (product_id, quantity) = s
        .split_once(':')
        .ok_or_else(|| format!("'{s}' is not PRODUCT_ID:QTY"))?;
    if product_id.is_empty() {
        return Err(format!("'{s}' has no product id"));
    }
    let quantity = quantity
        .parse()
        .map_err(|_| format!("'{quantity}' is not a quantity"))?;
    Ok(ItemArg {
        product_id: product_id.to_string(),
        quantity,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut config = CheckoutConfig::from_env()?;
    if let Some(path) = cli.db {
        config = config.database_path(path);
    }
    let service = PosService::open(config).await?;

    match cli.command {
        Commands::Checkout(args) => checkout(&service, args).await,
        Commands::History(args) => {
            let filter = TransactionFilter {
                year_month: args.month,
                limit: args.limit,
            };
            print_json(&service.list_transactions(filter).await?)
        }
        Commands::Receipt { transaction_id } => {
            print_json(&service.get_transaction(&transaction_id).await?)
        }
        Commands::Restock {
            product_id,
            quantity,
        } => print_json(&service.restock(&product_id, quantity).await?),
        Commands::Summary { month } => print_json(&service.sales_summary(month).await?),
    }
}

async fn checkout(service: &PosService<Database>, args: CheckoutArgs) -> CliResult<()> {
    let mut cart = Cart::new();
    for item in &args.items {
        let product = service
            .database()
            .products()
            .get_by_id(&item.product_id)
            .await?
            .ok_or_else(|| format!("product {} not found", item.product_id))?;
        cart.add_product(&product, item.quantity)?;
    }

    let request = cart.into_request(args.discount, Money::new(args.cash), args.cashier);
    print_json(&service.checkout(request).await?)
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(
            parse_item("p1:3").unwrap(),
            ItemArg {
                product_id: "p1".to_string(),
                quantity: 3
            }
        );
        assert!(parse_item("p1").is_err());
        assert!(parse_item(":3").is_err());
        assert!(parse_item("p1:three").is_err());
    }

    #[test]
    fn test_checkout_command() {
        let cli = Cli::try_parse_from([
            "kasir", "checkout", "--cashier", "u1", "--cash", "300000", "--item", "p1:1",
            "--item", "p2:2", "--discount", "10%",
        ])
        .unwrap();

        let Commands::Checkout(args) = cli.command else {
            panic!("expected checkout");
        };
        assert_eq!(args.cashier, "u1");
        assert_eq!(args.cash, 300_000);
        assert_eq!(args.items.len(), 2);
        assert_eq!(args.items[1].quantity, 2);
        assert_eq!(args.discount, Some(Discount::percentage(10)));
    }

    #[test]
    fn test_checkout_needs_an_item() {
        let result = Cli::try_parse_from(["kasir", "checkout", "--cashier", "u1", "--cash", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_month_is_parsed() {
        let cli = Cli::try_parse_from(["kasir", "--db", "shop.db", "summary", "--month", "2024-12"])
            .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("shop.db")));
        let Commands::Summary { month } = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(month, "2024-12".parse::<YearMonth>().unwrap());

        assert!(Cli::try_parse_from(["kasir", "summary", "--month", "2024-13"]).is_err());
        assert!(Cli::try_parse_from(["kasir", "history", "-m", "2024/01"]).is_err());
    }
}
