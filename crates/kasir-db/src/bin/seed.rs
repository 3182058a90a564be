//! # Seed Data Generator
//!
//! Populates the database with a demo catalog and an `admin` cashier.
//!
//! ## Usage
//! ```bash
//! # Default catalog into ./kasir_dev.db
//! cargo run -p kasir-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p kasir-db --bin seed -- --count 40 --db ./data/kasir.db
//! ```
//!
//! ## Generated Products
//! Clothing lines in several colours, each with:
//! - Name: `{model} {colour}`
//! - Price: Rp 45.000 - Rp 150.000 in steps of Rp 5.000
//! - Stock: 0 - 30

use chrono::Utc;
use kasir_core::{Money, Product};
use kasir_db::{Database, DbConfig};
use std::env;
use uuid::Uuid;

/// Models with their base price.
const MODELS: &[(&str, i64)] = &[
    ("Daster Anaya", 85_000),
    ("Daster Dibyo", 90_000),
    ("Daster Kaftan", 120_000),
    ("Kaos Polos", 50_000),
    ("Kemeja Batik", 150_000),
    ("Celana Kulot", 95_000),
    ("Rok Plisket", 80_000),
    ("Hijab Segi Empat", 45_000),
];

const COLOURS: &[&str] = &["Pink", "Hitam", "Navy", "Maroon", "Sage"];

const DEFAULT_COUNT: usize = 40;
const DEFAULT_CASHIER: &str = "admin";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = DEFAULT_COUNT;
    let mut db_path = String::from("./kasir_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let cashier = match db.users().get_by_username(DEFAULT_CASHIER).await? {
        Some(user) => user,
        None => db.users().insert(DEFAULT_CASHIER).await?,
    };
    println!("✓ Cashier '{}' has id {}", cashier.username, cashier.id);

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping catalog seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    'outer: for (model_idx, (model, base_price)) in MODELS.iter().enumerate() {
        for (colour_idx, colour) in COLOURS.iter().enumerate() {
            if generated >= count {
                break 'outer;
            }

            let product = generate_product(model, colour, *base_price, model_idx * 7 + colour_idx);
            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.name, e);
                continue;
            }

            println!("  {:<28} {:>12}  stok {}", product.name, product.price().to_string(), product.stock);
            generated += 1;
        }
    }

    println!();
    println!("✓ Generated {} products", generated);

    let sample = db.products().list("daster", 5).await?;
    println!("  Search 'daster': {} results", sample.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one catalog product; `seed` varies price and stock deterministically.
fn generate_product(model: &str, colour: &str, base_price: i64, seed: usize) -> Product {
    let now = Utc::now();

    // ± up to Rp 10.000 in Rp 5.000 steps
    let price_offset = ((seed % 5) as i64 - 2) * 5_000;
    let price = Money::new((base_price + price_offset).max(45_000));

    Product {
        id: Uuid::new_v4().to_string(),
        name: format!("{} {}", model, colour),
        stock: ((seed * 13) % 31) as i64,
        price: price.amount(),
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}
