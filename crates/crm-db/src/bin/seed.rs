//! # Seed Data Generator
//!
//! Populates the database with a small fixture set for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p crm-db --bin seed
//!
//! # Specify database path
//! cargo run -p crm-db --bin seed -- --db ./data/crm.db
//! ```
//!
//! ## Generated Data
//! - 2 customers: Alice (international phone), Bob (dashed phone)
//! - 2 products: Laptop ($999.99, stock 10), Phone ($499.99, stock 20)
//!
//! Refuses to run against a non-empty database so repeated invocations
//! never pile up duplicate fixtures.

use chrono::Utc;
use std::env;

use crm_core::{Customer, Product};
use crm_db::migrations::migration_status;
use crm_db::repository::customer::generate_customer_id;
use crm_db::repository::product::generate_product_id;
use crm_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./crm.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CRM Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./crm.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 CRM Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");

    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({}/{})", applied, total);

    // Check existing data
    let existing_customers = db.customers().count().await?;
    let existing_products = db.products().count().await?;
    if existing_customers > 0 || existing_products > 0 {
        println!(
            "⚠ Database already has {} customers and {} products",
            existing_customers, existing_products
        );
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Seed customers
    println!();
    println!("Seeding customers...");

    let now = Utc::now();
    let customers = vec![
        Customer {
            id: generate_customer_id(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: Some("+1234567890".to_string()),
            created_at: now,
        },
        Customer {
            id: generate_customer_id(),
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            phone: Some("123-456-7890".to_string()),
            created_at: now,
        },
    ];

    for customer in &customers {
        db.customers().insert(customer).await?;
        println!("  + {} <{}>", customer.name, customer.email);
    }

    // Seed products
    println!();
    println!("Seeding products...");

    let products = vec![
        Product {
            id: generate_product_id(),
            name: "Laptop".to_string(),
            price_cents: 99_999,
            stock: 10,
            created_at: now,
            updated_at: now,
        },
        Product {
            id: generate_product_id(),
            name: "Phone".to_string(),
            price_cents: 49_999,
            stock: 20,
            created_at: now,
            updated_at: now,
        },
    ];

    for product in &products {
        db.products().insert(product).await?;
        println!(
            "  + {} ({} in stock at {})",
            product.name,
            product.stock,
            product.price()
        );
    }

    println!();
    println!(
        "✓ Seeded {} customers and {} products",
        customers.len(),
        products.len()
    );
    println!("✓ Seed complete!");

    Ok(())
}
