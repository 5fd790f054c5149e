//! # Seed / Inspect Tool
//!
//! Initializes or inspects the stored till snapshot.
//!
//! ## Usage
//! ```bash
//! # Write seed data if the slot is empty
//! cargo run -p till-persist --bin till-seed
//!
//! # Overwrite the slot with fresh seed data
//! cargo run -p till-persist --bin till-seed -- --reset
//!
//! # Print a summary of what is stored
//! cargo run -p till-persist --bin till-seed -- --show
//!
//! # Use a specific config file
//! cargo run -p till-persist --bin till-seed -- --config ./till.toml --show
//! ```

use std::env;
use std::path::PathBuf;

use till_core::LOW_STOCK_THRESHOLD;
use till_persist::{init_tracing, FileBackend, PersistedStore, SnapshotBackend, TillConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut reset = false;
    let mut show = false;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--reset" | "-r" => reset = true,
            "--show" | "-s" => show = true,
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Till POS Seed Tool");
                println!();
                println!("Usage: till-seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -r, --reset          Overwrite stored state with seed data");
                println!("  -s, --show           Print a summary of the stored state");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let config = TillConfig::load(config_path)?;
    let backend = FileBackend::new(config.data_dir());
    let path = backend.path_for(config.storage_key());
    let blob_present = backend.load(config.storage_key())?.is_some();

    println!("Till POS Seed Tool");
    println!("==================");
    println!("Snapshot: {}", path.display());
    println!();

    let mut pos = PersistedStore::open(backend, config.storage_key());

    if reset {
        pos.try_reset()?;
        println!("✓ Reset to seed data");
    } else if pos.restored() {
        println!("✓ Existing snapshot kept (use --reset to overwrite)");
    } else {
        pos.persist()?;
        if blob_present {
            println!("⚠ Stored snapshot was unreadable, replaced with seed data");
        } else {
            println!("✓ Wrote seed data");
        }
    }

    if show {
        print_summary(&pos);
    }

    Ok(())
}

fn print_summary<B: SnapshotBackend>(pos: &PersistedStore<B>) {
    let store = pos.store();
    let summary = store.sales_summary();

    println!();
    println!("Products:     {}", summary.product_count);
    println!("Users:        {}", store.users().len());
    println!("Transactions: {}", summary.transaction_count);
    println!("Items sold:   {}", summary.items_sold);
    println!("Total sales:  {}", summary.total_sales);
    println!("Cart:         {} line(s), {}", store.cart().item_count(), store.cart_total());
    match store.current_user() {
        Some(user) => println!("Signed in:    {} ({})", user.name, user.role),
        None => println!("Signed in:    nobody"),
    }

    let low = store.low_stock(LOW_STOCK_THRESHOLD);
    if !low.is_empty() {
        println!();
        println!("Low stock:");
        for product in low {
            println!("  {:<20} {}", product.name, product.stock_quantity);
        }
    }
}
