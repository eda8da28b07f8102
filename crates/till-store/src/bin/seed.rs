//! # Seed Data Generator
//!
//! Writes a sample menu and stock counts into a data directory.
//!
//! ## Usage
//! ```bash
//! # Seed the current directory
//! cargo run -p till-store --bin seed
//!
//! # Seed another directory
//! cargo run -p till-store --bin seed -- --data ./data
//!
//! # Overwrite existing files
//! cargo run -p till-store --bin seed -- --force
//! ```
//!
//! orders.json is never touched: seeding restocks, it does not erase history.

use std::env;
use std::process;

use till_core::{Catalog, CatalogItem, DiscountRate, Inventory, Money};
use till_store::{CatalogRepository, InventoryRepository, JsonFile, StoreConfig};

/// (name, price in minor units, discount bps, recipe)
const MENU: &[(&str, i64, Option<u32>, &[(&str, u32)])] = &[
    (
        "Zinger Burger",
        55000,
        Some(1000),
        &[("bun", 1), ("zinger_fillet", 1), ("lettuce", 1), ("mayo", 1)],
    ),
    (
        "Mighty Burger",
        85000,
        None,
        &[("bun", 1), ("zinger_fillet", 1), ("chicken_fillet", 1), ("cheese", 1)],
    ),
    (
        "Twister Wrap",
        45000,
        Some(500),
        &[("tortilla", 1), ("chicken_strip", 2), ("lettuce", 1), ("mayo", 1)],
    ),
    ("Hot Wings", 40000, None, &[("wing", 6)]),
    ("Fries", 25000, None, &[("potato", 2)]),
    ("Pepsi", 15000, None, &[("pepsi_can", 1)]),
];

const STOCK: &[(&str, u32)] = &[
    ("bun", 30),
    ("zinger_fillet", 20),
    ("chicken_fillet", 10),
    ("chicken_strip", 40),
    ("tortilla", 15),
    ("lettuce", 40),
    ("mayo", 50),
    ("cheese", 20),
    ("wing", 60),
    ("potato", 50),
    ("pepsi_can", 48),
];

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for (name, price, discount, recipe) in MENU {
        let mut item = CatalogItem::new(Money::from_cents(*price));
        if let Some(bps) = discount {
            item = item.with_discount(DiscountRate::from_bps(*bps));
        }
        for (component, count) in recipe.iter() {
            item = item.with_component(*component, *count);
        }
        catalog.insert(*name, item);
    }
    catalog
}

fn sample_inventory() -> Inventory {
    STOCK
        .iter()
        .fold(Inventory::new(), |inventory, (component, count)| {
            inventory.with(*component, *count)
        })
}

const USAGE: &str = "\
Till POS Seed Data Generator

Usage: seed [OPTIONS]

Options:
  -d, --data <DIR>   Data directory (default: .)
  -f, --force        Overwrite existing products and inventory
  -h, --help         Show this help message";

#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    data_dir: String,
    force: bool,
    help: bool,
}

/// Parses arguments, program name excluded.
fn parse_args<I>(args: I) -> Result<SeedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = SeedArgs {
        data_dir: String::from("."),
        force: false,
        help: false,
    };
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" | "-d" => {
                parsed.data_dir = args
                    .next()
                    .ok_or_else(|| format!("{} needs a directory", arg))?;
            }
            "--force" | "-f" => parsed.force = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(parsed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let SeedArgs {
        data_dir,
        force,
        help,
    } = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!();
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    if help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = StoreConfig::new(&data_dir);
    let products = CatalogRepository::new(JsonFile::new(config.products_path()));
    let inventory = InventoryRepository::new(JsonFile::new(config.inventory_path()));

    println!("🌱 Till POS Seed Data Generator");
    println!("===============================");
    println!("Data directory: {}", data_dir);
    println!();

    if !force && (products.exists() || inventory.exists()) {
        println!("⚠ Data files already exist");
        println!("  Skipping seed to keep current stock.");
        println!("  Re-run with --force to overwrite.");
        return Ok(());
    }

    let catalog = sample_catalog();
    products.save(&catalog)?;
    println!("✓ {} menu items → {}", catalog.len(), config.products_path().display());

    let stock = sample_inventory();
    inventory.replace(&stock)?;
    println!("✓ {} components → {}", stock.len(), config.inventory_path().display());

    println!();
    println!("✅ Seed complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::availability::list_available_items;
    use till_core::validation::validate_catalog_item;

    #[test]
    fn test_sample_catalog_is_valid() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), MENU.len());
        for (name, item) in catalog.iter() {
            validate_catalog_item(name, item).unwrap();
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(args(&["--data", "./shop", "-f"])).unwrap();
        assert_eq!(parsed.data_dir, "./shop");
        assert!(parsed.force);
        assert!(!parsed.help);

        assert_eq!(parse_args(args(&[])).unwrap().data_dir, ".");
        assert!(parse_args(args(&["-h"])).unwrap().help);
    }

    #[test]
    fn test_data_without_directory_is_an_error() {
        assert_eq!(parse_args(args(&["--data"])).unwrap_err(), "--data needs a directory");
        assert!(parse_args(args(&["-f", "-d"])).is_err());
        assert!(parse_args(args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_everything_is_sellable_after_seed() {
        let available = list_available_items(&sample_catalog(), &sample_inventory());
        assert_eq!(available.len(), MENU.len());
    }
}
