//! # Demo Data Generator
//!
//! Populates the database with collaborators and inventory items for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed ./inventory_dev.db
//! cargo run -p inventory-db --bin seed
//!
//! # Specify database path
//! cargo run -p inventory-db --bin seed -- --db ./data/inventory.db
//! ```
//!
//! Skips entirely when the database already has items. No login accounts are
//! created here; the first-run bootstrap owns the administrator.

use std::env;

use inventory_core::form::{CollaboratorDraft, ItemDraft};
use inventory_core::ItemStatus;
use inventory_db::{Database, DbConfig};

const COLLABORATORS: &[(&str, &str, &str, &str)] = &[
    ("Ana Souza", "ana.souza@example.com", "Finance", "Analyst"),
    ("Bruno Lima", "bruno.lima@example.com", "IT", "Support Technician"),
    ("Carla Mendes", "carla.mendes@example.com", "HR", "Coordinator"),
    ("Diego Rocha", "diego.rocha@example.com", "Operations", "Supervisor"),
    ("Elisa Prado", "elisa.prado@example.com", "IT", "Developer"),
];

/// (name, category, location, quantity, minimum_stock)
const ITEMS: &[(&str, &str, &str, i64, i64)] = &[
    ("Laptop 14\"", "Electronics", "IT storage", 12, 3),
    ("USB-C Dock", "Electronics", "IT storage", 4, 5),
    ("27\" Monitor", "Electronics", "Floor 2", 20, 4),
    ("Wireless Mouse", "Peripherals", "IT storage", 35, 10),
    ("Keyboard", "Peripherals", "IT storage", 8, 10),
    ("Office Chair", "Furniture", "Floor 1", 40, 5),
    ("Standing Desk", "Furniture", "Floor 3", 6, 2),
    ("Projector", "Electronics", "Meeting room A", 2, 1),
    ("Toner Cartridge", "Supplies", "Print room", 3, 6),
    ("Headset", "Peripherals", "Floor 2", 15, 5),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./inventory_dev.db");

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
                println!("InventoryPro Demo Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./inventory_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("InventoryPro Demo Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut collaborator_ids = Vec::with_capacity(COLLABORATORS.len());
    for (name, email, department, position) in COLLABORATORS {
        let draft = CollaboratorDraft {
            name: name.to_string(),
            email: Some(email.to_string()),
            department: Some(department.to_string()),
            position: Some(position.to_string()),
        };
        let row = db.collaborators().insert(&draft).await?;
        collaborator_ids.push(row.id);
    }
    println!("✓ Inserted {} collaborators", collaborator_ids.len());

    let statuses = [
        ItemStatus::Available,
        ItemStatus::InUse,
        ItemStatus::Available,
        ItemStatus::Maintenance,
    ];

    let mut inserted = 0;
    for (idx, (name, category, location, quantity, minimum_stock)) in ITEMS.iter().enumerate() {
        let status = statuses[idx % statuses.len()].clone();
        let collaborator_id = (status == ItemStatus::InUse)
            .then(|| collaborator_ids[idx % collaborator_ids.len()].clone());

        let draft = ItemDraft {
            patrimony_number: format!("PAT-{:04}", idx + 1),
            name: name.to_string(),
            description: None,
            category: Some(category.to_string()),
            quantity: *quantity,
            minimum_stock: *minimum_stock,
            location: Some(location.to_string()),
            status,
            collaborator_id,
            ticket_number: (idx % 3 == 0).then(|| format!("TCK-{:05}", 1000 + idx)),
        };

        if let Err(e) = db.items().insert(&draft).await {
            eprintln!("Failed to insert {}: {}", draft.patrimony_number, e);
            continue;
        }
        inserted += 1;
    }

    println!("✓ Inserted {} items", inserted);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
