//! Load the built-in sample proteins into the configured database.
//!
//! Run with: cargo run -p openpip-web --bin load-sample-proteins
//! Proteins whose UniProt accession is already stored are left untouched.

use std::sync::Arc;

use openpip_db::{load_sample_proteins, Database, ProteinRepository};
use openpip_web::{config::Config, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    logging::init(&config.logging)?;

    let db = Database::connect(&config.database.url, config.database.max_connections).await?;
    db.initialize().await?;
    let repo = ProteinRepository::new(Arc::new(db));

    println!("Loading sample proteins...");
    let report = load_sample_proteins(&repo).await?;

    for name in &report.created {
        println!("✓ Created: {}", name);
    }
    for name in &report.existing {
        println!("→ Already exists: {}", name);
    }
    println!("\nTotal proteins: {}", report.total);

    Ok(())
}
