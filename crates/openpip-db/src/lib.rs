//! openPIP Database Layer
//!
//! This crate owns the `protein` table: connection handling, schema creation,
//! the repository used by the HTTP API, and the sample data set.
//!
//! # Example
//!
//! ```rust,no_run
//! use openpip_db::{Database, NewProtein, ProteinRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://openpip.db?mode=rwc", 5).await?;
//!     db.initialize().await?;
//!
//!     let proteins = ProteinRepository::new(std::sync::Arc::new(db));
//!     let tp53 = proteins.insert(&NewProtein::new("TP53", "P04637")).await?;
//!     println!("stored {tp53}");
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod proteins;
pub mod query;
pub mod schema;
pub mod seed;

pub use database::{Database, DatabaseStats};
pub use error::{DbError, Result, DUPLICATE_UNIPROT_MESSAGE};
pub use proteins::ProteinRepository;
pub use query::{parse_ordering, ProteinQuery, SortField, SortKey, DEFAULT_ORDERING};
pub use schema::{NewProtein, Protein, ProteinChanges, TABLE_PROTEINS};
pub use seed::{load_sample_proteins, SeedReport, SAMPLE_PROTEINS};
