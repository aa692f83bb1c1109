//! openpip-web: REST API for the openPIP protein registry.
//! Provides:
//!   - CRUD endpoints for proteins under `/proteins/`
//!   - Case-insensitive search and ordering on the list endpoint
//!   - Optional page-number pagination
//!   - TOML configuration and tracing setup for the binaries

pub mod config;
pub mod handlers;
pub mod logging;
pub mod pagination;
pub mod router;
pub mod serializer;
pub mod state;
