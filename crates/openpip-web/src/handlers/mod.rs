//! HTTP handlers for all API routes.

pub mod proteins;
pub mod root;
