//! openpip-common: Error types shared by the openPIP storage and web crates.

pub mod error;

pub use error::{ApiError, FieldErrors};
