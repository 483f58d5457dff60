//! Role catalog
//!
//! Handles loading and validating the role catalog from TOML files and
//! environment variables. The resolver itself never reads from here;
//! callers load roles and pass them in.

pub mod catalog;
pub mod loader;
pub mod types;

pub use catalog::{RoleCatalog, RoleStore};
pub use loader::{load_catalog, load_catalog_from_str};
pub use types::*;
