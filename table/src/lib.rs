//! Flag tables: loading and saving flag registries as YAML or JSON.
//!
//! The built-in tables of `flag-registry-core` cover the standard commands.
//! A [`FlagTable`] lets a tool describe its own catalogs and command recipes
//! in a file, validate them with the same rules, and export an existing
//! registry for review.
//!
//! # Quick start
//!
//! ```no_run
//! use flag_registry_core::FlagRegistry;
//! use flag_registry_table::FlagTable;
//!
//! // Export the standard registry
//! let standard = FlagRegistry::standard().unwrap();
//! FlagTable::from_registry(&standard).save("flags.yaml").unwrap();
//!
//! // Build a registry from a file
//! let registry = FlagTable::load("flags.yaml").unwrap().into_registry().unwrap();
//! assert!(registry.command("eval").is_ok());
//! ```

mod error;
mod table;

pub use error::{Result, TableError};
pub use table::{CatalogDef, FlagDef, FlagTable, TABLE_FORMAT_VERSION};
