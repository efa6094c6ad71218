//! Canonical command-line flag identities and the catalogs that group them.
//!
//! This crate is the shared vocabulary of a multi-command CLI:
//!
//! - [`FlagIdentity`]: one flag's long name and optional short alias, with
//!   exact token matching.
//! - [`FlagCatalog`]: a named, validated collection of identities keyed by
//!   symbolic names such as `OUTPUT_PATH`. The union of catalogs assembled for
//!   a subcommand is a catalog as well.
//! - [`FlagRegistry`]: every catalog plus each subcommand's effective flag
//!   set, built once and passed by reference.
//! - [`ArgvBuilder`]: renders flags back into argument lists.
//! - [`standard`]: the built-in tables (general, base, project and test
//!   flags) and the commands composed from them.
//!
//! Duplicate spellings, duplicate keys and malformed names are rejected while
//! a catalog or registry is built. A token that matches nothing is not an
//! error: [`FlagCatalog::resolve`] simply returns `None`.
//!
//! # Example
//!
//! ```
//! use flag_registry_core::*;
//!
//! let registry = FlagRegistry::standard().unwrap();
//! let eval = registry.command("eval").unwrap();
//!
//! let entry = eval.resolve("-o").unwrap();
//! assert_eq!(entry.key(), "OUTPUT_PATH");
//! assert_eq!(entry.identity().to_string(), "-o, --output-path");
//! assert!(eval.resolve("--output").is_none());
//! ```

mod argv;
mod catalog;
mod error;
mod identity;
mod registry;
pub mod standard;

pub use argv::ArgvBuilder;
pub use catalog::{CatalogBuilder, FlagCatalog, FlagEntry};
pub use error::{RegistryError, Result};
pub use identity::FlagIdentity;
pub use registry::{CommandFlags, FlagRef, FlagRegistry, RegistryBuilder};
