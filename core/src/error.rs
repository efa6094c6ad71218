//! Error types for flag registry construction and lookup.
//!
//! Every variant describes a defect in the static flag tables or in the code
//! that wires catalogs to subcommands. None of them is a user-facing parse
//! error: a token that matches no flag is reported as `None` by the resolve
//! operations instead.

use thiserror::Error;

/// Errors raised while building or querying flag catalogs and registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A flag's own name data is malformed (empty long name, short name equal
    /// to the long name, or a spelling outside the dash conventions).
    ///
    /// `key` and `catalog` are filled in once the identity is declared under a
    /// symbolic key, see [`RegistryError::declared_as`].
    #[error(
        "invalid flag definition {long:?} (short: {short:?}){}: {reason}",
        declaration(.key, .catalog)
    )]
    InvalidFlagDefinition {
        long: String,
        short: Option<String>,
        reason: String,
        key: Option<String>,
        catalog: Option<String>,
    },

    /// Two entries in the same effective flag set share a spelling.
    #[error(
        "duplicate flag spelling {spelling} in {catalog} (keys: {})",
        .keys.join(", ")
    )]
    DuplicateFlagSpelling {
        spelling: String,
        catalog: String,
        keys: Vec<String>,
    },

    /// The same symbolic key was declared twice in one catalog.
    #[error("duplicate flag key {key} in catalog {catalog}")]
    DuplicateFlagKey { key: String, catalog: String },

    /// A symbolic key was requested that the catalog never registered.
    #[error("unknown flag key {key} in catalog {catalog}")]
    UnknownFlagKey { key: String, catalog: String },

    /// A catalog name was requested that the registry never registered.
    #[error("unknown catalog: {0}")]
    UnknownCatalog(String),

    /// A command name was requested that the registry never registered.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Two catalogs registered under the same name.
    #[error("duplicate catalog: {0}")]
    DuplicateCatalog(String),

    /// Two command flag sets registered under the same name.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
}

impl RegistryError {
    /// Attaches the declaring key and catalog to an
    /// [`InvalidFlagDefinition`](RegistryError::InvalidFlagDefinition).
    /// Other variants are returned unchanged.
    pub fn declared_as(self, catalog: &str, flag_key: &str) -> Self {
        match self {
            Self::InvalidFlagDefinition {
                long,
                short,
                reason,
                ..
            } => Self::InvalidFlagDefinition {
                long,
                short,
                reason,
                key: Some(flag_key.to_string()),
                catalog: Some(catalog.to_string()),
            },
            other => other,
        }
    }
}

fn declaration(key: &Option<String>, catalog: &Option<String>) -> String {
    match (key, catalog) {
        (Some(key), Some(catalog)) => format!(" for {key} in catalog {catalog}"),
        (Some(key), None) => format!(" for {key}"),
        _ => String::new(),
    }
}

/// Convenience alias for results with [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
