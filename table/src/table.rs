//! Flag table files: a serializable description of a whole registry.
//!
//! A table lists catalogs with their flags and the command recipes built from
//! them. It can be read from and written to YAML or JSON; the format is
//! picked from the file extension (`.json` is JSON, anything else YAML).
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! catalogs:
//!   - name: base
//!     flags:
//!       - key: WORKING_DIR
//!         long: --working-dir
//!         short: -w
//! commands:
//!   - name: repl
//!     catalogs: [base]
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use flag_registry_core::{CommandFlags, FlagCatalog, FlagIdentity, FlagRegistry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TableError};

/// Version written by [`FlagTable::from_registry`].
pub const TABLE_FORMAT_VERSION: &str = "1.0";

/// One flag declaration inside a [`CatalogDef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDef {
    /// Symbolic key, e.g. `OUTPUT_PATH`.
    pub key: String,
    /// Long spelling, e.g. `--output-path`.
    pub long: String,
    /// Optional short spelling, e.g. `-o`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
}

/// A named catalog and its flags in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub flags: Vec<FlagDef>,
}

/// Top-level flag table document.
///
/// # Examples
///
/// ```
/// use flag_registry_table::FlagTable;
///
/// let yaml = r#"
/// version: "1.0"
/// catalogs:
///   - name: base
///     flags:
///       - { key: WORKING_DIR, long: --working-dir, short: -w }
///       - { key: NO_CACHE, long: --no-cache }
/// commands:
///   - name: repl
///     catalogs: [base]
/// "#;
///
/// let registry = FlagTable::from_yaml(yaml).unwrap().into_registry().unwrap();
/// assert_eq!(registry.resolve("repl", "-w").unwrap().unwrap().key(), "WORKING_DIR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagTable {
    /// Table format version (e.g. `"1.0"`).
    pub version: String,
    #[serde(default)]
    pub catalogs: Vec<CatalogDef>,
    #[serde(default)]
    pub commands: Vec<CommandFlags>,
}

impl FlagTable {
    /// Loads a table from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](TableError::IoError) if the file cannot be read,
    /// or a [`JsonError`](TableError::JsonError) /
    /// [`YamlError`](TableError::YamlError) if decoding fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let table: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        info!(
            path = %path.display(),
            catalogs = table.catalogs.len(),
            commands = table.commands.len(),
            "Loaded flag table"
        );
        Ok(table)
    }

    /// Saves the table as YAML or JSON, depending on the extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](TableError::IoError) if the file cannot be
    /// written, or a serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_yaml::to_writer(&mut writer, self)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), "Saved flag table");
        Ok(())
    }

    /// Parses a table from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`YamlError`](TableError::YamlError) on malformed input.
    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Parses a table from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`](TableError::JsonError) on malformed input.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Describes an existing registry, catalogs and recipes alike.
    pub fn from_registry(registry: &FlagRegistry) -> Self {
        let catalogs = registry
            .catalogs()
            .map(|catalog| CatalogDef {
                name: catalog.name().to_string(),
                flags: catalog
                    .entries()
                    .map(|entry| FlagDef {
                        key: entry.key().to_string(),
                        long: entry.identity().long_name().to_string(),
                        short: entry.identity().short_name().map(String::from),
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: TABLE_FORMAT_VERSION.to_string(),
            catalogs,
            commands: registry.command_recipes().to_vec(),
        }
    }

    /// Builds and validates the registry this table describes.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedVersion`](TableError::UnsupportedVersion) for a
    /// version other than `1.x`, and [`Registry`](TableError::Registry) for
    /// any flag, catalog or command defect.
    pub fn into_registry(self) -> Result<FlagRegistry> {
        if self.version.split('.').next() != Some("1") {
            return Err(TableError::UnsupportedVersion(self.version));
        }

        let mut builder = FlagRegistry::builder();
        for def in self.catalogs {
            let flags = def
                .flags
                .iter()
                .map(|flag| {
                    FlagIdentity::new(&flag.long, flag.short.as_deref())
                        .map(|identity| (flag.key.clone(), identity))
                        .map_err(|err| err.declared_as(&def.name, &flag.key))
                })
                .collect::<flag_registry_core::Result<Vec<_>>>()?;
            builder = builder.catalog(FlagCatalog::new(def.name, flags)?);
        }
        for recipe in self.commands {
            builder = builder.command(recipe);
        }
        Ok(builder.build()?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
