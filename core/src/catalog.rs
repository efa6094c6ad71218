//! Flag catalogs: named, ordered collections of flag identities.
//!
//! A [`FlagCatalog`] maps symbolic keys such as `OUTPUT_PATH` to
//! [`FlagIdentity`] values. The effective flag set of a subcommand is built by
//! [`FlagCatalog::union`], so it is a catalog too and answers the same
//! queries. Every constructor validates eagerly: duplicate keys and shared
//! spellings are rejected before the catalog can be used.
//!
//! # Examples
//!
//! ```
//! use flag_registry_core::{FlagCatalog, RegistryError};
//!
//! let general = FlagCatalog::builder("general")
//!     .flag("OUTPUT_PATH", "--output-path", Some("-o"))
//!     .flag("OMIT_PROJECT_SETTINGS", "--omit-project-settings", None)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(general.resolve("-o").unwrap().key(), "OUTPUT_PATH");
//! assert!(general.resolve("--unknown").is_none());
//!
//! let clash = FlagCatalog::builder("eval")
//!     .flag("FORMAT", "--format", Some("-f"))
//!     .flag("OUTPUT_FORMAT", "--format", Some("-f"))
//!     .build();
//! assert!(matches!(clash, Err(RegistryError::DuplicateFlagSpelling { .. })));
//! ```

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::identity::FlagIdentity;

/// One catalog entry: a symbolic key bound to a flag identity.
///
/// `group` names the catalog the flag was declared in. It is preserved when
/// catalogs are combined, so a subcommand's assembled set still knows which
/// option class owns each flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagEntry {
    key: String,
    group: String,
    #[serde(flatten)]
    identity: FlagIdentity,
}

impl FlagEntry {
    /// Symbolic key, e.g. `WORKING_DIR`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the catalog that declared this flag.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The flag's name surface.
    pub fn identity(&self) -> &FlagIdentity {
        &self.identity
    }
}

/// An immutable, validated collection of flag identities.
///
/// Entries keep declaration order, which only matters for deterministic help
/// output. Key lookup and token resolution are hash lookups.
#[derive(Debug, Clone, Serialize)]
pub struct FlagCatalog {
    name: String,
    #[serde(rename = "flags")]
    entries: Vec<FlagEntry>,
    #[serde(skip)]
    by_key: HashMap<String, usize>,
    #[serde(skip)]
    by_spelling: HashMap<String, usize>,
}

impl FlagCatalog {
    /// Creates a catalog from `(key, identity)` pairs in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateFlagKey`] when a key repeats and
    /// [`RegistryError::DuplicateFlagSpelling`] when two identities share a
    /// spelling.
    pub fn new<K>(
        name: impl Into<String>,
        flags: impl IntoIterator<Item = (K, FlagIdentity)>,
    ) -> Result<Self>
    where
        K: Into<String>,
    {
        let name = name.into();
        let entries = flags
            .into_iter()
            .map(|(key, identity)| FlagEntry {
                key: key.into(),
                group: name.clone(),
                identity,
            })
            .collect();
        Self::from_entries(name, entries)
    }

    /// Returns a [`CatalogBuilder`] for declaring flags inline.
    pub fn builder(name: impl Into<String>) -> CatalogBuilder {
        CatalogBuilder {
            name: name.into(),
            flags: Vec::new(),
            error: None,
        }
    }

    /// Combines several catalogs into one effective flag set.
    ///
    /// Entries appear in the order of `catalogs`, each keeping its original
    /// group. This is where cross-catalog collisions surface.
    ///
    /// # Errors
    ///
    /// Same as [`FlagCatalog::new`]; a collision between two source
    /// catalogs names both keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use flag_registry_core::FlagCatalog;
    ///
    /// let base = FlagCatalog::builder("base")
    ///     .flag("WORKING_DIR", "--working-dir", Some("-w"))
    ///     .build()
    ///     .unwrap();
    /// let project = FlagCatalog::builder("project")
    ///     .flag("PROJECT_DIR", "--project-dir", None)
    ///     .build()
    ///     .unwrap();
    ///
    /// let repl = FlagCatalog::union("repl", [&base, &project]).unwrap();
    /// assert_eq!(repl.len(), 2);
    /// assert_eq!(repl.resolve("--project-dir").unwrap().group(), "project");
    /// ```
    pub fn union<'a>(
        name: impl Into<String>,
        catalogs: impl IntoIterator<Item = &'a FlagCatalog>,
    ) -> Result<Self> {
        let entries = catalogs
            .into_iter()
            .flat_map(|catalog| catalog.entries.iter().cloned())
            .collect();
        Self::from_entries(name.into(), entries)
    }

    /// Builds a catalog holding only `keys` of `source`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFlagKey`] for a key `source` lacks.
    pub fn select(name: impl Into<String>, source: &FlagCatalog, keys: &[&str]) -> Result<Self> {
        let entries = keys
            .iter()
            .map(|key| source.entry(key).cloned())
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(name.into(), entries)
    }

    /// Builds a catalog from already-grouped entries.
    pub(crate) fn from_entries(name: String, entries: Vec<FlagEntry>) -> Result<Self> {
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut by_spelling = HashMap::with_capacity(entries.len() * 2);

        for (index, entry) in entries.iter().enumerate() {
            if by_key.insert(entry.key.clone(), index).is_some() {
                return Err(RegistryError::DuplicateFlagKey {
                    key: entry.key.clone(),
                    catalog: name,
                });
            }
            for spelling in entry.identity.accepted_names() {
                if let Some(&existing) = by_spelling.get(spelling) {
                    let existing: &FlagEntry = &entries[existing];
                    return Err(RegistryError::DuplicateFlagSpelling {
                        spelling: spelling.to_string(),
                        catalog: name,
                        keys: vec![existing.key.clone(), entry.key.clone()],
                    });
                }
                by_spelling.insert(spelling.to_string(), index);
            }
        }

        debug!(catalog = %name, flags = entries.len(), "Built flag catalog");
        Ok(Self {
            name,
            entries,
            by_key,
            by_spelling,
        })
    }

    /// Catalog name, e.g. `base` or `eval`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of flags in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog declares no flags.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is registered.
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Returns the identity registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFlagKey`] if the key was never
    /// registered. That is a wiring defect in the caller.
    pub fn lookup(&self, key: &str) -> Result<&FlagIdentity> {
        self.entry(key).map(FlagEntry::identity)
    }

    /// Returns the full entry registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFlagKey`] if the key was never
    /// registered.
    pub fn entry(&self, key: &str) -> Result<&FlagEntry> {
        self.by_key
            .get(key)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| RegistryError::UnknownFlagKey {
                key: key.to_string(),
                catalog: self.name.clone(),
            })
    }

    /// Iterates over every identity in declaration order.
    ///
    /// The iterator is cloneable, and each call starts a fresh pass.
    pub fn all(&self) -> impl Iterator<Item = &FlagIdentity> + Clone + '_ {
        self.entries.iter().map(FlagEntry::identity)
    }

    /// Iterates over every entry in declaration order.
    pub fn entries(&self) -> std::slice::Iter<'_, FlagEntry> {
        self.entries.iter()
    }

    /// Finds the entry whose identity matches `token` exactly.
    ///
    /// `None` is the ordinary answer for a token this catalog does not own;
    /// callers try other catalogs or treat the token as positional.
    pub fn resolve(&self, token: &str) -> Option<&FlagEntry> {
        self.by_spelling
            .get(token)
            .map(|&index| &self.entries[index])
    }
}

/// Two catalogs are equal when they have the same name and entries.
impl PartialEq for FlagCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.entries == other.entries
    }
}

impl Eq for FlagCatalog {}

impl<'a> IntoIterator for &'a FlagCatalog {
    type Item = &'a FlagEntry;
    type IntoIter = std::slice::Iter<'a, FlagEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Inline builder for a [`FlagCatalog`].
///
/// The first invalid flag definition is remembered and returned from
/// [`build`](CatalogBuilder::build), so a table can be declared as one chain.
#[derive(Debug)]
pub struct CatalogBuilder {
    name: String,
    flags: Vec<(String, FlagIdentity)>,
    error: Option<RegistryError>,
}

impl CatalogBuilder {
    /// Declares a flag under `key`.
    pub fn flag(mut self, key: &str, long: &str, short: Option<&str>) -> Self {
        if self.error.is_none() {
            match FlagIdentity::new(long, short) {
                Ok(identity) => self.flags.push((key.to_string(), identity)),
                Err(err) => self.error = Some(err.declared_as(&self.name, key)),
            }
        }
        self
    }

    /// Validates the declarations and produces the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError::InvalidFlagDefinition`], or any
    /// error from [`FlagCatalog::new`].
    pub fn build(self) -> Result<FlagCatalog> {
        if let Some(err) = self.error {
            return Err(err);
        }
        FlagCatalog::new(self.name, self.flags)
    }
}
