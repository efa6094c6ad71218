//! The flag registry: every catalog plus each subcommand's effective flag set.
//!
//! A [`FlagRegistry`] is built once at startup and then passed by reference to
//! whatever needs to resolve flags. [`RegistryBuilder::build`] assembles and
//! validates every command flag set up front, so a registry that exists is
//! free of duplicate spellings and dangling catalog references.
//!
//! # Examples
//!
//! ```
//! use flag_registry_core::{CommandFlags, FlagCatalog, FlagRegistry};
//!
//! let base = FlagCatalog::builder("base")
//!     .flag("WORKING_DIR", "--working-dir", Some("-w"))
//!     .flag("NO_CACHE", "--no-cache", None)
//!     .build()
//!     .unwrap();
//! let general = FlagCatalog::builder("general")
//!     .flag("OUTPUT_PATH", "--output-path", Some("-o"))
//!     .flag("NO_TRANSITIVE", "--no-transitive", None)
//!     .build()
//!     .unwrap();
//!
//! let registry = FlagRegistry::builder()
//!     .catalog(base)
//!     .catalog(general)
//!     .command(CommandFlags::new("download-package").with_catalog("base").with_flag("general", "NO_TRANSITIVE"))
//!     .build()
//!     .unwrap();
//!
//! let entry = registry.resolve("download-package", "--no-transitive").unwrap().unwrap();
//! assert_eq!(entry.group(), "general");
//! assert!(registry.resolve("download-package", "-o").unwrap().is_none());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{FlagCatalog, FlagEntry};
use crate::error::{RegistryError, Result};

/// Recipe for one subcommand's effective flag set.
///
/// Whole catalogs come first, in the order added, followed by individually
/// picked flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandFlags {
    /// Subcommand name, e.g. `eval` or `project package`.
    pub name: String,
    /// Catalogs included wholesale.
    #[serde(default)]
    pub catalogs: Vec<String>,
    /// Single flags picked from other catalogs.
    #[serde(default)]
    pub flags: Vec<FlagRef>,
}

/// Reference to one flag by catalog name and symbolic key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRef {
    pub catalog: String,
    pub key: String,
}

impl CommandFlags {
    /// Starts an empty recipe for `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            catalogs: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Includes every flag of `catalog`.
    pub fn with_catalog(mut self, catalog: &str) -> Self {
        self.catalogs.push(catalog.to_string());
        self
    }

    /// Includes the single flag `key` of `catalog`.
    pub fn with_flag(mut self, catalog: &str, key: &str) -> Self {
        self.flags.push(FlagRef {
            catalog: catalog.to_string(),
            key: key.to_string(),
        });
        self
    }
}

/// Validated set of named catalogs and per-command flag sets.
///
/// All data is owned and immutable, so a registry can be shared across
/// threads without locking.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    catalogs: Vec<FlagCatalog>,
    commands: Vec<FlagCatalog>,
    recipes: Vec<CommandFlags>,
}

impl FlagRegistry {
    /// Returns an empty [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Returns the catalog registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCatalog`] for an unregistered name.
    pub fn catalog(&self, name: &str) -> Result<&FlagCatalog> {
        self.catalogs
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| RegistryError::UnknownCatalog(name.to_string()))
    }

    /// Returns the effective flag set of command `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCommand`] for an unregistered name.
    pub fn command(&self, name: &str) -> Result<&FlagCatalog> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))
    }

    /// Registered catalogs in declaration order.
    pub fn catalogs(&self) -> impl Iterator<Item = &FlagCatalog> + Clone + '_ {
        self.catalogs.iter()
    }

    /// Assembled command flag sets in declaration order.
    pub fn commands(&self) -> impl Iterator<Item = &FlagCatalog> + Clone + '_ {
        self.commands.iter()
    }

    /// The recipes the command flag sets were assembled from.
    pub fn command_recipes(&self) -> &[CommandFlags] {
        &self.recipes
    }

    /// Resolves `token` against the flag set of `command`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCommand`] if `command` is not
    /// registered. An unmatched token is `Ok(None)`.
    pub fn resolve(&self, command: &str, token: &str) -> Result<Option<&FlagEntry>> {
        Ok(self.command(command)?.resolve(token))
    }
}

/// Collects catalogs and command recipes for a [`FlagRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    catalogs: Vec<FlagCatalog>,
    recipes: Vec<CommandFlags>,
}

impl RegistryBuilder {
    /// Registers a catalog.
    pub fn catalog(mut self, catalog: FlagCatalog) -> Self {
        self.catalogs.push(catalog);
        self
    }

    /// Registers a command recipe.
    pub fn command(mut self, recipe: CommandFlags) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Assembles every command flag set and validates the whole registry.
    ///
    /// # Errors
    ///
    /// Returns the first of [`RegistryError::DuplicateCatalog`],
    /// [`RegistryError::DuplicateCommand`], [`RegistryError::UnknownCatalog`],
    /// [`RegistryError::UnknownFlagKey`], or an assembly error from
    /// [`FlagCatalog::union`] semantics.
    pub fn build(self) -> Result<FlagRegistry> {
        let commands = self.assemble_commands()?;

        info!(
            catalogs = self.catalogs.len(),
            commands = commands.len(),
            "Built flag registry"
        );
        Ok(FlagRegistry {
            catalogs: self.catalogs,
            commands,
            recipes: self.recipes,
        })
    }

    fn assemble_commands(&self) -> Result<Vec<FlagCatalog>> {
        let mut seen = HashSet::new();
        for catalog in &self.catalogs {
            if !seen.insert(catalog.name()) {
                return Err(RegistryError::DuplicateCatalog(catalog.name().to_string()));
            }
        }

        let find = |name: &str| {
            self.catalogs
                .iter()
                .find(|c| c.name() == name)
                .ok_or_else(|| RegistryError::UnknownCatalog(name.to_string()))
        };

        let mut seen = HashSet::new();
        let mut commands = Vec::with_capacity(self.recipes.len());
        for recipe in &self.recipes {
            if !seen.insert(recipe.name.as_str()) {
                return Err(RegistryError::DuplicateCommand(recipe.name.clone()));
            }

            let mut entries: Vec<FlagEntry> = Vec::new();
            for name in &recipe.catalogs {
                entries.extend(find(name.as_str())?.entries().cloned());
            }
            for flag in &recipe.flags {
                entries.push(find(flag.catalog.as_str())?.entry(&flag.key)?.clone());
            }
            commands.push(FlagCatalog::from_entries(recipe.name.clone(), entries)?);
        }
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FlagCatalog {
        FlagCatalog::builder("base")
            .flag("WORKING_DIR", "--working-dir", Some("-w"))
            .flag("FORMAT", "--format", Some("-f"))
            .build()
            .unwrap()
    }

    fn project() -> FlagCatalog {
        FlagCatalog::builder("project")
            .flag("PROJECT_DIR", "--project-dir", None)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_and_resolve() {
        let registry = FlagRegistry::builder()
            .catalog(base())
            .catalog(project())
            .command(CommandFlags::new("repl").with_catalog("base").with_catalog("project"))
            .build()
            .unwrap();

        let repl = registry.command("repl").unwrap();
        assert_eq!(repl.len(), 3);
        assert_eq!(
            registry.resolve("repl", "-w").unwrap().unwrap().key(),
            "WORKING_DIR"
        );
        assert!(registry.resolve("repl", "-x").unwrap().is_none());
        assert_eq!(
            registry.resolve("eval", "-w").unwrap_err(),
            RegistryError::UnknownCommand("eval".to_string())
        );
    }

    #[test]
    fn test_picked_flags_follow_whole_catalogs() {
        let registry = FlagRegistry::builder()
            .catalog(base())
            .catalog(project())
            .command(
                CommandFlags::new("resolve")
                    .with_flag("project", "PROJECT_DIR")
                    .with_catalog("base"),
            )
            .build()
            .unwrap();

        let keys: Vec<&str> = registry
            .command("resolve")
            .unwrap()
            .entries()
            .map(FlagEntry::key)
            .collect();
        assert_eq!(keys, vec!["WORKING_DIR", "FORMAT", "PROJECT_DIR"]);
    }

    #[test]
    fn test_collision_between_catalogs_fails_build() {
        let clashing = FlagCatalog::builder("output")
            .flag("OUTPUT_FORMAT", "--format", Some("-f"))
            .build()
            .unwrap();

        let err = FlagRegistry::builder()
            .catalog(base())
            .catalog(clashing)
            .command(CommandFlags::new("eval").with_catalog("base").with_catalog("output"))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateFlagSpelling {
                spelling: "-f".to_string(),
                catalog: "eval".to_string(),
                keys: vec!["FORMAT".to_string(), "OUTPUT_FORMAT".to_string()],
            }
        );
    }

    #[test]
    fn test_collision_names_the_command_being_assembled() {
        let clashing = FlagCatalog::builder("output")
            .flag("OUTPUT_FORMAT", "--format", Some("-f"))
            .build()
            .unwrap();

        let err = FlagRegistry::builder()
            .catalog(base())
            .catalog(clashing)
            .command(CommandFlags::new("eval").with_catalog("base"))
            .command(CommandFlags::new("render").with_catalog("base").with_catalog("output"))
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::DuplicateFlagSpelling { ref catalog, .. } if catalog == "render"
        ));
        assert!(err.to_string().contains("in render"));
    }

    #[test]
    fn test_clashing_catalogs_allowed_when_never_combined() {
        let clashing = FlagCatalog::builder("output")
            .flag("OUTPUT_FORMAT", "--format", Some("-f"))
            .build()
            .unwrap();

        let registry = FlagRegistry::builder()
            .catalog(base())
            .catalog(clashing)
            .command(CommandFlags::new("eval").with_catalog("base"))
            .command(CommandFlags::new("render").with_catalog("output"))
            .build()
            .unwrap();

        assert_eq!(
            registry.resolve("render", "-f").unwrap().unwrap().key(),
            "OUTPUT_FORMAT"
        );
    }

    #[test]
    fn test_wiring_errors() {
        let err = FlagRegistry::builder()
            .catalog(base())
            .catalog(base())
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCatalog("base".to_string()));

        let err = FlagRegistry::builder()
            .catalog(base())
            .command(CommandFlags::new("eval").with_catalog("base"))
            .command(CommandFlags::new("eval").with_catalog("base"))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCommand("eval".to_string()));

        let err = FlagRegistry::builder()
            .catalog(base())
            .command(CommandFlags::new("eval").with_catalog("missing"))
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::UnknownCatalog("missing".to_string()));

        let err = FlagRegistry::builder()
            .catalog(base())
            .command(CommandFlags::new("eval").with_flag("base", "TIMEOUT"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownFlagKey {
                key: "TIMEOUT".to_string(),
                catalog: "base".to_string(),
            }
        );
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlagRegistry>();

        let registry = FlagRegistry::builder()
            .catalog(base())
            .command(CommandFlags::new("eval").with_catalog("base"))
            .build()
            .unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| registry.resolve("eval", "-f").unwrap().map(FlagEntry::key)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), Some("FORMAT"));
            }
        });
    }
}
