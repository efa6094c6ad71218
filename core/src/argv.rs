//! Building argument lists from flag keys.
//!
//! Wrappers that spawn the CLI refer to flags by symbolic key and let
//! [`ArgvBuilder`] pick the spelling, so a renamed flag only changes the
//! catalog. Long names are always emitted.
//!
//! # Examples
//!
//! ```
//! use flag_registry_core::{ArgvBuilder, FlagRegistry, standard::{commands, keys}};
//!
//! let registry = FlagRegistry::standard().unwrap();
//! let argv = ArgvBuilder::for_command(&registry, commands::PROJECT_PACKAGE)
//!     .unwrap()
//!     .option(keys::OUTPUT_PATH, "/tmp/out")
//!     .flag_if(keys::SKIP_PUBLISH_CHECK, true)
//!     .flag_if(keys::OVERWRITE, false)
//!     .positional("/work/project")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     argv,
//!     ["project", "package", "--output-path", "/tmp/out", "--skip-publish-check", "/work/project"]
//! );
//! ```

use crate::catalog::FlagCatalog;
use crate::error::{RegistryError, Result};
use crate::registry::FlagRegistry;

/// Accumulates arguments for one invocation against a flag set.
///
/// The first unknown key is remembered and returned from
/// [`build`](ArgvBuilder::build).
#[derive(Debug)]
pub struct ArgvBuilder<'a> {
    flags: &'a FlagCatalog,
    args: Vec<String>,
    error: Option<RegistryError>,
}

impl<'a> ArgvBuilder<'a> {
    /// Starts an empty argument list checked against `flags`.
    pub fn new(flags: &'a FlagCatalog) -> Self {
        Self {
            flags,
            args: Vec::new(),
            error: None,
        }
    }

    /// Starts an argument list with the words of `command`, checked against
    /// that command's flag set.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCommand`] if `command` is not
    /// registered.
    pub fn for_command(registry: &'a FlagRegistry, command: &str) -> Result<Self> {
        let mut builder = Self::new(registry.command(command)?);
        builder
            .args
            .extend(command.split_whitespace().map(String::from));
        Ok(builder)
    }

    /// Appends the long name of `key`.
    pub fn flag(mut self, key: &str) -> Self {
        if let Some(long) = self.long_name(key) {
            self.args.push(long);
        }
        self
    }

    /// Appends the long name of `key` when `enabled` is set.
    pub fn flag_if(self, key: &str, enabled: bool) -> Self {
        if enabled { self.flag(key) } else { self }
    }

    /// Appends the long name of `key` followed by `value`.
    pub fn option(mut self, key: &str, value: impl Into<String>) -> Self {
        if let Some(long) = self.long_name(key) {
            self.args.push(long);
            self.args.push(value.into());
        }
        self
    }

    /// Appends `key` and `value` only when a value is present.
    pub fn option_if_some<V: Into<String>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.option(key, value),
            None => self,
        }
    }

    /// Appends a raw argument.
    pub fn positional(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Returns the arguments.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError::UnknownFlagKey`] encountered.
    pub fn build(self) -> Result<Vec<String>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.args),
        }
    }

    fn long_name(&mut self, key: &str) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        match self.flags.lookup(key) {
            Ok(identity) => Some(identity.long_name().to_string()),
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}
