//! The standard flag tables of the configuration-language CLI.
//!
//! Four catalogs group flags by the option class that owns them, and six
//! command recipes combine them into per-subcommand flag sets. Keys are
//! exported as constants in [`keys`] so wiring code never spells them twice.

use crate::catalog::FlagCatalog;
use crate::error::Result;
use crate::registry::{CommandFlags, FlagRegistry};

/// Catalog names.
pub mod catalogs {
    /// Flags of individual CLI commands.
    pub const GENERAL: &str = "general";
    /// Evaluator and runtime options shared by most commands.
    pub const BASE: &str = "base";
    /// Project discovery options.
    pub const PROJECT: &str = "project";
    /// Test report options.
    pub const TEST: &str = "test";
}

/// Command names.
pub mod commands {
    pub const EVAL: &str = "eval";
    pub const TEST: &str = "test";
    pub const REPL: &str = "repl";
    pub const PROJECT_RESOLVE: &str = "project resolve";
    pub const PROJECT_PACKAGE: &str = "project package";
    pub const DOWNLOAD_PACKAGE: &str = "download-package";
}

/// Symbolic keys of the standard flags.
pub mod keys {
    // general
    pub const OUTPUT_PATH: &str = "OUTPUT_PATH";
    pub const MODULE_OUTPUT_SEPARATOR: &str = "MODULE_OUTPUT_SEPARATOR";
    pub const EXPRESSION: &str = "EXPRESSION";
    pub const MULTIPLE_FILE_OUTPUT_PATH: &str = "MULTIPLE_FILE_OUTPUT_PATH";
    pub const SKIP_PUBLISH_CHECK: &str = "SKIP_PUBLISH_CHECK";
    pub const TEST_MODE: &str = "TEST_MODE";
    pub const NO_TRANSITIVE: &str = "NO_TRANSITIVE";

    // base
    pub const ALLOWED_MODULES: &str = "ALLOWED_MODULES";
    pub const ALLOWED_RESOURCES: &str = "ALLOWED_RESOURCES";
    pub const ROOT_DIR: &str = "ROOT_DIR";
    pub const CACHE_DIR: &str = "CACHE_DIR";
    pub const WORKING_DIR: &str = "WORKING_DIR";
    pub const PROPERTY: &str = "PROPERTY";
    pub const COLOR: &str = "COLOR";
    pub const NO_CACHE: &str = "NO_CACHE";
    pub const FORMAT: &str = "FORMAT";
    pub const ENV_VAR: &str = "ENV_VAR";
    pub const MODULE_PATH: &str = "MODULE_PATH";
    pub const SETTINGS: &str = "SETTINGS";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const CA_CERTIFICATES: &str = "CA_CERTIFICATES";
    pub const HTTP_PROXY: &str = "HTTP_PROXY";
    pub const HTTP_NO_PROXY: &str = "HTTP_NO_PROXY";
    pub const EXTERNAL_MODULE_READER: &str = "EXTERNAL_MODULE_READER";
    pub const EXTERNAL_RESOURCE_READER: &str = "EXTERNAL_RESOURCE_READER";
    pub const TEST_PORT: &str = "TEST_PORT";

    // project
    pub const PROJECT_DIR: &str = "PROJECT_DIR";
    pub const OMIT_PROJECT_SETTINGS: &str = "OMIT_PROJECT_SETTINGS";
    pub const NO_PROJECT: &str = "NO_PROJECT";

    // test
    pub const JUNIT_REPORTS: &str = "JUNIT_REPORTS";
    pub const OVERWRITE: &str = "OVERWRITE";
}

/// Flags owned by individual CLI commands.
pub fn general_flags() -> Result<FlagCatalog> {
    use keys::*;

    FlagCatalog::builder(catalogs::GENERAL)
        .flag(OUTPUT_PATH, "--output-path", Some("-o"))
        .flag(MODULE_OUTPUT_SEPARATOR, "--module-output-separator", None)
        .flag(EXPRESSION, "--expression", Some("-x"))
        .flag(MULTIPLE_FILE_OUTPUT_PATH, "--multiple-file-output-path", Some("-m"))
        .flag(SKIP_PUBLISH_CHECK, "--skip-publish-check", None)
        .flag(TEST_MODE, "--test-mode", None)
        .flag(NO_TRANSITIVE, "--no-transitive", None)
        .build()
}

/// Evaluator options shared by every command that evaluates modules.
pub fn base_flags() -> Result<FlagCatalog> {
    use keys::*;

    FlagCatalog::builder(catalogs::BASE)
        .flag(ALLOWED_MODULES, "--allowed-modules", None)
        .flag(ALLOWED_RESOURCES, "--allowed-resources", None)
        .flag(ROOT_DIR, "--root-dir", None)
        .flag(CACHE_DIR, "--cache-dir", None)
        .flag(WORKING_DIR, "--working-dir", Some("-w"))
        .flag(PROPERTY, "--property", Some("-p"))
        .flag(COLOR, "--color", None)
        .flag(NO_CACHE, "--no-cache", None)
        .flag(FORMAT, "--format", Some("-f"))
        .flag(ENV_VAR, "--env-var", Some("-e"))
        .flag(MODULE_PATH, "--module-path", None)
        .flag(SETTINGS, "--settings", None)
        .flag(TIMEOUT, "--timeout", Some("-t"))
        .flag(CA_CERTIFICATES, "--ca-certificates", None)
        .flag(HTTP_PROXY, "--http-proxy", None)
        .flag(HTTP_NO_PROXY, "--http-no-proxy", None)
        .flag(EXTERNAL_MODULE_READER, "--external-module-reader", None)
        .flag(EXTERNAL_RESOURCE_READER, "--external-resource-reader", None)
        .flag(TEST_PORT, "--test-port", None)
        .build()
}

/// Project discovery options.
pub fn project_flags() -> Result<FlagCatalog> {
    use keys::*;

    FlagCatalog::builder(catalogs::PROJECT)
        .flag(PROJECT_DIR, "--project-dir", None)
        .flag(OMIT_PROJECT_SETTINGS, "--omit-project-settings", None)
        .flag(NO_PROJECT, "--no-project", None)
        .build()
}

/// Test report options.
pub fn test_flags() -> Result<FlagCatalog> {
    use keys::*;

    FlagCatalog::builder(catalogs::TEST)
        .flag(JUNIT_REPORTS, "--junit-reports", None)
        .flag(OVERWRITE, "--overwrite", None)
        .build()
}

/// Command recipes over the standard catalogs.
pub fn standard_commands() -> Vec<CommandFlags> {
    use catalogs::{BASE, GENERAL, PROJECT, TEST};

    vec![
        CommandFlags::new(commands::EVAL)
            .with_catalog(GENERAL)
            .with_catalog(BASE)
            .with_catalog(PROJECT),
        CommandFlags::new(commands::TEST)
            .with_catalog(BASE)
            .with_catalog(PROJECT)
            .with_catalog(TEST),
        CommandFlags::new(commands::REPL)
            .with_catalog(BASE)
            .with_catalog(PROJECT),
        CommandFlags::new(commands::PROJECT_RESOLVE).with_catalog(BASE),
        CommandFlags::new(commands::PROJECT_PACKAGE)
            .with_catalog(BASE)
            .with_catalog(TEST)
            .with_flag(GENERAL, keys::OUTPUT_PATH)
            .with_flag(GENERAL, keys::SKIP_PUBLISH_CHECK),
        CommandFlags::new(commands::DOWNLOAD_PACKAGE)
            .with_catalog(BASE)
            .with_flag(GENERAL, keys::NO_TRANSITIVE),
    ]
}

impl FlagRegistry {
    /// Builds the registry of standard catalogs and commands.
    ///
    /// # Errors
    ///
    /// Fails only if the built-in tables are defective.
    ///
    /// # Examples
    ///
    /// ```
    /// use flag_registry_core::{FlagRegistry, standard::{commands, keys}};
    ///
    /// let registry = FlagRegistry::standard().unwrap();
    /// let entry = registry.resolve(commands::EVAL, "-w").unwrap().unwrap();
    /// assert_eq!(entry.key(), keys::WORKING_DIR);
    /// assert_eq!(entry.group(), "base");
    /// ```
    pub fn standard() -> Result<Self> {
        let mut builder = FlagRegistry::builder()
            .catalog(general_flags()?)
            .catalog(base_flags()?)
            .catalog(project_flags()?)
            .catalog(test_flags()?);
        for recipe in standard_commands() {
            builder = builder.command(recipe);
        }
        builder.build()
    }
}
