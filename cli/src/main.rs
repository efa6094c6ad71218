use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use flag_registry_core::{FlagCatalog, FlagRegistry};
use flag_registry_table::FlagTable;
use tracing::{Level, debug};

mod tokens;

use tokens::{TokenClass, classify};

/// Output format for `show` and `resolve`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "flag-registry")]
#[command(about = "Inspect, check and export command-line flag registries")]
struct Cli {
    /// Flag table (YAML or JSON) to use instead of the built-in registry.
    #[arg(long, global = true)]
    table: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalogs and command flag sets.
    Catalogs,
    /// Show the flags of one catalog or command.
    Show(ShowArgs),
    /// Classify argument tokens against a command's flags (pass tokens after `--`).
    Resolve(ResolveArgs),
    /// Build the registry and report whether it is consistent.
    Check,
    /// Write the active registry as a flag table file.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Catalog name (e.g. base).
    #[arg(long, conflicts_with = "command", required_unless_present = "command")]
    catalog: Option<String>,
    /// Command name (e.g. eval, "project package").
    #[arg(long)]
    command: Option<String>,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Command whose flag set is used.
    #[arg(long)]
    command: String,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
    /// Raw argument tokens, given after `--` so that tokens such as
    /// `--format` or `-v` are not taken as options of `resolve` itself.
    #[arg(required = true, allow_hyphen_values = true, trailing_var_arg = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Output path; `.json` writes JSON, anything else YAML.
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_registry(cli.table.as_deref()).and_then(|registry| match cli.command {
        Command::Catalogs => run_catalogs(&registry),
        Command::Show(args) => run_show(&registry, args),
        Command::Resolve(args) => run_resolve(&registry, args),
        Command::Check => run_check(&registry),
        Command::Export(args) => run_export(&registry, args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(table: Option<&Path>) -> Result<FlagRegistry, String> {
    match table {
        Some(path) => {
            debug!(path = %path.display(), "Using flag table");
            FlagTable::load(path)
                .and_then(FlagTable::into_registry)
                .map_err(|e| format!("Failed to load flag table '{}': {e}", path.display()))
        }
        None => FlagRegistry::standard().map_err(|e| format!("Built-in flag tables are invalid: {e}")),
    }
}

fn run_catalogs(registry: &FlagRegistry) -> Result<(), String> {
    println!("Catalogs:");
    for catalog in registry.catalogs() {
        println!("  {:<20} {} flag(s)", catalog.name(), catalog.len());
    }

    println!("Commands:");
    for recipe in registry.command_recipes() {
        let flags = registry.command(&recipe.name).map_err(|e| e.to_string())?;
        let mut parts = recipe.catalogs.clone();
        parts.extend(recipe.flags.iter().map(|f| format!("{}.{}", f.catalog, f.key)));
        println!(
            "  {:<20} {} flag(s): {}",
            recipe.name,
            flags.len(),
            parts.join(", ")
        );
    }
    Ok(())
}

fn run_show(registry: &FlagRegistry, args: ShowArgs) -> Result<(), String> {
    let catalog = match (&args.catalog, &args.command) {
        (Some(name), _) => registry.catalog(name),
        (None, Some(name)) => registry.command(name),
        (None, None) => return Err("Specify --catalog or --command".to_string()),
    }
    .map_err(|e| e.to_string())?;

    match args.format {
        CliOutputFormat::Table => print!("{}", render_table(catalog)),
        CliOutputFormat::Json => {
            let json = serde_json::to_string_pretty(catalog)
                .map_err(|e| format!("Failed to serialize catalog: {e}"))?;
            println!("{json}");
        }
        CliOutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(catalog)
                .map_err(|e| format!("Failed to serialize catalog: {e}"))?;
            print!("{yaml}");
        }
    }
    Ok(())
}

fn render_table(catalog: &FlagCatalog) -> String {
    let width = catalog
        .all()
        .map(|identity| identity.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in catalog {
        out.push_str(&format!(
            "{:<width$}  {:<28} {}\n",
            entry.identity().to_string(),
            entry.key(),
            entry.group()
        ));
    }
    out
}

fn run_resolve(registry: &FlagRegistry, args: ResolveArgs) -> Result<(), String> {
    let flags = registry.command(&args.command).map_err(|e| e.to_string())?;
    let reports = classify(flags, &args.tokens);

    match args.format {
        CliOutputFormat::Table => {
            for report in &reports {
                let description = match &report.class {
                    TokenClass::Flag { key, group, value } => match value {
                        Some(value) => format!("{key} ({group}) = {value}"),
                        None => format!("{key} ({group})"),
                    },
                    TokenClass::UnknownOption => "unknown option".to_string(),
                    TokenClass::Positional => "positional".to_string(),
                    TokenClass::Terminator => "end of options".to_string(),
                };
                println!("{:<30} {description}", report.token);
            }
        }
        CliOutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        CliOutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&reports)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            print!("{yaml}");
        }
    }

    let unknown: Vec<&str> = reports
        .iter()
        .filter(|r| r.class == TokenClass::UnknownOption)
        .map(|r| r.token.as_str())
        .collect();
    if !unknown.is_empty() {
        return Err(format!(
            "{} unknown option(s) for '{}': {}",
            unknown.len(),
            args.command,
            unknown.join(", ")
        ));
    }
    Ok(())
}

fn run_check(registry: &FlagRegistry) -> Result<(), String> {
    let flags: usize = registry.catalogs().map(FlagCatalog::len).sum();
    println!(
        "Flag registry is consistent: {} catalog(s), {} command(s), {flags} flag(s).",
        registry.catalogs().count(),
        registry.commands().count()
    );
    Ok(())
}

fn run_export(registry: &FlagRegistry, args: ExportArgs) -> Result<(), String> {
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    FlagTable::from_registry(registry)
        .save(&args.output)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;

    println!(
        "Exported {} catalog(s) and {} command(s) to '{}'.",
        registry.catalogs().count(),
        registry.commands().count(),
        args.output.display()
    );
    Ok(())
}
