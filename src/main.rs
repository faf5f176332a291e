//! cbom-explorer: browse Cryptography Bill of Materials inventories
//!
//! Search, filter, sort and paginate the collections of a CBOM document.

use anyhow::{Context, Result};
use cbom_explorer::{
    cli::{self, OptionsRequest, ViewRequest},
    config::{AppConfig, CONFIG_FILE_NAMES},
    model::CollectionKind,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cbom-explorer")]
#[command(author = "Binarly.io")]
#[command(version)]
#[command(about = "Filter, sort and paginate CBOM inventories", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  At least one record matched
    1  No record matched the search and filters
    3  Error occurred

EXAMPLES:
    # Expired certificates, soonest first
    cbom-explorer view inventory.cbom.json --filter status=expired

    # Search every field, second page of 20
    cbom-explorer view inventory.cbom.json --search digicert --page 2 --page-size 20

    # Weakest keys as CSV
    cbom-explorer view inventory.cbom.json --kind keys --sort keySize -O keys.csv

    # Values offered by each filter
    cbom-explorer options inventory.cbom.json --kind assets")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "CBOM_EXPLORER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Path to the CBOM document (JSON or YAML)
    file: PathBuf,

    /// Collection to browse (defaults to the configured kind)
    #[arg(short, long)]
    kind: Option<CollectionKind>,

    /// Browse an arbitrary top-level array as schemaless records
    #[arg(long, conflicts_with = "kind")]
    collection: Option<String>,

    /// Case-insensitive substring search
    #[arg(short, long)]
    search: Option<String>,

    /// Restrict the search to one field ("all" searches every field)
    #[arg(long, requires = "search")]
    search_field: Option<String>,

    /// Equality filter as FIELD=VALUE (repeatable; VALUE "all" clears it)
    #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
    filters: Vec<String>,

    /// Field to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page to show (1-based, clamped to the last page)
    #[arg(short, long)]
    page: Option<usize>,

    /// Records per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Output format (defaults to config, or the output file extension)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Date to compute certificate expiry against (YYYY-MM-DD, default today)
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Exit with 0 even when nothing matches
    #[arg(long)]
    allow_empty: bool,
}

/// Arguments for the `options` subcommand
#[derive(Parser)]
struct OptionsArgs {
    /// Path to the CBOM document (JSON or YAML)
    file: PathBuf,

    /// Collection to inspect (defaults to the configured kind)
    #[arg(short, long)]
    kind: Option<CollectionKind>,

    /// Inspect an arbitrary top-level array as schemaless records
    #[arg(long, conflicts_with = "kind")]
    collection: Option<String>,

    /// Only print the values of this field
    #[arg(long)]
    field: Option<String>,

    /// Print JSON instead of one line per field
    #[arg(long)]
    json: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of a collection
    View(ViewArgs),

    /// List the values each filter can take
    Options(OptionsArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the JSON schema of the configuration file
    ConfigSchema {
        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or create configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// List config file search paths
    Path,
    /// Generate an example .cbom-explorer.yaml in the current directory
    Init,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::View(args) => {
            let overrides = AppConfig::builder()
                .no_color(cli.no_color)
                .quiet(cli.quiet)
                .output_file(args.output_file.clone())
                .reference_date(args.reference_date)
                .build();
            let (mut config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if args.allow_empty {
                config.behavior.fail_on_empty = false;
            }
            if let Some(path) = loaded_from {
                tracing::debug!("Using config from {}", path.display());
            }

            let request = ViewRequest {
                path: args.file,
                kind: args.kind.unwrap_or(config.view.default_kind),
                collection: args.collection,
                search: args.search,
                search_field: args.search_field,
                filters: args.filters,
                sort: args.sort,
                descending: args.desc,
                page: args.page,
                page_size: args.page_size,
                format: args.output,
            };
            cli::run_view(&request, &config)
        }

        Commands::Options(args) => {
            let overrides = AppConfig::builder()
                .quiet(cli.quiet)
                .output_file(args.output_file.clone())
                .build();
            let (config, _) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            let request = OptionsRequest {
                path: args.file,
                kind: args.kind.unwrap_or(config.view.default_kind),
                collection: args.collection,
                field: args.field,
                json: args.json,
            };
            cli::run_options(&request, &config)?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "cbom-explorer", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = cbom_explorer::config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config_action(&action, cli.config.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_config_action(action: &ConfigAction, explicit: Option<&std::path::Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = cbom_explorer::config::load_or_default(explicit);
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            eprintln!("Config file search paths (in order):");
            for path in cbom_explorer::config::search_paths() {
                eprintln!("  {}", path.display());
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match cbom_explorer::config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(CONFIG_FILE_NAMES[0]);
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = cbom_explorer::config::generate_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
