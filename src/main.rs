//! multisource: multisourcing decision engine
//!
//! Samples part orders from a parts table and ranks vendors on each order by
//! a weighted blend of price, shipping speed, trust and returnability.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use multisource::{
    cli,
    config::{AppConfig, ConfigOverrides, PreviewConfig, ScoreConfig, CONFIG_FILE_NAMES},
    pipeline::{exit_code_for, exit_codes},
    reports::ReportFormat,
    scoring::RawParameters,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "multisource")]
#[command(version)]
#[command(about = "Multisourcing decision engine: weighted vendor scoring for sampled part orders", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Invalid input (run parameters, table columns or configuration)
    3  Error occurred

EXAMPLES:
    # Score 20 sampled orders with the suggested weights
    multisource score parts.csv --orders 20

    # Favour price, export both tables as CSV
    multisource score parts.csv --orders 50 --cost 70 --shipping 20 --returnability 5 --trust 5 -o csv

    # Check what the upload looks like after normalization
    multisource preview parts.csv --rows 10")]
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
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Input and output options shared by the table commands
#[derive(clap::Args)]
struct TableArgs {
    /// Path to the parts table
    input: PathBuf,

    /// Output format (auto detects TTY: tui if interactive, table otherwise)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Field delimiter of the parts table
    #[arg(long)]
    delimiter: Option<char>,

    /// Active vendors, comma separated (their price column names)
    #[arg(long, value_delimiter = ',')]
    vendors: Option<Vec<String>>,

    /// Identifier column name
    #[arg(long)]
    id_column: Option<String>,

    /// Title column name
    #[arg(long)]
    title_column: Option<String>,

    /// Popularity weight column name
    #[arg(long)]
    weight_column: Option<String>,
}

impl TableArgs {
    fn overrides(&self, no_color: bool) -> ConfigOverrides {
        ConfigOverrides {
            vendors: self.vendors.clone(),
            delimiter: self.delimiter,
            id_column: self.id_column.clone(),
            title_column: self.title_column.clone(),
            weight_column: self.weight_column.clone(),
            format: self.output,
            output_file: self.output_file.clone(),
            no_color,
            ..ConfigOverrides::default()
        }
    }
}

/// Arguments for the `score` subcommand
///
/// Run parameters are read as text and validated together so every problem
/// is reported at once.
#[derive(Parser)]
struct ScoreArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Number of orders to sample
    #[arg(long, allow_hyphen_values = true)]
    orders: Option<String>,

    /// Random seed
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    seed: String,

    /// Cost weight
    #[arg(long, default_value = "45", allow_hyphen_values = true)]
    cost: String,

    /// Shipping weight
    #[arg(long, default_value = "40", allow_hyphen_values = true)]
    shipping: String,

    /// Returnability weight
    #[arg(long, default_value = "5", allow_hyphen_values = true)]
    returnability: String,

    /// Trust weight
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    trust: String,

    /// Shipping score for same-day delivery
    #[arg(long, default_value = "100", allow_hyphen_values = true)]
    same_day: String,

    /// Shipping score for 1-day delivery
    #[arg(long = "day-1", default_value = "75", allow_hyphen_values = true)]
    day_1: String,

    /// Shipping score for 2-day delivery
    #[arg(long = "day-2", default_value = "50", allow_hyphen_values = true)]
    day_2: String,

    /// Shipping score for 3-day delivery
    #[arg(long = "day-3", default_value = "25", allow_hyphen_values = true)]
    day_3: String,

    /// Shipping score for 4 or more days
    #[arg(long = "day-4", default_value = "0", allow_hyphen_values = true)]
    day_4: String,

    /// Largest accepted number of orders (overrides the configured maximum)
    #[arg(long)]
    max_orders: Option<usize>,

    /// Show cost, shipping, trust and returnability per vendor under the table
    #[arg(long)]
    breakdown: bool,
}

impl ScoreArgs {
    fn parameters(&self) -> RawParameters {
        RawParameters {
            orders: self.orders.clone(),
            seed: Some(self.seed.clone()),
            cost_weight: Some(self.cost.clone()),
            shipping_weight: Some(self.shipping.clone()),
            returnability_weight: Some(self.returnability.clone()),
            trust_weight: Some(self.trust.clone()),
            same_day: Some(self.same_day.clone()),
            day_1: Some(self.day_1.clone()),
            day_2: Some(self.day_2.clone()),
            day_3: Some(self.day_3.clone()),
            day_4: Some(self.day_4.clone()),
        }
    }
}

/// Arguments for the `preview` subcommand
#[derive(Parser)]
struct PreviewArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Number of rows to show
    #[arg(long, default_value_t = 5)]
    rows: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample orders from a parts table and score every active vendor
    Score(ScoreArgs),

    /// Show the first rows of a parts table after normalization
    Preview(PreviewArgs),

    /// List the vendor catalog and the active vendors
    Vendors {
        /// Active vendors, comma separated
        #[arg(long, value_delimiter = ',')]
        vendors: Option<Vec<String>>,

        /// Output format (table or json)
        #[arg(short, long)]
        output: Option<ReportFormat>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example multisource.yaml in the current directory
    Init,
}

fn main() {
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

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code_for(&err)
        }
    };
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}

fn load_config(path: Option<&std::path::Path>, overrides: &ConfigOverrides) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(path, overrides)
        .context("failed to load configuration")?;
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Score(args) => {
            let mut overrides = args.table.overrides(cli.no_color);
            overrides.max_orders = args.max_orders;
            overrides.breakdown = args.breakdown;
            let app = load_config(cli.config.as_deref(), &overrides)?;

            cli::run_score(ScoreConfig {
                input: args.table.input.clone(),
                parameters: args.parameters(),
                app,
                quiet: cli.quiet,
            })
        }

        Commands::Preview(args) => {
            let app = load_config(cli.config.as_deref(), &args.table.overrides(cli.no_color))?;
            cli::run_preview(PreviewConfig {
                input: args.table.input,
                rows: args.rows,
                app,
            })
        }

        Commands::Vendors { vendors, output } => {
            let overrides = ConfigOverrides {
                vendors,
                format: output,
                no_color: cli.no_color,
                ..ConfigOverrides::default()
            };
            let app = load_config(cli.config.as_deref(), &overrides)?;
            cli::run_vendors(&app)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "multisource", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = multisource::config::generate_json_schema();
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

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    multisource::config::load_or_default(cli.config.as_deref())
                        .context("failed to load configuration")?;
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for path in multisource::config::search_paths() {
                    eprintln!("  {}", path.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match multisource::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
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
                let content = multisource::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
