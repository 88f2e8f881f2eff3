//! tickdb CLI - per-instrument tick store with OHLCV bars.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickdb_lib::{DEFAULT_PRICE_FIELD, StoreConfig};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::import::ImportMode;
use display::OutputArgs;

#[derive(Parser)]
#[command(name = "tickdb")]
#[command(about = "Per-instrument tick store with OHLCV bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Store file. Defaults to ticks.db in the platform data directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Column holding the last-trade price
    #[arg(long, global = true, default_value = DEFAULT_PRICE_FIELD)]
    price_field: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (only log errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl Cli {
    fn store_config(&self) -> StoreConfig {
        let config = self
            .db
            .as_ref()
            .map_or_else(StoreConfig::default, StoreConfig::new);
        config.with_price_field(&self.price_field)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a store by running a schema script (destructive)
    Init {
        /// Schema script. Defaults to the bundled script.
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// List stored instruments
    List,

    /// Print stored ticks
    Show {
        /// Instrument label (e.g., RFX20Mar19, DO.MAR19)
        instrument: String,

        /// Only ticks after this date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the most recent tick
    Last {
        /// Instrument label
        instrument: String,

        /// Print only the last price
        #[arg(long)]
        price: bool,
    },

    /// Store ticks from a JSON array or NDJSON file
    Import {
        /// Instrument label
        instrument: String,

        /// File with one JSON object per tick
        file: PathBuf,

        /// Replace the stored table instead of appending
        #[arg(long, conflicts_with = "single")]
        replace: bool,

        /// Insert ticks one at a time
        #[arg(long)]
        single: bool,
    },

    /// Print OHLCV bars
    Ohlc {
        /// Instrument label
        instrument: String,

        /// Bar period (e.g., 1Min, 5min, 1H, 1D, m1, h4)
        #[arg(short, long, default_value = "1Min")]
        period: String,

        /// Only ticks after this date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// JSON file naming the price, size and time columns per instrument
        #[arg(short, long)]
        columns: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Installs the log subscriber; `RUST_LOG` overrides the flag-derived level.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = cli.store_config();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init { schema } => commands::init::init(config, schema),
        Commands::List => commands::list::list_instruments(config),
        Commands::Show {
            instrument,
            start,
            output,
        } => commands::show::show(config, &instrument, start.as_deref(), &output),
        Commands::Last { instrument, price } => commands::last::last(config, &instrument, price),
        Commands::Import {
            instrument,
            file,
            replace,
            single,
        } => {
            let mode = if replace {
                ImportMode::Replace
            } else if single {
                ImportMode::Single
            } else {
                ImportMode::Append
            };
            commands::import::import(config, &instrument, &file, mode)
        }
        Commands::Ohlc {
            instrument,
            period,
            start,
            columns,
            output,
        } => commands::ohlc::ohlc(
            config,
            &instrument,
            &period,
            start.as_deref(),
            columns.as_deref(),
            &output,
        ),
    }
}
