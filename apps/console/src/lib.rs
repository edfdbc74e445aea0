//! # Dreams Console Library
//!
//! Startup and menus for the Dreams POS console.
//!
//! ## Module Organization
//! ```text
//! dreams_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── File + environment configuration
//! ├── error.rs        ◄─── ConsoleError for everything printed
//! ├── prompt.rs       ◄─── Line prompts over BufRead/Write
//! └── menu/
//!     ├── mod.rs      ◄─── Console and main menu
//!     ├── customers.rs
//!     ├── products.rs
//!     └── sales.rs    ◄─── New sale flow, sales listing, receipts
//! ```

pub mod config;
pub mod error;
pub mod menu;
pub mod prompt;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dreams_store::{seed, Store};

use config::ConsoleConfig;
use error::ConsoleResult;
use menu::Console;

/// Dreams POS console
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "dreams-console", version, about)]
pub struct CliArgs {
    /// Config file (default: the platform config dir)
    #[arg(short, long, env = "DREAMS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with an empty catalog
    #[arg(long)]
    pub no_seed: bool,
}

/// Runs the console on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments (clap exits here on --help or a bad flag)           │
/// │  2. Load config: --config / DREAMS_CONFIG / platform dir, then DREAMS_* │
/// │  3. Initialize tracing (stderr, RUST_LOG over config log_filter)        │
/// │  4. Build the Store with the configured tax rate                        │
/// │  5. Seed demo data unless disabled                                      │
/// │  6. Main menu until exit or end of input                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ConsoleResult<()> {
    let args = CliArgs::parse();
    let config = ConsoleConfig::load(args.config.as_deref())?;
    init_tracing(&config);
    info!(
        store = %config.store_name,
        tax_rate_bps = config.default_tax_rate_bps,
        "Starting Dreams POS console"
    );

    let mut store = Store::with_tax_rate(config.tax_rate()?);
    if config.seed_demo_data && !args.no_seed {
        seed::demo_catalog(&mut store)?;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&mut store, &config, stdin.lock(), stdout.lock()).run()
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=dreams=trace` - Trace for the dreams crates only
/// - Otherwise the configured `log_filter` (default `warn,dreams=info`)
fn init_tracing(config: &ConsoleConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_args() {
        let parsed =
            CliArgs::try_parse_from(["dreams-console", "-c", "/tmp/dreams.toml", "--no-seed"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/dreams.toml")));
        assert!(parsed.no_seed);

        let parsed = CliArgs::try_parse_from(["dreams-console", "--config=/etc/dreams.toml"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("/etc/dreams.toml")));
        assert!(!parsed.no_seed);
    }

    #[test]
    fn test_bad_args() {
        assert!(CliArgs::try_parse_from(["dreams-console", "--config"]).is_err());

        let err = CliArgs::try_parse_from(["dreams-console", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.to_string().contains("--verbose"));

        let err = CliArgs::try_parse_from(["dreams-console", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--no-seed"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
