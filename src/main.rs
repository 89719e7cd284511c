//! dexr CLI application entry point
//!
//! This is the main executable for the dexr creature catalog browser. It loads
//! the catalog from a PokeAPI-compatible service and lets you search, filter,
//! sort and page through it, and keep a local list of favorites.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session (default command)
//! dexr
//! dexr browse --type fire
//!
//! # One page of the catalog
//! dexr list --search char --sort name-asc
//! dexr list --type water --page 2 --format json
//!
//! # Detail view
//! dexr show 25
//!
//! # Favorites
//! dexr fav toggle 25
//! dexr fav list
//!
//! # Render the view behind an address
//! dexr go "/pokedex?type=grass"
//!
//! # Debug logging on stderr
//! dexr -v list
//! ```
//!
//! # Configuration
//!
//! Configuration is created with defaults on first run and stored in the
//! user's config directory (`~/.config/dexr/config.toml` on Linux).

use colored::Colorize;
use dexr::{
    DexError,
    cli::{Cli, Commands, ConfigCommands},
    commands::{self, Context, favorites_storage},
    config::DexConfig,
    favorites::KeyValueStore,
    gateway::HttpGateway,
};
use std::path::Path;

type Result<T> = std::result::Result<T, DexError>;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise `-v` raises dexr's own events to debug
/// and `-vv` to trace.
fn setup_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("dexr=warn"),
        1 => EnvFilter::new("dexr=debug,warn"),
        _ => EnvFilter::new("dexr=trace,info"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .init();
}

fn handle_config_command(config: &DexConfig, path: &Path, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let text = toml::to_string_pretty(config)
                .map_err(|e| ::config::ConfigError::Message(format!("Failed to serialize config: {e}")))?;
            print!("{text}");
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}

/// Build the gateway and hydrated favorites for commands that need them
fn open_context(config: DexConfig, quiet: bool) -> Result<Context<HttpGateway, Box<dyn KeyValueStore>>> {
    let gateway = HttpGateway::new(&config.api_base_url)?;
    let storage = favorites_storage(&config, quiet);
    Ok(Context::new(config, gateway, storage, quiet))
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => DexConfig::config_path()?,
    };
    let config = DexConfig::load_from(&config_path)?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let quiet = cli.quiet || config.quiet;

    match cli.get_command() {
        Commands::Config(command) => handle_config_command(&config, &config_path, &command),
        Commands::Browse(args) => commands::browse(&mut open_context(config, quiet)?, &args).await,
        Commands::List(args) => commands::list(&open_context(config, quiet)?, &args).await,
        Commands::Show { id, open_sprite } => {
            commands::show(&open_context(config, quiet)?, id, open_sprite).await
        }
        Commands::Fav(command) => commands::favorites(&mut open_context(config, quiet)?, &command).await,
        Commands::Types => commands::types(&open_context(config, quiet)?).await,
        Commands::Go { location } => commands::go(&open_context(config, quiet)?, &location).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
