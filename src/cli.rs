//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for dexr using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive catalog session (default)
//! - **list**: Print one page of the catalog
//! - **show**: Detail view of a single record
//! - **fav**: Manage favorites (add, remove, toggle, list)
//! - **types**: Known categories with their badges
//! - **go**: Render the view for an address such as `/pokedex?type=fire`
//! - **config**: Show the configuration or its location
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use dexr::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["dexr", "list", "--type", "fire", "--sort", "name-asc"]);
//! match cli.get_command() {
//!     Commands::List(args) => assert_eq!(args.view.category.as_deref(), Some("fire")),
//!     _ => unreachable!(),
//! }
//! ```

use crate::catalog::RecordId;
use crate::config::DexConfig;
use crate::view::{SortKey, ViewParameters};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parse a record id; ids start at 1
///
/// # Errors
///
/// Returns a message if `value` is not a positive integer.
pub fn record_id(value: &str) -> Result<RecordId, String> {
    match value.trim().parse::<RecordId>() {
        Ok(0) => Err("record ids start at 1".to_string()),
        Ok(id) => Ok(id),
        Err(_) => Err(format!("'{value}' is not a record id")),
    }
}

/// Output format for catalog pages
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Colored terminal output
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

/// Creature catalog browser
#[derive(Parser, Debug)]
#[command(name = "dexr", version, about, long_about = None)]
pub struct Cli {
    /// Use this configuration file instead of the default one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Subcommand to run; `browse` when none is given
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Browse(ViewArgs::default()))
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Interactive catalog session
    #[command(visible_alias = "b")]
    Browse(ViewArgs),

    /// Print one page of the catalog
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show the detail view of a record
    #[command(visible_alias = "s")]
    Show {
        /// Record id
        #[arg(value_parser = record_id)]
        id: RecordId,

        /// Open the sprite in the system viewer
        #[arg(long)]
        open_sprite: bool,
    },

    /// Manage favorites
    #[command(subcommand, visible_alias = "f")]
    Fav(FavCommands),

    /// List known categories
    Types,

    /// Render the view for an address, e.g. `/pokedex?type=fire` or `/pokemon/25`
    Go {
        /// Address to resolve
        location: String,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Search, filter, sort and page options shared by `list` and `browse`
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive name search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show records of this category (exact match)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub category: Option<String>,

    /// Sort order (defaults to the configured one)
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Page number
    #[arg(short, long)]
    pub page: Option<usize>,
}

impl ViewArgs {
    /// Initial view parameters for these options
    #[must_use]
    pub fn to_params(&self, config: &DexConfig) -> ViewParameters {
        ViewParameters::with_page_size(config.page_size)
            .search(self.search.clone().unwrap_or_default())
            .category(self.category.clone().filter(|c| !c.is_empty()))
            .sort(self.sort.unwrap_or(config.default_sort))
            .page(self.page.unwrap_or(1).max(1))
    }
}

/// Options of the `list` command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Show records as a grid instead of a list
    #[arg(long)]
    pub grid: bool,
}

/// Favorites subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FavCommands {
    /// Mark a record as favorite
    Add {
        #[arg(value_parser = record_id)]
        id: RecordId,
    },
    /// Unmark a record
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(value_parser = record_id)]
        id: RecordId,
    },
    /// Flip the favorite state of a record
    Toggle {
        #[arg(value_parser = record_id)]
        id: RecordId,
    },
    /// List favorites with their records
    #[command(visible_alias = "ls")]
    List,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
}
