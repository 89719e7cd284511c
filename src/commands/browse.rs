//! Browse command - interactive catalog session
//!
//! The catalog is loaded once. Each prompt line is parsed into a
//! [`BrowseCommand`]; view commands go through [`BrowseSession`], which keeps
//! the [`ViewState`] and the current [`Location`] in step so the `type`
//! parameter always mirrors the category filter.

use super::{Context, HELP_TEXT, show};
use crate::{
    DexError,
    catalog::{CatalogRecord, RecordId},
    cli::{ViewArgs, record_id},
    favorites::{FavoriteSet, KeyValueStore},
    gateway::CatalogGateway,
    output,
    route::Location,
    view::{DerivedView, SortKey, ViewChange, ViewParameters, ViewState},
};
use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};
use std::io;
use std::str::FromStr;

type Result<T> = std::result::Result<T, DexError>;

/// Location the session starts from
const CATALOG_PATH: &str = "/pokedex";

/// One line of input in the interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Name search; empty text clears it
    Search(String),
    /// Category filter; `None` clears it
    Type(Option<String>),
    Sort(SortKey),
    Page(usize),
    Next,
    Previous,
    /// Toggle a favorite
    Fav(RecordId),
    Show(RecordId),
    Help,
    Quit,
}

impl BrowseCommand {
    /// View change carried by this command, if any
    #[must_use]
    pub fn view_change(&self) -> Option<ViewChange> {
        match self {
            Self::Search(text) => Some(ViewChange::Search(text.clone())),
            Self::Type(category) => Some(ViewChange::Category(category.clone())),
            Self::Sort(key) => Some(ViewChange::Sort(*key)),
            Self::Page(page) => Some(ViewChange::Page(*page)),
            Self::Next => Some(ViewChange::NextPage),
            Self::Previous => Some(ViewChange::PreviousPage),
            Self::Fav(_) | Self::Show(_) | Self::Help | Self::Quit => None,
        }
    }
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "type" | "t" => Ok(Self::Type(Some(rest.to_string()).filter(|t| !t.is_empty()))),
            "sort" => rest.parse().map(Self::Sort),
            "page" => rest
                .parse::<usize>()
                .map(Self::Page)
                .map_err(|_| format!("'{rest}' is not a page number")),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Previous),
            "fav" | "f" => record_id(rest).map(Self::Fav),
            "show" => record_id(rest).map(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
        }
    }
}

/// Loaded catalog plus the view the user is looking at
pub struct BrowseSession {
    records: Vec<CatalogRecord>,
    state: ViewState,
    location: Location,
    view: DerivedView,
}

impl BrowseSession {
    /// Start a session on `records` with the given initial parameters
    #[must_use]
    pub fn new(records: Vec<CatalogRecord>, params: ViewParameters) -> Self {
        let mut location = Location::parse(CATALOG_PATH);
        location.set_category(params.category_filter.as_deref().unwrap_or(""));

        let mut state = ViewState::new(params);
        let view = state.refresh(&records);
        Self {
            records,
            state,
            location,
            view,
        }
    }

    /// Apply a view change and return the new page
    pub fn apply(&mut self, change: ViewChange) -> &DerivedView {
        if let ViewChange::Category(category) = &change {
            self.location.set_category(category.as_deref().unwrap_or(""));
        }
        self.view = self.state.apply(change, &self.records);
        &self.view
    }

    #[must_use]
    pub const fn view(&self) -> &DerivedView {
        &self.view
    }

    #[must_use]
    pub const fn params(&self) -> &ViewParameters {
        self.state.params()
    }

    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Render the current page with a header naming the location
    #[must_use]
    pub fn render(&self, favorites: &FavoriteSet) -> String {
        let params = self.params();
        let mut header = format!("{}  sort: {}", self.location, params.sort_key.label());
        if !params.search_text.is_empty() {
            header.push_str(&format!("  search: \"{}\"", params.search_text));
        }

        let body = if self.view.visible.is_empty() {
            "  No records match the current search and filter.".to_string()
        } else {
            output::record_list(&self.view.visible, favorites, false)
        };

        format!(
            "{}\n{body}\n{}",
            header.bold(),
            output::page_footer(params.page_number, self.view.total_pages)
        )
    }
}

/// Execute the browse command
///
/// # Errors
/// Returns an error if the catalog cannot be loaded or the prompt fails
pub async fn execute<G: CatalogGateway, S: KeyValueStore>(
    ctx: &mut Context<G, S>,
    args: &ViewArgs,
) -> Result<()> {
    if !ctx.quiet {
        println!("Loading catalog...");
    }
    let records = ctx.load_catalog().await?;
    let mut session = BrowseSession::new(records, args.to_params(&ctx.config));
    println!("{}", session.render(ctx.favorites.snapshot()));

    let theme = ColorfulTheme::default();
    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt("dexr")
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message.red());
                continue;
            }
        };

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => println!("{HELP_TEXT}"),
            BrowseCommand::Fav(id) => {
                ctx.favorites.toggle(id);
                println!("{}", session.render(ctx.favorites.snapshot()));
            }
            BrowseCommand::Show(id) => {
                if let Err(e) = show::execute(ctx, id, false).await {
                    eprintln!("{}", e.to_string().red());
                }
            }
            other => {
                if let Some(change) = other.view_change() {
                    session.apply(change);
                    println!("{}", session.render(ctx.favorites.snapshot()));
                }
            }
        }
    }
    Ok(())
}
