//! Go command - render the view behind an address

use super::{Context, HELP_TEXT, favorites, list, show};
use crate::{
    DexError,
    cli::{ListArgs, ViewArgs},
    favorites::KeyValueStore,
    gateway::CatalogGateway,
    route::{Location, Route},
};

type Result<T> = std::result::Result<T, DexError>;

const HOME_TEXT: &str = "\
dexr - creature catalog browser

  /pokedex              browse the catalog (add ?type=<category> to filter)
  /favorites            your favorites
  /pokemon/<id>         detail view of one record
  /help                 interactive commands";

/// Execute the go command
///
/// # Errors
/// Returns `DexError::InvalidInput` for addresses that match no view, or the
/// error of the command rendering the matched view
pub async fn execute<G: CatalogGateway, S: KeyValueStore>(
    ctx: &Context<G, S>,
    location: &str,
) -> Result<()> {
    let location = Location::parse(location);
    let route = location.route();
    tracing::debug!(%location, ?route, "resolved location");

    match route {
        Route::Home => println!("{HOME_TEXT}"),
        Route::Help => println!("{HELP_TEXT}"),
        Route::Catalog { category } => {
            let args = ListArgs {
                view: ViewArgs {
                    category,
                    ..ViewArgs::default()
                },
                ..ListArgs::default()
            };
            list::execute(ctx, &args).await?;
        }
        Route::Favorites => favorites::list(ctx).await?,
        Route::Detail(id) => show::execute(ctx, id, false).await?,
        Route::NotFound(path) => {
            return Err(DexError::InvalidInput(format!("Nothing lives at {path}")));
        }
    }
    Ok(())
}
