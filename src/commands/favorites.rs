//! Favorites command - add, remove, toggle and list favorites

use super::Context;
use crate::{
    DexError,
    catalog::RecordId,
    cli::FavCommands,
    favorites::KeyValueStore,
    gateway::CatalogGateway,
    loader::load_favorites,
    output,
};
use colored::Colorize;

type Result<T> = std::result::Result<T, DexError>;

/// Execute a favorites subcommand
///
/// # Errors
/// Returns an error if the favorite records cannot be fetched for `fav list`
pub async fn execute<G: CatalogGateway, S: KeyValueStore>(
    ctx: &mut Context<G, S>,
    command: &FavCommands,
) -> Result<()> {
    match command {
        FavCommands::Add { id } => {
            ctx.favorites.add(*id);
            report(ctx, *id);
            Ok(())
        }
        FavCommands::Remove { id } => {
            ctx.favorites.remove(*id);
            report(ctx, *id);
            Ok(())
        }
        FavCommands::Toggle { id } => {
            ctx.favorites.toggle(*id);
            report(ctx, *id);
            Ok(())
        }
        FavCommands::List => list(ctx).await,
    }
}

/// Print the favorite records in favorite order
///
/// # Errors
/// Returns an error if any favorite record cannot be fetched
pub async fn list<G: CatalogGateway, S: KeyValueStore>(ctx: &Context<G, S>) -> Result<()> {
    let favorites = ctx.favorites.snapshot();
    if favorites.is_empty() {
        if !ctx.quiet {
            println!("No favorites yet. Add one with 'dexr fav add <ID>'.");
        }
        return Ok(());
    }

    let records = load_favorites(&ctx.gateway, favorites.as_slice()).await?;
    if !ctx.quiet {
        println!("Favorites ({}):", records.len());
    }
    println!("{}", output::record_list(&records, favorites, ctx.quiet));
    Ok(())
}

/// Status line after a change to the favorite state of `id`
#[must_use]
pub fn status_line(id: RecordId, is_favorite: bool) -> String {
    if is_favorite {
        format!("{} #{id} is a favorite", output::star(true))
    } else {
        format!("{} #{id} is not a favorite", output::star(false))
    }
}

fn report<G: CatalogGateway, S: KeyValueStore>(ctx: &Context<G, S>, id: RecordId) {
    if ctx.quiet {
        return;
    }
    println!("{}", status_line(id, ctx.favorites.contains(id)));
    if ctx.favorites.last_error().is_some() {
        eprintln!("{}", "Favorites could not be saved; the change is kept for this run only.".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DexConfig;
    use crate::favorites::{FAVORITES_KEY, MemoryStore};
    use crate::testing::{FakeGateway, record};

    fn context(stored: &str) -> Context<FakeGateway, MemoryStore> {
        let gateway = FakeGateway::new(vec![
            record(1, "bulbasaur", &["grass", "poison"]),
            record(4, "charmander", &["fire"]),
        ]);
        Context::new(
            DexConfig::default(),
            gateway,
            MemoryStore::with_value(FAVORITES_KEY, stored),
            true,
        )
    }

    #[tokio::test]
    async fn test_add_and_remove_persist() {
        let mut ctx = context("[]");

        execute(&mut ctx, &FavCommands::Add { id: 4 }).await.unwrap();
        assert_eq!(ctx.favorites.storage().raw(FAVORITES_KEY).as_deref(), Some("[4]"));

        execute(&mut ctx, &FavCommands::Remove { id: 4 }).await.unwrap();
        assert_eq!(ctx.favorites.storage().raw(FAVORITES_KEY).as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let mut ctx = context("[1]");

        execute(&mut ctx, &FavCommands::Toggle { id: 4 }).await.unwrap();
        assert!(ctx.favorites.contains(4));
        execute(&mut ctx, &FavCommands::Toggle { id: 4 }).await.unwrap();
        assert!(!ctx.favorites.contains(4));
        assert!(ctx.favorites.contains(1));
    }

    #[tokio::test]
    async fn test_list_fetches_only_favorites() {
        let ctx = context("[4]");
        list(&ctx).await.unwrap();
        assert_eq!(ctx.gateway.record_requests(), 1);
    }

    #[tokio::test]
    async fn test_empty_list_skips_network() {
        let ctx = context("[]");
        list(&ctx).await.unwrap();
        assert_eq!(ctx.gateway.record_requests(), 0);
    }

    #[test]
    fn test_status_line() {
        assert!(status_line(25, true).contains("is a favorite"));
        assert!(status_line(25, false).contains("is not a favorite"));
    }
}
