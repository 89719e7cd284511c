//! Show command - detail view of a single record

use super::Context;
use crate::{
    DexError,
    catalog::{CatalogDetail, RecordId},
    favorites::KeyValueStore,
    gateway::{CatalogGateway, GatewayError},
    loader::load_detail,
    output,
};

type Result<T> = std::result::Result<T, DexError>;

/// Execute the show command
///
/// # Errors
/// Returns `DexError::RecordNotFound` for unknown ids, or an error if the
/// detail cannot be fetched or the sprite cannot be opened
pub async fn execute<G: CatalogGateway, S: KeyValueStore>(
    ctx: &Context<G, S>,
    id: RecordId,
    open_sprite: bool,
) -> Result<()> {
    let detail = fetch(&ctx.gateway, id).await?;
    println!("{}", output::detail(&detail, ctx.favorites.contains(id)));

    if open_sprite {
        tracing::debug!(url = %detail.record.sprite_url, "opening sprite");
        open::that(&detail.record.sprite_url)?;
    }
    Ok(())
}

/// Fetch a detail, reporting a missing record by id
///
/// # Errors
/// Returns `DexError::RecordNotFound` for unknown ids and `DexError::GatewayError` otherwise
pub async fn fetch<G: CatalogGateway + ?Sized>(gateway: &G, id: RecordId) -> Result<CatalogDetail> {
    load_detail(gateway, id).await.map_err(|e| match e {
        GatewayError::NotFound(_) => DexError::RecordNotFound(id),
        other => DexError::GatewayError(other),
    })
}
