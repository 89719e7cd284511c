//! Types command - distinct categories in the catalog

use super::Context;
use crate::{
    DexError,
    catalog::CatalogRecord,
    favorites::KeyValueStore,
    gateway::CatalogGateway,
    output,
    view::categories,
};

type Result<T> = std::result::Result<T, DexError>;

/// Execute the types command
///
/// # Errors
/// Returns an error if the catalog cannot be loaded
pub async fn execute<G: CatalogGateway, S: KeyValueStore>(ctx: &Context<G, S>) -> Result<()> {
    let records = ctx.load_catalog().await?;
    let counts = category_counts(&records);

    if counts.is_empty() {
        if !ctx.quiet {
            println!("No categories found.");
        }
        return Ok(());
    }

    if !ctx.quiet {
        println!("Categories:");
    }
    for (category, count) in counts {
        if ctx.quiet {
            println!("{category}");
        } else {
            println!("  {} {count}", output::badge(&category));
        }
    }
    Ok(())
}

/// Categories in first-seen order with the number of records carrying each
#[must_use]
pub fn category_counts(records: &[CatalogRecord]) -> Vec<(String, usize)> {
    categories(records)
        .into_iter()
        .map(|category| {
            let count = records.iter().filter(|r| r.has_category(&category)).count();
            (category, count)
        })
        .collect()
}
