//! List command - print one page of the catalog

use super::Context;
use crate::{
    DexError,
    cli::{ListArgs, OutputFormat},
    favorites::{FavoriteSet, KeyValueStore},
    gateway::CatalogGateway,
    output,
    view::{DerivedView, ViewState},
};

type Result<T> = std::result::Result<T, DexError>;

/// Grid width in cells
const GRID_COLUMNS: usize = 3;

/// Execute the list command
///
/// # Errors
/// Returns an error if the catalog cannot be loaded or the page cannot be serialized
pub async fn execute<G: CatalogGateway, S: KeyValueStore>(
    ctx: &Context<G, S>,
    args: &ListArgs,
) -> Result<()> {
    let records = ctx.load_catalog().await?;

    let mut state = ViewState::new(args.view.to_params(&ctx.config));
    let view = state.refresh(&records);
    let page = state.params().page_number;

    let text = render(&view, page, ctx.favorites.snapshot(), args, ctx.quiet)?;
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

/// Render a derived page in the requested format
///
/// # Errors
/// Returns an error if JSON or CSV serialization fails
pub fn render(
    view: &DerivedView,
    page: usize,
    favorites: &FavoriteSet,
    args: &ListArgs,
    quiet: bool,
) -> Result<String> {
    match args.format {
        OutputFormat::Json => Ok(output::view_json(view, page)?),
        OutputFormat::Csv => Ok(output::records_csv(&view.visible)?),
        OutputFormat::Text => Ok(render_text(view, page, favorites, args.grid, quiet)),
    }
}

fn render_text(
    view: &DerivedView,
    page: usize,
    favorites: &FavoriteSet,
    grid: bool,
    quiet: bool,
) -> String {
    if view.visible.is_empty() {
        return if quiet {
            String::new()
        } else {
            "No records match the current search and filter.".to_string()
        };
    }

    let body = if grid && !quiet {
        output::record_grid(&view.visible, favorites, GRID_COLUMNS)
    } else {
        output::record_list(&view.visible, favorites, quiet)
    };

    if quiet {
        return body;
    }

    format!(
        "{body}\n\n{}  ({} matches)",
        output::page_footer(page, view.total_pages),
        view.total_matches
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::numbered_records;
    use crate::view::{ViewParameters, derive};

    fn args(format: OutputFormat) -> ListArgs {
        ListArgs {
            format,
            ..ListArgs::default()
        }
    }

    #[test]
    fn test_text_page_has_footer() {
        colored::control::set_override(false);
        let records = numbered_records(25);
        let view = derive(&records, &ViewParameters::default());

        let text = render(&view, 1, &FavoriteSet::new(), &args(OutputFormat::Text), false).unwrap();
        assert!(text.contains("CREATURE-001"));
        assert!(text.contains("Page 1 of 2"));
        assert!(text.contains("(25 matches)"));
    }

    #[test]
    fn test_quiet_page_is_plain() {
        let records = numbered_records(3);
        let view = derive(&records, &ViewParameters::default());

        let text = render(&view, 1, &FavoriteSet::new(), &args(OutputFormat::Text), true).unwrap();
        assert_eq!(text, "1\tcreature-001\n2\tcreature-002\n3\tcreature-003");
    }

    #[test]
    fn test_empty_page_message() {
        let view = derive(&numbered_records(3), &ViewParameters::default().search("zzz"));

        let text = render(&view, 1, &FavoriteSet::new(), &args(OutputFormat::Text), false).unwrap();
        assert!(text.starts_with("No records match"));
        let quiet = render(&view, 1, &FavoriteSet::new(), &args(OutputFormat::Text), true).unwrap();
        assert!(quiet.is_empty());
    }

    #[test]
    fn test_csv_format() {
        let view = derive(&numbered_records(2), &ViewParameters::default());
        let text = render(&view, 1, &FavoriteSet::new(), &args(OutputFormat::Csv), false).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
