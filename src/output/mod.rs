//! Output formatting for CLI display
//!
//! This module turns catalog records, pages and details into terminal text,
//! including category badges, favorite stars and stat bars, plus the JSON and
//! CSV renditions of a page.

use crate::catalog::{CatalogDetail, CatalogRecord, Stat};
use crate::favorites::FavoriteSet;
use crate::view::DerivedView;
use colored::{ColoredString, Colorize};
use heck::ToTitleCase;

/// Stat value that fills a whole bar
pub const STAT_BAR_SCALE: u32 = 150;

/// Badge style for one category: name, RGB color and icon
pub struct CategoryStyle {
    pub name: &'static str,
    pub color: u32,
    pub icon: &'static str,
}

/// Known categories in filter-menu order
pub const CATEGORY_STYLES: &[CategoryStyle] = &[
    CategoryStyle { name: "fire", color: 0xF0_80_30, icon: "🔥" },
    CategoryStyle { name: "water", color: 0x68_90_F0, icon: "💧" },
    CategoryStyle { name: "grass", color: 0x78_C8_50, icon: "🍃" },
    CategoryStyle { name: "normal", color: 0xA8_A8_78, icon: "⚪" },
    CategoryStyle { name: "electric", color: 0xF8_D0_30, icon: "⚡" },
    CategoryStyle { name: "ice", color: 0x98_D8_D8, icon: "❄️" },
    CategoryStyle { name: "fighting", color: 0xC0_30_28, icon: "🥊" },
    CategoryStyle { name: "poison", color: 0xA0_40_A0, icon: "☠️" },
    CategoryStyle { name: "ground", color: 0xE0_C0_68, icon: "🟤" },
    CategoryStyle { name: "flying", color: 0xA8_90_F0, icon: "🕊️" },
    CategoryStyle { name: "psychic", color: 0xF8_58_88, icon: "🔮" },
    CategoryStyle { name: "bug", color: 0xA8_B8_20, icon: "🐛" },
    CategoryStyle { name: "rock", color: 0xB8_A0_38, icon: "🪨" },
    CategoryStyle { name: "ghost", color: 0x70_58_98, icon: "👻" },
    CategoryStyle { name: "dragon", color: 0x70_38_F8, icon: "🐉" },
    CategoryStyle { name: "dark", color: 0x70_58_48, icon: "🌙" },
    CategoryStyle { name: "steel", color: 0xB8_B8_D0, icon: "⚙️" },
    CategoryStyle { name: "fairy", color: 0xEE_99_AC, icon: "✨" },
];

const UNKNOWN_COLOR: u32 = 0xAA_AA_AA;
const UNKNOWN_ICON: &str = "?";

fn style_for(category: &str) -> Option<&'static CategoryStyle> {
    CATEGORY_STYLES.iter().find(|style| style.name == category)
}

/// RGB color of a category; grey for unknown categories
#[must_use]
pub fn category_color(category: &str) -> (u8, u8, u8) {
    let color = style_for(category).map_or(UNKNOWN_COLOR, |style| style.color);
    let [_, r, g, b] = color.to_be_bytes();
    (r, g, b)
}

/// Icon of a category; `?` for unknown categories
#[must_use]
pub fn category_icon(category: &str) -> &'static str {
    style_for(category).map_or(UNKNOWN_ICON, |style| style.icon)
}

/// Plain badge text, e.g. `🔥 Fire`
#[must_use]
pub fn badge_text(category: &str) -> String {
    format!("{} {}", category_icon(category), category.to_title_case())
}

/// Colored badge for terminal display
#[must_use]
pub fn badge(category: &str) -> ColoredString {
    let (r, g, b) = category_color(category);
    format!(" {} ", badge_text(category)).white().on_truecolor(r, g, b)
}

/// Favorite marker
#[must_use]
pub const fn star(is_favorite: bool) -> &'static str {
    if is_favorite { "⭐" } else { "☆" }
}

/// Format a record as one list line
#[must_use]
pub fn record_line(record: &CatalogRecord, is_favorite: bool, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", record.id, record.name);
    }

    let badges: Vec<String> = record.categories.iter().map(|c| badge(c).to_string()).collect();
    format!(
        "  {} {} #{} {}",
        star(is_favorite),
        record.name.to_uppercase().bold(),
        record.id,
        badges.join(" ")
    )
}

/// Format a page of records as a list
#[must_use]
pub fn record_list(records: &[CatalogRecord], favorites: &FavoriteSet, quiet: bool) -> String {
    records
        .iter()
        .map(|record| record_line(record, favorites.contains(record.id), quiet))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a page of records as a grid of fixed-width cells
#[must_use]
pub fn record_grid(records: &[CatalogRecord], favorites: &FavoriteSet, columns: usize) -> String {
    records
        .chunks(columns.max(1))
        .map(|row| {
            row.iter()
                .map(|record| {
                    let icon = record.categories.first().map_or(UNKNOWN_ICON, |c| category_icon(c));
                    let cell = format!(
                        "{} {} #{} {}",
                        star(favorites.contains(record.id)),
                        icon,
                        record.id,
                        record.name.to_uppercase()
                    );
                    format!("{cell:<28}")
                })
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pagination footer, e.g. `◀ Page 2 of 3 ▶`
#[must_use]
pub fn page_footer(page: usize, total_pages: usize) -> String {
    let previous = if page > 1 { "◀" } else { " " };
    let next = if page < total_pages { "▶" } else { " " };
    format!("{previous} Page {page} of {total_pages} {next}")
}

/// Horizontal bar for a stat, `width` cells at [`STAT_BAR_SCALE`]
#[must_use]
pub fn stat_bar(stat: &Stat, width: usize) -> String {
    let filled = (u32::from(stat.value) * width as u32 / STAT_BAR_SCALE).min(width as u32) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format the detail view of one record
#[must_use]
pub fn detail(detail: &CatalogDetail, is_favorite: bool) -> String {
    let record = &detail.record;
    let mut lines = vec![
        format!("#{} - {}", record.id, record.name.to_uppercase()).bold().to_string(),
        format!("Sprite: {}", record.sprite_url),
        String::new(),
        "Type(s):".bold().to_string(),
        format!(
            "  {}",
            record.categories.iter().map(|c| badge(c).to_string()).collect::<Vec<_>>().join(" ")
        ),
        String::new(),
        "Stats:".bold().to_string(),
    ];

    for stat in &detail.stats {
        lines.push(format!(
            "  {:<16} {} {}",
            stat.stat_name.to_uppercase(),
            stat_bar(stat, 20).green(),
            stat.value
        ));
    }

    lines.push(String::new());
    lines.push("Abilities:".bold().to_string());
    for ability in &detail.abilities {
        lines.push(format!("  {}", ability.name.to_uppercase().bold()));
        lines.push(format!("    {}", ability.description.replace('\n', " ")));
    }

    lines.push(String::new());
    lines.push(if is_favorite {
        format!("{} Favorite", star(true))
    } else {
        format!("{} Not a favorite", star(false))
    });

    lines.join("\n")
}

/// Serialize a derived view as pretty JSON
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn view_json(view: &DerivedView, page: usize) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "page": page,
        "total_pages": view.total_pages,
        "total_matches": view.total_matches,
        "records": view.visible,
    }))
}

/// Serialize records as CSV with a header row
///
/// Categories are joined with `;` in a single column.
///
/// # Errors
///
/// Returns `csv::Error` if writing fails.
pub fn records_csv(records: &[CatalogRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "name", "sprite_url", "categories"])?;
    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.name.clone(),
            record.sprite_url.clone(),
            record.categories.join(";"),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
