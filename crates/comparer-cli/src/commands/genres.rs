use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use media_catalog_core::{CatalogSession, SortKey};
use serde_json::json;

use super::load_context;

pub async fn run_genres(output: &Output) -> Result<()> {
    let ctx = load_context()?;
    let mut session = CatalogSession::new(ctx.config.catalog.page_size, SortKey::default());

    ctx.loader
        .load_genres(&mut session)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load genres: {}", e))?;

    if !output.is_human() {
        output.json(&json!({ "genres": session.genre_catalog() }));
        return Ok(());
    }

    if session.genre_catalog().is_empty() {
        output.info("The TV source returned no genres.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Genre").add_attribute(Attribute::Bold),
    ]);
    for genre in session.genre_catalog() {
        let id = genre.id.map(|id| id.to_string()).unwrap_or_default();
        table.add_row(vec![Cell::new(id), Cell::new(&genre.name)]);
    }
    output.println(table.to_string());
    output.println(format!("{} genres. Filter with: media-comparer browse --genre NAME", session.genre_catalog().len()));

    Ok(())
}
