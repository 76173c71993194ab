use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use media_catalog_core::{
    result_count_line, CatalogSession, Comparison, RejectReason, SortKey, ToggleOutcome, TypeFilter, MAX_SELECTED,
};
use media_catalog_models::{Genre, MediaItem, MediaKey};
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::{debug, warn};

use super::compare::print_comparison;
use super::{load_context, AppContext};

pub struct BrowseArgs {
    pub type_filter: TypeFilter,
    pub search: Option<String>,
    pub genres: Vec<String>,
    pub sort: Option<SortKey>,
    pub page: u32,
    pub select: Vec<MediaKey>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub server_search: bool,
    pub load_comparison: bool,
}

pub async fn run_browse(args: BrowseArgs, output: &Output) -> Result<()> {
    if let (Some(min), Some(max)) = (args.year_min, args.year_max) {
        if min > max {
            return Err(color_eyre::eyre::eyre!("--year-min {} is after --year-max {}", min, max));
        }
    }

    let ctx = load_context()?;
    let sort = args.sort.unwrap_or_else(|| SortKey::from(ctx.config.catalog.default_sort));
    let mut session = CatalogSession::new(ctx.config.catalog.page_size, sort);

    session.set_type_filter(args.type_filter);
    if !args.genres.is_empty() {
        if let Err(e) = ctx.loader.load_genres(&mut session).await {
            warn!(error = %e, "Genre catalog unavailable");
            output.warn("Could not load the genre catalog");
        }
        for name in &args.genres {
            let genre = match session.find_genre(name) {
                Some(genre) => genre.clone(),
                None => {
                    output.warn(unmatched_genre_warning(name, args.type_filter));
                    Genre::named(name.trim())
                }
            };
            session.toggle_genre(genre);
        }
    }
    if let Some(search) = &args.search {
        session.set_search(search.as_str());
    }
    session.set_server_search(args.server_search);
    session.set_year_range(args.year_min, args.year_max);
    session.set_page(args.page);

    ctx.loader.refresh(&mut session).await;

    let mut selection_notes = Vec::new();
    for key in &args.select {
        selection_notes.push(apply_selection(&mut session, key));
    }

    let comparison = if args.load_comparison {
        load_selected_comparison(&ctx, &session, output).await
    } else {
        None
    };

    let visible = session.visible_items();
    let pagination = session.pagination();
    if args.page > pagination.total_pages {
        output.warn(format!(
            "Page {} is past the last page ({})",
            args.page, pagination.total_pages
        ));
    }

    if !output.is_human() {
        let cards: Vec<_> = visible
            .iter()
            .map(|item| {
                let card = session.card_state(item);
                json!({ "key": item.key().to_string(), "selected": card.selected, "dimmed": card.dimmed })
            })
            .collect();
        let selection = session.selection();
        output.json(&json!({
            "query": session.query(),
            "items": visible,
            "cards": cards,
            "errors": session.errors(),
            "pagination": pagination,
            "selection": {
                "state": selection.state(),
                "compare_type": selection.compare_type(),
                "selected": selection.selected().iter().map(|i| i.key().to_string()).collect::<Vec<_>>(),
                "target": session.confirm_compare().ok().map(|t| t.route()),
            },
            "notes": selection_notes,
            "comparison": comparison,
        }));
        return Ok(());
    }

    for message in session.errors() {
        output.error(message);
    }

    if visible.is_empty() {
        output.info("No titles match the current filters.");
    } else {
        output.println(render_table(&session, &visible).to_string());
    }

    output.println(result_count_line(visible.len(), session.all_items().len()));
    if pagination.has_multiple_pages() {
        output.println(pagination.describe());
    }

    for note in &selection_notes {
        output.warn(note);
    }
    print_selection(&session, output);
    if let Some(comparison) = &comparison {
        print_comparison(comparison, output);
    }

    Ok(())
}

async fn load_selected_comparison(ctx: &AppContext, session: &CatalogSession, output: &Output) -> Option<Comparison> {
    let target = match session.confirm_compare() {
        Ok(target) => target,
        Err(e) => {
            output.warn(format!("Nothing to compare: {}", e));
            return None;
        }
    };

    match ctx.loader.load_target(&target).await {
        Ok(comparison) => Some(comparison),
        Err(e) => {
            warn!(route = %target.route(), error = %e, "Comparison failed");
            output.error(format!("Failed to load comparison: {}", e));
            None
        }
    }
}

/// Only catalog genres carry the ids the TV source filters on, and TV list
/// records carry no genres for the client-side filter to check.
fn unmatched_genre_warning(name: &str, type_filter: TypeFilter) -> String {
    let name = name.trim();
    if type_filter.includes_tv() {
        format!(
            "Genre '{}' is not in the genre catalog: movies are matched by name, TV shows are not filtered by it",
            name
        )
    } else {
        format!("Genre '{}' is not in the genre catalog; matching movies by name", name)
    }
}

fn apply_selection(session: &mut CatalogSession, key: &MediaKey) -> String {
    let Some(item) = session.all_items().into_iter().find(|item| item.key() == *key) else {
        return format!("{} is not on this page", key);
    };

    match session.toggle_compare(&item) {
        ToggleOutcome::Selected => {
            debug!(%key, "Selected for comparison");
            format!("Selected {} for comparison", item.title())
        }
        ToggleOutcome::Deselected => format!("Deselected {}", item.title()),
        ToggleOutcome::Rejected(RejectReason::TypeMismatch { locked, offered }) => format!(
            "Cannot select {}: comparing {} titles, not {}",
            key,
            locked.label(),
            offered.label()
        ),
        ToggleOutcome::Rejected(RejectReason::SelectionFull) => {
            format!("Cannot select {}: at most {} titles can be compared", key, MAX_SELECTED)
        }
    }
}

fn render_table(session: &CatalogSession, items: &[MediaItem]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new(""),
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Genres").add_attribute(Attribute::Bold),
        Cell::new("Details").add_attribute(Attribute::Bold),
    ]);

    for item in items {
        let card = session.card_state(item);
        let genres = item.genres().iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ");
        let rating = if item.rating() > 0.0 {
            format!("{:.1}", item.rating())
        } else {
            "—".to_string()
        };
        let cells = vec![
            if card.selected { "●" } else { "" }.to_string(),
            item.key().to_string(),
            item.title().to_string(),
            item.year().map_or_else(|| "—".to_string(), |y| y.to_string()),
            rating,
            genres,
            item.metadata_line(),
        ];

        let row: Vec<Cell> = cells
            .into_iter()
            .map(|text| {
                let cell = Cell::new(text);
                if card.selected {
                    cell.fg(Color::Green)
                } else if card.dimmed {
                    cell.fg(Color::DarkGrey)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(row);
    }
    table
}

fn print_selection(session: &CatalogSession, output: &Output) {
    let selection = session.selection();
    if selection.is_empty() {
        return;
    }

    let titles: Vec<&str> = selection.selected().iter().map(|i| i.title()).collect();
    output.println("");
    output.println(format!("{} {}", "Compare:".bold(), titles.join(" vs ")));

    match session.confirm_compare() {
        Ok(target) => {
            output.success(format!("Ready to compare: {}", target.route()));
            output.println(format!(
                "  Run: media-comparer compare {} {} {}",
                target.media_type, target.left_id, target.right_id
            ));
        }
        Err(e) => output.info(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_genre_warning_mentions_unfiltered_tv() {
        let all = unmatched_genre_warning(" Noir ", TypeFilter::All);
        assert!(all.contains("'Noir'"));
        assert!(all.contains("TV shows are not filtered"));

        let tv = unmatched_genre_warning("Noir", TypeFilter::Tv);
        assert!(tv.contains("TV shows are not filtered"));

        let movies = unmatched_genre_warning("Noir", TypeFilter::Movie);
        assert_eq!(movies, "Genre 'Noir' is not in the genre catalog; matching movies by name");
    }
}
