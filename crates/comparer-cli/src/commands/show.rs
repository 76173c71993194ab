use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use media_catalog_core::format_currency;
use media_catalog_models::{Actor, MediaItem, MediaType, Movie, TvShow};
use owo_colors::OwoColorize;
use serde_json::json;

use super::load_context;

const CAST_ROWS: usize = 10;

pub async fn run_show(media_type: MediaType, id: u64, output: &Output) -> Result<()> {
    let ctx = load_context()?;

    let item = match ctx.loader.load_detail(media_type, id).await {
        Ok(item) => item,
        Err(e) if e.is_not_found() => {
            output.error(format!("{} {} not found", media_type.label(), id));
            return Ok(());
        }
        Err(e) => return Err(color_eyre::eyre::eyre!("Failed to load {} {}: {}", media_type, id, e)),
    };

    if !output.is_human() {
        output.json(&json!({ "item": item }));
        return Ok(());
    }

    print_header(&item, output);
    match &item {
        MediaItem::Movie(movie) => print_movie(movie, output),
        MediaItem::Tv(show) => print_show(show, output),
    }
    print_cast(item.actors(), output);
    Ok(())
}

fn print_header(item: &MediaItem, output: &Output) {
    output.println("");
    output.println(format!("{}  {}", item.title().bold().bright_cyan(), item.media_type().label().dimmed()));

    let original = match item {
        MediaItem::Movie(movie) if movie.has_distinct_original_title() => Some(movie.original_title.as_str()),
        MediaItem::Tv(show) if !show.original_name.is_empty() && show.original_name != show.name => {
            Some(show.original_name.as_str())
        }
        _ => None,
    };
    if let Some(original) = original {
        output.println(original.dimmed().to_string());
    }

    let genres: Vec<&str> = item.genres().iter().map(|g| g.name.as_str()).collect();
    if !genres.is_empty() {
        output.println(genres.join(" · "));
    }
    output.println("");
}

fn facts_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("—").to_string()
}

fn print_movie(movie: &Movie, output: &Output) {
    let rows = vec![
        ("Year", movie.release_year.map_or_else(|| "—".to_string(), |y| y.to_string())),
        ("Runtime", format!("{} mins", movie.runtime_minutes)),
        ("Rating", movie.content_rating_or_default().to_string()),
        ("Director", or_dash(movie.director_name.as_deref())),
        ("Studios", or_dash(Some(movie.studios.join(", ").as_str()))),
        ("Budget", format_currency(movie.budget.as_deref())),
        ("Box Office", format_currency(movie.box_office.as_deref())),
        ("Collection", or_dash(movie.collection.as_deref())),
    ];
    output.println(facts_table(rows).to_string());

    if !movie.overview.is_empty() {
        output.println("");
        output.println(&movie.overview);
    }
}

fn print_show(show: &TvShow, output: &Output) {
    let network = show.network.as_ref().map(|n| match &n.country {
        Some(country) if !country.is_empty() => format!("{} ({})", n.name, country),
        _ => n.name.clone(),
    });
    let companies: Vec<&str> = show.companies.iter().map(|c| c.name.as_str()).collect();

    let rows = vec![
        ("First aired", or_dash(show.first_air_date.as_deref())),
        ("Last aired", or_dash(show.last_air_date.as_deref())),
        ("Status", or_dash(Some(show.status.as_str()))),
        ("Seasons", show.seasons.to_string()),
        ("Episodes", show.episodes.to_string()),
        (
            "TMDb Rating",
            format!("{:.1} ({} votes)", show.tmdb_rating, show.vote_count),
        ),
        ("Network", or_dash(network.as_deref())),
        ("Created by", or_dash(Some(show.creators.join(", ").as_str()))),
        ("Companies", or_dash(Some(companies.join(", ").as_str()))),
    ];
    output.println(facts_table(rows).to_string());

    if !show.overview.is_empty() {
        output.println("");
        output.println(&show.overview);
    }
}

fn print_cast(actors: &[Actor], output: &Output) {
    if actors.is_empty() {
        return;
    }

    output.println("");
    output.println("Cast".bold().to_string());
    for actor in actors.iter().take(CAST_ROWS) {
        if actor.character.is_empty() {
            output.println(format!("  {}", actor.name));
        } else {
            output.println(format!("  {} as {}", actor.name, actor.character.dimmed()));
        }
    }
    if actors.len() > CAST_ROWS {
        output.println(format!("  and {} more...", actors.len() - CAST_ROWS));
    }
}
