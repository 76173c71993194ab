use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use media_catalog_core::{CommonSet, Comparison, LoadError};
use media_catalog_models::MediaType;
use owo_colors::OwoColorize;
use serde_json::json;

use super::load_context;

pub async fn run_compare(media_type: MediaType, left: u64, right: u64, output: &Output) -> Result<()> {
    if left == right {
        output.warn(format!("Comparing {} {} with itself", media_type.label(), left));
    }

    let ctx = load_context()?;
    let comparison = match ctx.loader.load_comparison(media_type, left, right).await {
        Ok(comparison) => comparison,
        Err(LoadError::Source(e)) if e.is_not_found() => {
            output.error(e.to_string());
            return Ok(());
        }
        Err(e) => return Err(color_eyre::eyre::eyre!("Failed to compare: {}", e)),
    };

    if !output.is_human() {
        output.json(&json!({ "comparison": comparison }));
        return Ok(());
    }

    print_comparison(&comparison, output);
    Ok(())
}

pub(super) fn print_comparison(comparison: &Comparison, output: &Output) {
    output.println("");
    output.println(format!(
        "{} {} {}",
        comparison.left.title().bold().bright_cyan(),
        "vs".dimmed(),
        comparison.right.title().bold().bright_cyan()
    ));
    output.println("");

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new(""),
        Cell::new(comparison.left.title()).add_attribute(Attribute::Bold),
        Cell::new(comparison.right.title()).add_attribute(Attribute::Bold),
    ]);
    for field in &comparison.fields {
        table.add_row(vec![
            Cell::new(field.label).add_attribute(Attribute::Bold),
            Cell::new(&field.left),
            Cell::new(&field.right),
        ]);
    }
    output.println(table.to_string());

    let genres: Vec<&str> = comparison.common_genres.shown.iter().map(|g| g.name.as_str()).collect();
    print_common("Common Genres", &comparison.common_genres, &genres, output);

    let actors: Vec<String> = comparison
        .common_actors
        .shown
        .iter()
        .map(|a| {
            if a.character.is_empty() {
                a.name.clone()
            } else {
                format!("{} ({})", a.name, a.character)
            }
        })
        .collect();
    print_common("Common Cast", &comparison.common_actors, &actors, output);
}

fn print_common<T, S: AsRef<str>>(title: &str, set: &CommonSet<T>, labels: &[S], output: &Output) {
    output.println("");
    output.println(title.bold().to_string());
    if set.is_empty() {
        output.println(format!("  {}", set.empty_message().dimmed()));
        return;
    }
    for label in labels {
        output.println(format!("  • {}", label.as_ref()));
    }
    if let Some(more) = set.more_summary() {
        output.println(format!("  {}", more.dimmed()));
    }
}
