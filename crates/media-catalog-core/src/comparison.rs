// Side-by-side comparison of two titles of the same type

use media_catalog_models::{Actor, Genre, MediaItem, MediaType, Movie, TvShow};
use serde::Serialize;
use thiserror::Error;

use crate::intersect::{intersect_by_key, CommonSet};

/// Common cast members shown before the "and N more..." summary
pub const CAST_DISPLAY_LIMIT: usize = 5;

const MISSING: &str = "—";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("Cannot compare a {left} with a {right}")]
    TypeMismatch { left: MediaType, right: MediaType },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonField {
    pub label: &'static str,
    pub left: String,
    pub right: String,
}

impl ComparisonField {
    fn new(label: &'static str, left: impl ToString, right: impl ToString) -> Self {
        Self {
            label,
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub media_type: MediaType,
    pub left: MediaItem,
    pub right: MediaItem,
    pub common_genres: CommonSet<Genre>,
    pub common_actors: CommonSet<Actor>,
    pub fields: Vec<ComparisonField>,
}

impl Comparison {
    /// Genres and cast are matched by name: the two sources share no id space.
    pub fn build(left: MediaItem, right: MediaItem) -> Result<Self, ComparisonError> {
        let fields = match (&left, &right) {
            (MediaItem::Movie(l), MediaItem::Movie(r)) => movie_fields(l, r),
            (MediaItem::Tv(l), MediaItem::Tv(r)) => show_fields(l, r),
            _ => {
                return Err(ComparisonError::TypeMismatch {
                    left: left.media_type(),
                    right: right.media_type(),
                })
            }
        };

        let genres = intersect_by_key(left.genres(), right.genres(), |g| g.name.trim().to_string());
        let actors = intersect_by_key(left.actors(), right.actors(), |a| a.name.trim().to_string());

        Ok(Self {
            media_type: left.media_type(),
            common_genres: CommonSet::all(genres, "genres"),
            common_actors: CommonSet::truncated(actors, CAST_DISPLAY_LIMIT, "actors"),
            fields,
            left,
            right,
        })
    }
}

fn movie_fields(left: &Movie, right: &Movie) -> Vec<ComparisonField> {
    vec![
        ComparisonField::new("Year", year_or_missing(left.release_year), year_or_missing(right.release_year)),
        ComparisonField::new(
            "Runtime",
            format!("{} mins", left.runtime_minutes),
            format!("{} mins", right.runtime_minutes),
        ),
        ComparisonField::new("Rating", left.content_rating_or_default(), right.content_rating_or_default()),
        ComparisonField::new(
            "Budget",
            format_currency(left.budget.as_deref()),
            format_currency(right.budget.as_deref()),
        ),
        ComparisonField::new(
            "Box Office",
            format_currency(left.box_office.as_deref()),
            format_currency(right.box_office.as_deref()),
        ),
    ]
}

fn show_fields(left: &TvShow, right: &TvShow) -> Vec<ComparisonField> {
    vec![
        ComparisonField::new("Year", year_or_missing(left.year()), year_or_missing(right.year())),
        ComparisonField::new("Seasons", left.seasons, right.seasons),
        ComparisonField::new("Episodes", left.episodes, right.episodes),
        ComparisonField::new(
            "TMDb Rating",
            format!("{:.1}", left.tmdb_rating),
            format!("{:.1}", right.tmdb_rating),
        ),
    ]
}

fn year_or_missing(year: Option<i32>) -> String {
    year.map_or_else(|| MISSING.to_string(), |y| y.to_string())
}

/// `$1,234,567` rounded to whole dollars; `—` when absent or not a number
pub fn format_currency(raw: Option<&str>) -> String {
    let Some(amount) = raw.and_then(|r| r.trim().parse::<f64>().ok()).filter(|a| a.is_finite()) else {
        return MISSING.to_string();
    };

    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{}${}", sign, grouped)
}
