// Client-side filtering and sorting of the loaded catalog page

use media_catalog_config::SortSetting;
use media_catalog_models::{Genre, MediaItem, MediaType};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::trace;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Movie,
    Tv,
}

impl TypeFilter {
    pub fn matches(&self, media_type: MediaType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Movie => media_type == MediaType::Movie,
            TypeFilter::Tv => media_type == MediaType::Tv,
        }
    }

    pub fn includes_movies(&self) -> bool {
        self.matches(MediaType::Movie)
    }

    pub fn includes_tv(&self) -> bool {
        self.matches(MediaType::Tv)
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "movie" | "movies" => Ok(TypeFilter::Movie),
            "tv" | "shows" => Ok(TypeFilter::Tv),
            other => Err(format!("Invalid type filter: {}. Use 'all', 'movie', or 'tv'", other)),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeFilter::All => "all",
            TypeFilter::Movie => "movie",
            TypeFilter::Tv => "tv",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most popular first
    #[default]
    Popularity,
    /// Highest score first
    Rating,
    /// Alphabetical, case-insensitive
    Title,
    /// Newest first, unknown years last
    Year,
}

impl From<SortSetting> for SortKey {
    fn from(setting: SortSetting) -> Self {
        match setting {
            SortSetting::Popularity => SortKey::Popularity,
            SortSetting::Rating => SortKey::Rating,
            SortSetting::Title => SortKey::Title,
            SortSetting::Year => SortKey::Year,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popularity" => Ok(SortKey::Popularity),
            "rating" => Ok(SortKey::Rating),
            "title" => Ok(SortKey::Title),
            "year" => Ok(SortKey::Year),
            other => Err(format!(
                "Invalid sort key: {}. Use 'popularity', 'rating', 'title', or 'year'",
                other
            )),
        }
    }
}

/// Genres picked from the genre catalog.
///
/// Catalog genres carry TV ids; movie genres only carry names. A record
/// matches when one of its genres shares an id with the selection or, when
/// either side has no id, the same name ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenreSelection {
    genres: Vec<Genre>,
}

impl GenreSelection {
    pub fn new(genres: impl IntoIterator<Item = Genre>) -> Self {
        let mut selection = Self::default();
        for genre in genres {
            if !selection.contains(&genre) {
                selection.genres.push(genre);
            }
        }
        selection
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn ids(&self) -> Vec<u32> {
        self.genres.iter().filter_map(|g| g.id).collect()
    }

    /// Add the genre, or remove it if already selected
    pub fn toggle(&mut self, genre: Genre) {
        if self.contains(&genre) {
            self.genres.retain(|selected| !same_genre(selected, &genre));
        } else {
            self.genres.push(genre);
        }
    }

    pub fn contains(&self, genre: &Genre) -> bool {
        self.genres.iter().any(|selected| same_genre(selected, genre))
    }

    /// True when any of `genres` is selected
    pub fn intersects(&self, genres: &[Genre]) -> bool {
        genres.iter().any(|genre| self.contains(genre))
    }
}

fn same_genre(a: &Genre, b: &Genre) -> bool {
    match (a.id, b.id) {
        (Some(x), Some(y)) => x == y,
        _ => a.name.trim().eq_ignore_ascii_case(b.name.trim()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogQuery {
    pub type_filter: TypeFilter,
    pub search: String,
    pub genres: GenreSelection,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn new(type_filter: TypeFilter, sort: SortKey) -> Self {
        Self {
            type_filter,
            sort,
            ..Self::default()
        }
    }
}

/// Derive the visible list: type filter, title search, genre filter, then sort.
///
/// Records with no genre data are kept by the genre filter. List endpoints
/// often omit genres (the TV list never returns them; its genre filtering
/// happens server side), and dropping those records would empty the page.
/// The same rule applies to both media types and every type filter.
pub fn derive_visible_list(items: &[MediaItem], query: &CatalogQuery) -> Vec<MediaItem> {
    let needle = query.search.trim().to_lowercase();

    let mut visible: Vec<MediaItem> = items
        .iter()
        .filter(|item| query.type_filter.matches(item.media_type()))
        .filter(|item| needle.is_empty() || item.title().to_lowercase().contains(&needle))
        .filter(|item| {
            query.genres.is_empty() || item.genres().is_empty() || query.genres.intersects(item.genres())
        })
        .cloned()
        .collect();

    sort_items(&mut visible, query.sort);

    trace!(
        input = items.len(),
        visible = visible.len(),
        type_filter = %query.type_filter,
        "Derived visible list"
    );
    visible
}

/// Stable sort: items with equal keys keep their input order
pub fn sort_items(items: &mut [MediaItem], sort: SortKey) {
    match sort {
        SortKey::Popularity => items.sort_by(|a, b| cmp_score_desc(a.popularity(), b.popularity())),
        SortKey::Rating => items.sort_by(|a, b| cmp_score_desc(a.rating(), b.rating())),
        SortKey::Title => items.sort_by_cached_key(|item| collation_key(item.title())),
        SortKey::Year => items.sort_by(|a, b| cmp_year_desc(a.year(), b.year())),
    }
}

// Non-finite scores sort after every finite score and tie with each other
fn cmp_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

fn cmp_year_desc(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Alphabetical ordering key: accents folded to their base letter, then
/// lowercased, so `Éclair` sorts between `Apple` and `Zorro`.
pub fn collation_key(text: &str) -> String {
    text.trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests;
