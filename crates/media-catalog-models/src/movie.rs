use serde::{Deserialize, Serialize};

use crate::credits::{Actor, Genre};

/// Placeholder shown when a movie has no content rating
pub const NOT_RATED: &str = "Not Rated";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub original_title: String,
    pub release_year: Option<i32>,
    pub runtime_minutes: u32,
    /// MPA-style content rating (G, PG-13, R, ...)
    pub content_rating: Option<String>,
    pub box_office: Option<String>,
    pub budget: Option<String>,
    pub director_name: Option<String>,
    pub overview: String,
    pub genres: Vec<Genre>,
    pub studios: Vec<String>,
    pub actors: Vec<Actor>,
    pub poster_url: String,
    pub backdrop_url: String,
    pub collection: Option<String>,
    /// The movie list endpoint has no popularity or score; both stay 0.0 there.
    pub popularity: f64,
    pub rating: f64,
}

impl Movie {
    pub fn content_rating_or_default(&self) -> &str {
        self.content_rating
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(NOT_RATED)
    }

    /// True when the original title differs and is worth showing
    pub fn has_distinct_original_title(&self) -> bool {
        !self.original_title.is_empty() && self.original_title != self.title
    }
}
