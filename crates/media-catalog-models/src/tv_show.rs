use serde::{Deserialize, Serialize};

use crate::credits::{Actor, Company, Genre, Network};
use crate::parse::year_from_date;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TvShow {
    pub id: u64,
    pub name: String,
    pub original_name: String,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub status: String,
    pub seasons: u32,
    pub episodes: u32,
    pub overview: String,
    pub popularity: f64,
    pub tmdb_rating: f64,
    pub vote_count: u64,
    pub creators: Vec<String>,
    pub genres: Vec<Genre>,
    pub network: Option<Network>,
    pub companies: Vec<Company>,
    pub actors: Vec<Actor>,
    pub poster_url: String,
    pub backdrop_url: String,
}

impl TvShow {
    pub fn year(&self) -> Option<i32> {
        self.first_air_date.as_deref().and_then(year_from_date)
    }
}
