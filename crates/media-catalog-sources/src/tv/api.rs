use media_catalog_models::{Actor, Company, Genre, Network, TvShow};
use serde::{Deserialize, Serialize};

pub const SHOWS_PATH: &str = "/shows";
pub const FILTER_PATH: &str = "/shows/filter";
pub const GENRES_PATH: &str = "/genres";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvGenre {
    pub genre_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvNetwork {
    #[serde(default)]
    pub network_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvCompany {
    #[serde(default)]
    pub company_id: u64,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub countries: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvActor {
    #[serde(default)]
    pub actor_id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub order_num: Option<u32>,
}

/// Show record. The list endpoints return only the basic fields; the
/// by-id endpoint adds genres, network, companies, cast and creators.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShowRecord {
    pub show_id: u64,
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub seasons: Option<u32>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub tmdb_rating: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    #[serde(default)]
    pub creators: Vec<String>,
    #[serde(default)]
    pub genres: Vec<TvGenre>,
    #[serde(default)]
    pub network: Option<TvNetwork>,
    #[serde(default)]
    pub companies: Vec<TvCompany>,
    #[serde(default)]
    pub actors: Vec<TvActor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowsResponse {
    pub count: u64,
    pub page: u32,
    pub limit: u32,
    pub data: Vec<ShowRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenresResponse {
    #[serde(default)]
    pub count: u64,
    pub data: Vec<TvGenre>,
}

/// Filters accepted by `/shows/filter`. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowFilter {
    pub name: Option<String>,
    pub genre_ids: Vec<u32>,
    /// `YYYY-MM-DD`
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub network: Option<String>,
    pub status: Option<String>,
    pub actors: Option<String>,
    pub studios: Option<String>,
    pub creators: Option<String>,
}

impl ShowFilter {
    pub fn is_empty(&self) -> bool {
        *self == ShowFilter::default()
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let mut push_text = |key: &'static str, value: &Option<String>| {
            if let Some(v) = value.as_ref().filter(|v| !v.trim().is_empty()) {
                params.push((key, v.trim().to_string()));
            }
        };
        push_text("name", &self.name);
        push_text("startDate", &self.start_date);
        push_text("endDate", &self.end_date);
        push_text("network", &self.network);
        push_text("status", &self.status);
        push_text("actors", &self.actors);
        push_text("studios", &self.studios);
        push_text("creators", &self.creators);

        if !self.genre_ids.is_empty() {
            let ids: Vec<String> = self.genre_ids.iter().map(u32::to_string).collect();
            params.push(("genres", ids.join(",")));
        }
        if let Some(min) = self.min_rating {
            params.push(("min_rating", min.to_string()));
        }
        if let Some(max) = self.max_rating {
            params.push(("max_rating", max.to_string()));
        }
        params
    }
}

pub fn page_params(page: u32, limit: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.max(1).to_string()), ("limit", limit.to_string())]
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

impl From<TvGenre> for Genre {
    fn from(genre: TvGenre) -> Self {
        Genre::new(genre.genre_id, genre.name)
    }
}

impl ShowRecord {
    pub fn into_show(self) -> TvShow {
        TvShow {
            id: self.show_id,
            original_name: self
                .original_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| self.name.clone()),
            name: self.name,
            first_air_date: self.first_air_date.filter(|d| !d.trim().is_empty()),
            last_air_date: self.last_air_date.filter(|d| !d.trim().is_empty()),
            status: or_empty(self.status),
            seasons: self.seasons.unwrap_or(0),
            episodes: self.episodes.unwrap_or(0),
            overview: or_empty(self.overview),
            popularity: self.popularity.unwrap_or(0.0),
            tmdb_rating: self.tmdb_rating.unwrap_or(0.0),
            vote_count: self.vote_count.unwrap_or(0),
            creators: self.creators,
            genres: self.genres.into_iter().map(Genre::from).collect(),
            network: self.network.filter(|n| !n.name.is_empty()).map(|n| Network {
                id: n.network_id,
                name: n.name,
                logo: or_empty(n.logo),
                country: n.country,
            }),
            companies: self
                .companies
                .into_iter()
                .map(|c| Company {
                    id: c.company_id,
                    name: c.name,
                    logo: or_empty(c.logo),
                    countries: or_empty(c.countries),
                })
                .collect(),
            actors: self
                .actors
                .into_iter()
                .map(|a| Actor {
                    id: a.actor_id,
                    name: a.name,
                    character: or_empty(a.character),
                    profile_url: a.profile_url,
                    order: a.order_num,
                })
                .collect(),
            poster_url: or_empty(self.poster_url),
            backdrop_url: or_empty(self.backdrop_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_response() {
        let body = r#"{
            "count": 2,
            "page": 1,
            "limit": 100,
            "data": [
                {"show_id": 1396, "name": "Breaking Bad", "original_name": "Breaking Bad",
                 "first_air_date": "2008-01-20", "status": "Ended", "seasons": 5, "episodes": 62,
                 "tmdb_rating": 8.9, "popularity": 310.5, "poster_url": "https://img/bb.jpg"},
                {"show_id": 1399, "name": "Game of Thrones", "first_air_date": null,
                 "status": "Ended", "seasons": 8, "episodes": 73, "tmdb_rating": 8.4, "popularity": 400.1}
            ]
        }"#;
        let response: ShowsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.count, 2);

        let shows: Vec<TvShow> = response.data.into_iter().map(ShowRecord::into_show).collect();
        assert_eq!(shows[0].year(), Some(2008));
        assert!(shows[0].genres.is_empty());
        assert_eq!(shows[1].year(), None);
        assert_eq!(shows[1].original_name, "Game of Thrones");
    }

    #[test]
    fn test_decode_detail_record() {
        let body = r#"{
            "show_id": 1396, "name": "Breaking Bad", "original_name": "Breaking Bad",
            "first_air_date": "2008-01-20", "last_air_date": "2013-09-29", "status": "Ended",
            "seasons": 5, "episodes": 62, "tmdb_rating": 8.9, "popularity": 310.5, "vote_count": 13000,
            "overview": "A chemistry teacher...", "creators": ["Vince Gilligan"],
            "poster_url": "p", "backdrop_url": "b",
            "genres": [{"genre_id": 18, "name": "Drama"}, {"genre_id": 80, "name": "Crime"}],
            "network": {"network_id": 174, "name": "AMC", "logo": "amc.png", "country": "US"},
            "companies": [{"company_id": 11073, "name": "Sony Pictures Television", "logo": null, "countries": "US"}],
            "actors": [{"actor_id": 17419, "name": "Bryan Cranston", "character": "Walter White",
                        "profile_url": "bc.jpg", "order_num": 0}]
        }"#;
        let show = serde_json::from_str::<ShowRecord>(body).unwrap().into_show();
        assert_eq!(show.genres, vec![Genre::new(18, "Drama"), Genre::new(80, "Crime")]);
        assert_eq!(show.network.as_ref().map(|n| n.name.as_str()), Some("AMC"));
        assert_eq!(show.companies[0].logo, "");
        assert_eq!(show.actors[0].character, "Walter White");
        assert_eq!(show.actors[0].order, Some(0));
        assert_eq!(show.creators, vec!["Vince Gilligan"]);
    }

    #[test]
    fn test_filter_params_skip_unset_fields() {
        let filter = ShowFilter {
            name: Some("  bad ".to_string()),
            genre_ids: vec![18, 80],
            min_rating: Some(7.5),
            status: Some(String::new()),
            ..ShowFilter::default()
        };
        let params = filter.to_params();
        assert_eq!(
            params,
            vec![
                ("name", "bad".to_string()),
                ("genres", "18,80".to_string()),
                ("min_rating", "7.5".to_string()),
            ]
        );
        assert!(ShowFilter::default().is_empty());
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_page_params() {
        assert_eq!(
            page_params(0, 50),
            vec![("page", "1".to_string()), ("limit", "50".to_string())]
        );
    }
}
