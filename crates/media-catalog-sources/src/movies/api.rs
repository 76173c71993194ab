use media_catalog_models::parse::{genres_from_delimited, parse_actor_json, split_delimited};
use media_catalog_models::Movie;
use serde::{Deserialize, Deserializer, Serialize};

/// Poster and backdrop paths come back relative to this base
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

pub const LIST_PATH: &str = "/api/v1/movies";
pub const SEARCH_PATH: &str = "/api/v1/movies/search";
pub const BY_ID_PATH: &str = "/api/v1/movies/search/id";

/// Movie record as the movie service returns it. Genres and studios are
/// delimiter-encoded strings and the cast is an embedded JSON string.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MovieRecord {
    pub movie_id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub runtime_minutes: Option<u32>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub box_office: Option<String>,
    #[serde(default)]
    pub director_id: Option<u64>,
    #[serde(default)]
    pub director_name: Option<String>,
    #[serde(default)]
    pub country_id: Option<u64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub budget: Option<String>,
    #[serde(default)]
    pub studios: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default, deserialize_with = "embedded_json")]
    pub actors: Option<String>,
    #[serde(default)]
    pub mpa_rating: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub limit: u32,
    pub offset: u64,
    pub total_count: u64,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesPayload {
    pub data: Vec<MovieRecord>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: MoviesPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetailPayload {
    pub data: Vec<MovieRecord>,
    #[serde(default)]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: MovieDetailPayload,
}

/// Money fields arrive as strings or bare numbers depending on the record
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// The cast is usually a JSON document inside a string; a few records send
/// the array itself. Both are kept as text and parsed in `into_movie`.
fn embedded_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(array @ serde_json::Value::Array(_)) => Some(array.to_string()),
        _ => None,
    })
}

/// Query for the paginated list endpoint
pub fn list_params(
    limit: u32,
    offset: u64,
    genre: Option<&str>,
    year_min: Option<i32>,
    year_max: Option<i32>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
    if let Some(genre) = genre.filter(|g| !g.is_empty()) {
        params.push(("genre", genre.to_string()));
    }
    // The service treats 0 as "no bound"
    if let Some(year_min) = year_min.filter(|y| *y != 0) {
        params.push(("yearMin", year_min.to_string()));
    }
    if let Some(year_max) = year_max.filter(|y| *y != 0) {
        params.push(("yearMax", year_max.to_string()));
    }
    params
}

pub fn search_params(term: &str, limit: u32, offset: u64) -> Vec<(&'static str, String)> {
    vec![
        ("q", term.to_string()),
        ("limit", limit.to_string()),
        ("offset", offset.to_string()),
    ]
}

pub fn by_id_params(movie_id: u64) -> Vec<(&'static str, String)> {
    vec![("movieId", movie_id.to_string())]
}

fn image_url(path: Option<&str>) -> String {
    match path.map(str::trim) {
        None | Some("") => String::new(),
        Some(p) if p.starts_with("http://") || p.starts_with("https://") => p.to_string(),
        Some(p) => format!("{}{}", IMAGE_BASE_URL, p),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl MovieRecord {
    /// Normalize into the catalog model. The list endpoint has no popularity
    /// or score, so both stay at 0.0.
    pub fn into_movie(self) -> Movie {
        let content_rating = non_empty(self.mpa_rating).or_else(|| non_empty(self.rating));
        Movie {
            id: self.movie_id,
            original_title: non_empty(self.original_title).unwrap_or_else(|| self.title.clone()),
            title: self.title,
            release_year: self.release_year.filter(|y| *y > 0),
            runtime_minutes: self.runtime_minutes.unwrap_or(0),
            content_rating,
            box_office: self.box_office,
            budget: self.budget,
            director_name: non_empty(self.director_name),
            overview: self.overview.unwrap_or_default(),
            genres: self.genres.as_deref().map(genres_from_delimited).unwrap_or_default(),
            studios: self.studios.as_deref().map(split_delimited).unwrap_or_default(),
            actors: self.actors.as_deref().map(parse_actor_json).unwrap_or_default(),
            poster_url: image_url(self.poster_url.as_deref()),
            backdrop_url: image_url(self.backdrop_url.as_deref()),
            collection: non_empty(self.collection),
            popularity: 0.0,
            rating: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_BODY: &str = r#"{
        "success": true,
        "message": "ok",
        "data": {
            "data": [
                {
                    "movie_id": 949,
                    "title": "Heat",
                    "original_title": "Heat",
                    "release_year": 1995,
                    "runtime_minutes": 170,
                    "rating": null,
                    "box_office": "187436818",
                    "director_id": 1,
                    "director_name": "Michael Mann",
                    "country_id": 1,
                    "overview": "Obsessive master thief...",
                    "genres": "Action; Crime; Drama",
                    "budget": 60000000,
                    "studios": "Regency Enterprises;Forward Pass",
                    "poster_url": "/heat.jpg",
                    "backdrop_url": "",
                    "collection": null,
                    "actors": "[{\"name\":\"Al Pacino\",\"character\":\"Vincent Hanna\"}]",
                    "mpa_rating": "R"
                }
            ],
            "pagination": {"limit": 100, "offset": 0, "totalCount": 1, "hasNext": false, "hasPrevious": false}
        }
    }"#;

    #[test]
    fn test_decode_list_response() {
        let response: MoviesResponse = serde_json::from_str(LIST_BODY).unwrap();
        assert_eq!(response.data.pagination.total_count, 1);
        assert_eq!(response.data.data.len(), 1);
        assert_eq!(response.data.data[0].budget.as_deref(), Some("60000000"));
    }

    #[test]
    fn test_into_movie_normalizes_encoded_fields() {
        let response: MoviesResponse = serde_json::from_str(LIST_BODY).unwrap();
        let movie = response.data.data.into_iter().next().unwrap().into_movie();

        assert_eq!(movie.id, 949);
        assert_eq!(movie.release_year, Some(1995));
        assert_eq!(movie.content_rating.as_deref(), Some("R"));
        let genres: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(genres, vec!["Action", "Crime", "Drama"]);
        assert_eq!(movie.studios, vec!["Regency Enterprises", "Forward Pass"]);
        assert_eq!(movie.actors.len(), 1);
        assert_eq!(movie.actors[0].character, "Vincent Hanna");
        assert_eq!(movie.poster_url, "https://image.tmdb.org/t/p/w500/heat.jpg");
        assert_eq!(movie.backdrop_url, "");
    }

    #[test]
    fn test_into_movie_tolerates_bad_actor_json() {
        let record = MovieRecord {
            movie_id: 1,
            title: "Broken".to_string(),
            actors: Some("[{oops".to_string()),
            rating: Some("PG".to_string()),
            ..MovieRecord::default()
        };
        let movie = record.into_movie();
        assert!(movie.actors.is_empty());
        // Falls back to `rating` when `mpa_rating` is missing
        assert_eq!(movie.content_rating.as_deref(), Some("PG"));
        assert_eq!(movie.original_title, "Broken");
    }

    #[test]
    fn test_actors_sent_as_array() {
        let body = r#"{"movie_id": 2, "title": "Ronin", "actors": [{"name": "Jean Reno", "character": "Vincent"}]}"#;
        let record: MovieRecord = serde_json::from_str(body).unwrap();
        let movie = record.into_movie();
        assert_eq!(movie.actors.len(), 1);
        assert_eq!(movie.actors[0].name, "Jean Reno");
    }

    #[test]
    fn test_decode_detail_response() {
        let body = r#"{"success": true, "message": "", "data": {"data": [], "movieId": 5, "total": 0}}"#;
        let response: MovieDetailResponse = serde_json::from_str(body).unwrap();
        assert!(response.data.data.is_empty());
        assert_eq!(response.data.movie_id, Some(5));
    }

    #[test]
    fn test_list_params() {
        let params = list_params(100, 200, Some("Drama"), Some(1990), None);
        assert_eq!(
            params,
            vec![
                ("limit", "100".to_string()),
                ("offset", "200".to_string()),
                ("genre", "Drama".to_string()),
                ("yearMin", "1990".to_string()),
            ]
        );
        assert_eq!(list_params(10, 0, None, Some(0), Some(0)).len(), 2);
    }
}
