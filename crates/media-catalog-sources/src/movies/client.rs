use async_trait::async_trait;
use media_catalog_models::{Genre, MediaItem, MediaType, Movie};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::http::{get_json, join_url};
use crate::movies::api::{self, MovieDetailResponse, MoviesResponse};
use crate::traits::{CatalogSource, PageRequest, SourcePage};

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the offset-paginated movie service
#[derive(Clone)]
pub struct MovieClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl MovieClient {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    fn auth(&self) -> Option<(&str, &str)> {
        self.api_key.as_deref().map(|key| (API_KEY_HEADER, key))
    }

    /// Paginated list with optional single-genre and year bounds
    pub async fn list(
        &self,
        limit: u32,
        offset: u64,
        genre: Option<&str>,
        year_min: Option<i32>,
        year_max: Option<i32>,
    ) -> Result<(Vec<Movie>, u64), SourceError> {
        let url = join_url(&self.base_url, api::LIST_PATH);
        let params = api::list_params(limit, offset, genre, year_min, year_max);
        let response: MoviesResponse = get_json(&self.client, &url, &params, self.auth()).await?;
        Ok(Self::unpack(response))
    }

    pub async fn search(&self, term: &str, limit: u32, offset: u64) -> Result<(Vec<Movie>, u64), SourceError> {
        let url = join_url(&self.base_url, api::SEARCH_PATH);
        let params = api::search_params(term, limit, offset);
        let response: MoviesResponse = get_json(&self.client, &url, &params, self.auth()).await?;
        Ok(Self::unpack(response))
    }

    pub async fn get_movie(&self, movie_id: u64) -> Result<Movie, SourceError> {
        let url = join_url(&self.base_url, api::BY_ID_PATH);
        let params = api::by_id_params(movie_id);
        let response: MovieDetailResponse = get_json(&self.client, &url, &params, self.auth()).await?;
        response
            .data
            .data
            .into_iter()
            .next()
            .map(api::MovieRecord::into_movie)
            .ok_or(SourceError::NotFound {
                media_type: MediaType::Movie,
                id: movie_id,
            })
    }

    fn unpack(response: MoviesResponse) -> (Vec<Movie>, u64) {
        let total = response.data.pagination.total_count;
        let movies = response
            .data
            .data
            .into_iter()
            .map(api::MovieRecord::into_movie)
            .collect();
        (movies, total)
    }
}

/// Genre name for the list endpoint, which filters by a single genre.
/// With several selected the union is left to the client-side filter.
pub fn server_genre(genres: &[Genre]) -> Option<&str> {
    match genres {
        [only] => Some(only.name.as_str()),
        _ => None,
    }
}

#[async_trait]
impl CatalogSource for MovieClient {
    fn source_name(&self) -> &str {
        "movies"
    }

    fn media_type(&self) -> MediaType {
        MediaType::Movie
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<SourcePage, SourceError> {
        let offset = request.offset();
        let (movies, total) = match request.search.as_deref() {
            Some(term) => self.search(term, request.page_size, offset).await?,
            None => {
                self.list(
                    request.page_size,
                    offset,
                    server_genre(&request.genres),
                    request.year_min,
                    request.year_max,
                )
                .await?
            }
        };

        debug!(count = movies.len(), total, offset, "Fetched movie page");
        Ok(SourcePage {
            items: movies.into_iter().map(MediaItem::Movie).collect(),
            total,
            page_size: request.page_size,
        })
    }

    async fn get_by_id(&self, id: u64) -> Result<MediaItem, SourceError> {
        let movie = self.get_movie(id).await?;
        info!("Loaded movie {} ({})", movie.title, movie.id);
        Ok(MediaItem::Movie(movie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_genre_only_for_single_selection() {
        assert_eq!(server_genre(&[]), None);
        assert_eq!(server_genre(&[Genre::named("Crime")]), Some("Crime"));
        assert_eq!(server_genre(&[Genre::new(80, "Crime")]), Some("Crime"));
        assert_eq!(server_genre(&[Genre::named("Crime"), Genre::named("Drama")]), None);
    }
}
