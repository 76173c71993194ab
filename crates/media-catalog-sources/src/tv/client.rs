use async_trait::async_trait;
use media_catalog_models::{Genre, MediaItem, MediaType, TvShow};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::http::{get_json, join_url};
use crate::traits::{CatalogSource, PageRequest, SourcePage};
use crate::tv::api::{self, GenresResponse, ShowFilter, ShowRecord, ShowsResponse};

const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the page-numbered TV service
#[derive(Clone)]
pub struct TvClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl TvClient {
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

    pub async fn shows(&self, page: u32, limit: u32) -> Result<ShowsResponse, SourceError> {
        let url = join_url(&self.base_url, api::SHOWS_PATH);
        get_json(&self.client, &url, &api::page_params(page, limit), self.auth()).await
    }

    pub async fn filtered_shows(&self, page: u32, limit: u32, filter: &ShowFilter) -> Result<ShowsResponse, SourceError> {
        let url = join_url(&self.base_url, api::FILTER_PATH);
        let mut params = api::page_params(page, limit);
        params.extend(filter.to_params());
        get_json(&self.client, &url, &params, self.auth()).await
    }

    pub async fn show(&self, show_id: u64) -> Result<TvShow, SourceError> {
        let url = join_url(&self.base_url, &format!("{}/{}", api::SHOWS_PATH, show_id));
        match get_json::<ShowRecord>(&self.client, &url, &[], self.auth()).await {
            Ok(record) => Ok(record.into_show()),
            Err(e) if e.is_not_found() => Err(SourceError::NotFound {
                media_type: MediaType::Tv,
                id: show_id,
            }),
            Err(e) => Err(e),
        }
    }

    pub async fn genre_catalog(&self) -> Result<Vec<Genre>, SourceError> {
        let url = join_url(&self.base_url, api::GENRES_PATH);
        let response: GenresResponse = get_json(&self.client, &url, &[], self.auth()).await?;
        Ok(response.data.into_iter().map(Genre::from).collect())
    }
}

/// Server-side filter equivalent of a page request, if it needs one
pub fn filter_for(request: &PageRequest) -> ShowFilter {
    ShowFilter {
        name: request.search.clone(),
        genre_ids: request.genres.iter().filter_map(|g| g.id).collect(),
        start_date: request.year_min.map(|y| format!("{:04}-01-01", y)),
        end_date: request.year_max.map(|y| format!("{:04}-12-31", y)),
        ..ShowFilter::default()
    }
}

#[async_trait]
impl CatalogSource for TvClient {
    fn source_name(&self) -> &str {
        "tv"
    }

    fn media_type(&self) -> MediaType {
        MediaType::Tv
    }

    fn supports_server_genre_filter(&self) -> bool {
        true
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<SourcePage, SourceError> {
        let filter = filter_for(request);
        let response = if filter.is_empty() {
            self.shows(request.page, request.page_size).await?
        } else {
            self.filtered_shows(request.page, request.page_size, &filter).await?
        };

        debug!(count = response.data.len(), total = response.count, page = response.page, "Fetched TV page");
        let page_size = if response.limit == 0 { request.page_size } else { response.limit };
        Ok(SourcePage {
            items: response
                .data
                .into_iter()
                .map(|record| MediaItem::Tv(record.into_show()))
                .collect(),
            total: response.count,
            page_size,
        })
    }

    async fn get_by_id(&self, id: u64) -> Result<MediaItem, SourceError> {
        let show = self.show(id).await?;
        info!("Loaded TV show {} ({})", show.name, show.id);
        Ok(MediaItem::Tv(show))
    }

    async fn genres(&self) -> Result<Vec<Genre>, SourceError> {
        self.genre_catalog().await
    }
}
