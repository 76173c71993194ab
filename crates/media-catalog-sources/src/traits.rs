use async_trait::async_trait;
use media_catalog_models::{Genre, MediaItem, MediaType};

use crate::error::SourceError;

/// One page worth of catalog parameters.
///
/// Both sources receive the same request; each translates it to its own
/// pagination scheme (page number for TV, offset for movies) and to whatever
/// filters it can apply server side.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// 1-based page index
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    pub genres: Vec<Genre>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size,
            search: None,
            genres: Vec::new(),
            year_min: None,
            year_max: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() { None } else { Some(search.trim().to_string()) };
        self
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = genres;
        self
    }

    pub fn with_year_range(mut self, year_min: Option<i32>, year_max: Option<i32>) -> Self {
        self.year_min = year_min;
        self.year_max = year_max;
        self
    }

    /// Offset of the first record for offset-paginated sources
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourcePage {
    pub items: Vec<MediaItem>,
    /// Total number of records the source reports for the query
    pub total: u64,
    pub page_size: u32,
}

impl SourcePage {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    // Source metadata
    fn source_name(&self) -> &str;
    fn media_type(&self) -> MediaType;

    /// Whether `fetch_page` narrows results by `PageRequest::genres` itself
    fn supports_server_genre_filter(&self) -> bool {
        false
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<SourcePage, SourceError>;

    /// Full detail record. Missing records are `SourceError::NotFound`.
    async fn get_by_id(&self, id: u64) -> Result<MediaItem, SourceError>;

    /// Genre catalog, if the source has one
    async fn genres(&self) -> Result<Vec<Genre>, SourceError> {
        Ok(Vec::new())
    }
}
