use futures::future::join_all;
use media_catalog_models::{MediaItem, MediaType};
use media_catalog_sources::{CatalogSource, PageRequest, SourceError, SourcePage, SourceRegistry};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::compare::CompareTarget;
use crate::comparison::{Comparison, ComparisonError};
use crate::session::{CatalogSession, RequestTicket};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

/// Drives both catalog sources on behalf of a `CatalogSession`
#[derive(Clone)]
pub struct CatalogLoader {
    movies: Arc<dyn CatalogSource>,
    tv: Arc<dyn CatalogSource>,
}

impl CatalogLoader {
    pub fn new(movies: Arc<dyn CatalogSource>, tv: Arc<dyn CatalogSource>) -> Self {
        Self { movies, tv }
    }

    pub fn from_registry(registry: &SourceRegistry) -> Self {
        Self::new(registry.for_type(MediaType::Movie), registry.for_type(MediaType::Tv))
    }

    pub fn source(&self, media_type: MediaType) -> &Arc<dyn CatalogSource> {
        match media_type {
            MediaType::Movie => &self.movies,
            MediaType::Tv => &self.tv,
        }
    }

    /// Load the TV genre catalog into the session
    pub async fn load_genres(&self, session: &mut CatalogSession) -> Result<usize, SourceError> {
        let genres = self.tv.genres().await?;
        let count = genres.len();
        session.set_genre_catalog(genres);
        debug!(count, "Loaded genre catalog");
        Ok(count)
    }

    /// Fetch one page for a ticket issued by `CatalogSession::begin_fetch`.
    /// The result is handed back with its ticket so the session can drop it
    /// if a newer fetch was started meanwhile.
    pub async fn fetch(
        &self,
        ticket: RequestTicket,
        request: &PageRequest,
    ) -> (RequestTicket, Result<SourcePage, SourceError>) {
        let source = self.source(ticket.media_type);
        debug!(source = source.source_name(), page = request.page, seq = ticket.seq, "Fetching page");
        (ticket, source.fetch_page(request).await)
    }

    /// Fetch the current page from every source the session's type filter
    /// needs, concurrently, and store the results. A failed source leaves
    /// its error in the session; the other source still loads.
    #[instrument(skip_all)]
    pub async fn refresh(&self, session: &mut CatalogSession) {
        let request = session.page_request();
        let tickets: Vec<RequestTicket> = session
            .sources_to_fetch()
            .into_iter()
            .map(|media_type| session.begin_fetch(media_type))
            .collect();

        let results = join_all(tickets.into_iter().map(|ticket| self.fetch(ticket, &request))).await;

        for (ticket, result) in results {
            if let Err(e) = &result {
                if e.is_connection() {
                    warn!(media_type = %ticket.media_type, "Source unreachable, check the base URL in config");
                }
            }
            session.apply_page(ticket, result);
        }
        info!(
            page = session.window().page,
            loaded = session.all_items().len(),
            errors = session.errors().len(),
            "Catalog refreshed"
        );
    }

    pub async fn load_detail(&self, media_type: MediaType, id: u64) -> Result<MediaItem, SourceError> {
        self.source(media_type).get_by_id(id).await
    }

    /// Fetch both titles concurrently and build the comparison report
    #[instrument(skip(self))]
    pub async fn load_comparison(
        &self,
        media_type: MediaType,
        left_id: u64,
        right_id: u64,
    ) -> Result<Comparison, LoadError> {
        let source = self.source(media_type);
        let (left, right) = futures::try_join!(source.get_by_id(left_id), source.get_by_id(right_id))?;
        Ok(Comparison::build(left, right)?)
    }

    pub async fn load_target(&self, target: &CompareTarget) -> Result<Comparison, LoadError> {
        self.load_comparison(target.media_type, target.left_id, target.right_id)
            .await
    }
}
