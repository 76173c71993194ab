//! The catalog view state in one place.
//!
//! `CatalogSession` owns the query, the page window, the last page loaded
//! from each source, per-source errors, the genre catalog and the compare
//! selection. Everything the view shows is derived from it. Fetches are
//! tagged with a `RequestTicket`; a response older than the latest ticket
//! issued for its source is dropped.

use media_catalog_models::{Genre, MediaItem, MediaType};
use media_catalog_sources::{PageRequest, SourceError, SourcePage};
use serde::Serialize;
use tracing::{debug, warn};

use crate::compare::{CompareError, CompareSelection, CompareTarget, ToggleOutcome};
use crate::filter::{collation_key, derive_visible_list, CatalogQuery, SortKey, TypeFilter};
use crate::pagination::{PageWindow, PaginationSummary};

/// Identifies one fetch against one source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestTicket {
    pub media_type: MediaType,
    pub seq: u64,
}

/// How a card renders in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CardState {
    pub selected: bool,
    pub dimmed: bool,
}

pub fn load_error_message(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "Failed to load movies. Please try again later.",
        MediaType::Tv => "Failed to load TV shows. Please try again later.",
    }
}

#[derive(Debug, Clone, Default)]
struct SourceSlot {
    items: Vec<MediaItem>,
    total: u64,
    latest: Option<u64>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CatalogSession {
    query: CatalogQuery,
    window: PageWindow,
    movies: SourceSlot,
    tv: SourceSlot,
    next_seq: u64,
    genre_catalog: Vec<Genre>,
    selection: CompareSelection,
    server_search: bool,
    year_range: (Option<i32>, Option<i32>),
}

impl CatalogSession {
    pub fn new(page_size: u32, sort: SortKey) -> Self {
        Self {
            query: CatalogQuery::new(TypeFilter::All, sort),
            window: PageWindow::new(1, page_size),
            movies: SourceSlot::default(),
            tv: SourceSlot::default(),
            next_seq: 0,
            genre_catalog: Vec::new(),
            selection: CompareSelection::new(),
            server_search: false,
            year_range: (None, None),
        }
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        if self.query.type_filter != type_filter {
            self.query.type_filter = type_filter;
            self.window = PageWindow::new(1, self.window.page_size);
        }
    }

    pub fn toggle_genre(&mut self, genre: Genre) {
        self.query.genres.toggle(genre);
        self.window = PageWindow::new(1, self.window.page_size);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    /// Also send the search term to both sources, so matches beyond the
    /// loaded page are found. The client-side search still applies.
    pub fn set_server_search(&mut self, enabled: bool) {
        if self.server_search != enabled {
            self.server_search = enabled;
            self.window = PageWindow::new(1, self.window.page_size);
        }
    }

    /// Release year bounds, applied server side by both sources
    pub fn set_year_range(&mut self, year_min: Option<i32>, year_max: Option<i32>) {
        if self.year_range != (year_min, year_max) {
            self.year_range = (year_min, year_max);
            self.window = PageWindow::new(1, self.window.page_size);
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    pub fn set_page(&mut self, page: u32) {
        self.window = PageWindow::new(page, self.window.page_size);
    }

    pub fn set_genre_catalog(&mut self, mut genres: Vec<Genre>) {
        genres.sort_by_cached_key(|g| collation_key(&g.name));
        self.genre_catalog = genres;
    }

    pub fn genre_catalog(&self) -> &[Genre] {
        &self.genre_catalog
    }

    /// Look up a catalog genre by name, ignoring case
    pub fn find_genre(&self, name: &str) -> Option<&Genre> {
        let name = name.trim();
        self.genre_catalog.iter().find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// Sources the current type filter needs
    pub fn sources_to_fetch(&self) -> Vec<MediaType> {
        let mut sources = Vec::with_capacity(2);
        if self.query.type_filter.includes_tv() {
            sources.push(MediaType::Tv);
        }
        if self.query.type_filter.includes_movies() {
            sources.push(MediaType::Movie);
        }
        sources
    }

    /// Request for the current page. Title search stays client side.
    pub fn page_request(&self) -> PageRequest {
        let (year_min, year_max) = self.year_range;
        let request = self
            .window
            .to_request()
            .with_genres(self.query.genres.genres().to_vec())
            .with_year_range(year_min, year_max);
        if self.server_search {
            request.with_search(self.query.search.as_str())
        } else {
            request
        }
    }

    pub fn begin_fetch(&mut self, media_type: MediaType) -> RequestTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        let slot = self.slot_mut(media_type);
        slot.latest = Some(seq);
        slot.loading = true;
        let ticket = RequestTicket { media_type, seq };
        debug!(?ticket, "Fetch started");
        ticket
    }

    /// Store a fetch result. Returns false when the response was superseded
    /// by a newer fetch for the same source and has been dropped.
    ///
    /// A failed fetch keeps the items from the last successful one and sets
    /// the source's error message.
    pub fn apply_page(&mut self, ticket: RequestTicket, result: Result<SourcePage, SourceError>) -> bool {
        let slot = self.slot_mut(ticket.media_type);
        if slot.latest != Some(ticket.seq) {
            debug!(?ticket, latest = ?slot.latest, "Dropping stale response");
            return false;
        }

        slot.loading = false;
        match result {
            Ok(page) => {
                debug!(?ticket, items = page.items.len(), total = page.total, "Page loaded");
                slot.items = page.items;
                slot.total = page.total;
                slot.error = None;
            }
            Err(e) => {
                warn!(media_type = %ticket.media_type, error = %e, "Failed to load page");
                slot.error = Some(load_error_message(ticket.media_type).to_string());
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.movies.loading || self.tv.loading
    }

    /// Loaded items, TV shows first
    pub fn all_items(&self) -> Vec<MediaItem> {
        self.tv.items.iter().chain(self.movies.items.iter()).cloned().collect()
    }

    pub fn visible_items(&self) -> Vec<MediaItem> {
        derive_visible_list(&self.all_items(), &self.query)
    }

    /// User-facing messages for sources whose last fetch failed
    pub fn errors(&self) -> Vec<&str> {
        [&self.tv, &self.movies]
            .into_iter()
            .filter_map(|slot| slot.error.as_deref())
            .collect()
    }

    pub fn pagination(&self) -> PaginationSummary {
        PaginationSummary::new(self.window, self.query.type_filter, self.movies.total, self.tv.total)
    }

    pub fn card_state(&self, item: &MediaItem) -> CardState {
        CardState {
            selected: self.selection.is_selected(&item.key()),
            dimmed: self.selection.is_dimmed(item),
        }
    }

    pub fn selection(&self) -> &CompareSelection {
        &self.selection
    }

    pub fn toggle_compare(&mut self, item: &MediaItem) -> ToggleOutcome {
        self.selection.toggle(item)
    }

    pub fn confirm_compare(&self) -> Result<CompareTarget, CompareError> {
        self.selection.confirm()
    }

    pub fn clear_compare(&mut self) {
        self.selection.clear();
    }

    fn slot_mut(&mut self, media_type: MediaType) -> &mut SourceSlot {
        match media_type {
            MediaType::Movie => &mut self.movies,
            MediaType::Tv => &mut self.tv,
        }
    }
}
