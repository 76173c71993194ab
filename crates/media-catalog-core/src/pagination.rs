use media_catalog_sources::PageRequest;
use serde::Serialize;

use crate::filter::TypeFilter;

/// One catalog page shared by both sources.
///
/// The TV source pages by number, the movie source by offset; both see the
/// same 1-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: u32,
    pub page_size: u32,
}

impl PageWindow {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    pub fn tv_page(&self) -> u32 {
        self.page
    }

    pub fn movie_offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

fn pages_for(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationSummary {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub movie_total: u64,
    pub tv_total: u64,
    pub type_filter: TypeFilter,
}

impl PaginationSummary {
    /// Total pages follow the longer source; a type filter narrows it to
    /// the source it keeps.
    pub fn new(window: PageWindow, type_filter: TypeFilter, movie_total: u64, tv_total: u64) -> Self {
        let movie_pages = if type_filter.includes_movies() {
            pages_for(movie_total, window.page_size)
        } else {
            0
        };
        let tv_pages = if type_filter.includes_tv() {
            pages_for(tv_total, window.page_size)
        } else {
            0
        };

        Self {
            page: window.page,
            page_size: window.page_size,
            total_pages: movie_pages.max(tv_pages).max(1),
            movie_total,
            tv_total,
            type_filter,
        }
    }

    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }

    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages)
    }

    pub fn describe(&self) -> String {
        let counts = match self.type_filter {
            TypeFilter::All => format!("{} TV shows + {} movies", self.tv_total, self.movie_total),
            TypeFilter::Tv => format!("{} total TV shows", self.tv_total),
            TypeFilter::Movie => format!("{} total movies", self.movie_total),
        };
        format!("Showing page {} of {} ({})", self.page, self.total_pages, counts)
    }
}

pub fn result_count_line(visible: usize, loaded: usize) -> String {
    format!("Showing {} of {} titles", visible, loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_maps_to_both_schemes() {
        let window = PageWindow::new(3, 100);
        assert_eq!(window.tv_page(), 3);
        assert_eq!(window.movie_offset(), 200);

        let first = PageWindow::new(0, 100);
        assert_eq!(first.page, 1);
        assert_eq!(first.movie_offset(), 0);
        assert_eq!(first.to_request().offset(), 0);
    }

    #[test]
    fn test_total_pages_is_max_of_sources() {
        let summary = PaginationSummary::new(PageWindow::new(1, 100), TypeFilter::All, 650, 120);
        assert_eq!(summary.total_pages, 7);
        assert!(summary.has_multiple_pages());
        assert_eq!(summary.describe(), "Showing page 1 of 7 (120 TV shows + 650 movies)");
    }

    #[test]
    fn test_total_pages_scoped_to_type_filter() {
        let summary = PaginationSummary::new(PageWindow::new(2, 100), TypeFilter::Tv, 650, 120);
        assert_eq!(summary.total_pages, 2);
        assert_eq!(summary.describe(), "Showing page 2 of 2 (120 total TV shows)");

        let movies = PaginationSummary::new(PageWindow::new(1, 100), TypeFilter::Movie, 650, 120);
        assert_eq!(movies.total_pages, 7);
    }

    #[test]
    fn test_empty_catalog_has_one_page() {
        let summary = PaginationSummary::new(PageWindow::new(1, 100), TypeFilter::All, 0, 0);
        assert_eq!(summary.total_pages, 1);
        assert!(!summary.has_multiple_pages());
        assert_eq!(summary.clamp_page(9), 1);
    }

    #[test]
    fn test_result_count_line() {
        assert_eq!(result_count_line(3, 200), "Showing 3 of 200 titles");
    }
}
