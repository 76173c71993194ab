pub mod compare;
pub mod comparison;
pub mod filter;
pub mod intersect;
pub mod loader;
pub mod pagination;
pub mod session;

pub use compare::{
    CompareError, CompareSelection, CompareState, CompareTarget, RejectReason, ToggleOutcome, MAX_SELECTED,
};
pub use comparison::{format_currency, Comparison, ComparisonError, ComparisonField, CAST_DISPLAY_LIMIT};
pub use filter::{collation_key, derive_visible_list, CatalogQuery, GenreSelection, SortKey, TypeFilter};
pub use intersect::{intersect_by_key, CommonSet};
pub use loader::{CatalogLoader, LoadError};
pub use pagination::{result_count_line, PageWindow, PaginationSummary};
pub use session::{load_error_message, CardState, CatalogSession, RequestTicket};
