pub mod error;
pub mod factory;
pub mod http;
pub mod movies;
pub mod traits;
pub mod tv;

pub use error::SourceError;
pub use factory::SourceRegistry;
pub use movies::MovieClient;
pub use traits::{CatalogSource, PageRequest, SourcePage};
pub use tv::{ShowFilter, TvClient};
