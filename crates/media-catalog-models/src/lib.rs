pub mod credits;
pub mod media;
pub mod movie;
pub mod parse;
pub mod tv_show;

pub use credits::{Actor, Company, Genre, Network};
pub use media::{MediaItem, MediaKey, MediaType};
pub use movie::Movie;
pub use tv_show::TvShow;
