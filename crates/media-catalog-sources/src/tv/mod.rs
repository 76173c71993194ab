pub mod api;
pub mod client;

pub use api::ShowFilter;
pub use client::TvClient;
