use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::credits::{Actor, Genre};
use crate::movie::Movie;
use crate::tv_show::TvShow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Human label used in listings ("Movie" / "TV Show")
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Tv => "TV Show",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaType::Movie),
            "tv" | "show" | "shows" => Ok(MediaType::Tv),
            other => Err(format!("Invalid media type: {}. Use 'movie' or 'tv'", other)),
        }
    }
}

/// Identity of a catalog record.
///
/// Ids are only unique within one media type: movie 7 and show 7 are
/// different records, so every lookup goes through the full key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MediaKey {
    pub media_type: MediaType,
    pub id: u64,
}

impl MediaKey {
    pub fn new(media_type: MediaType, id: u64) -> Self {
        Self { media_type, id }
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.media_type, self.id)
    }
}

impl FromStr for MediaKey {
    type Err = String;

    /// Parses `movie:42` / `tv:7`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid media key: {}. Expected TYPE:ID (e.g. movie:42)", s))?;
        let media_type = kind.parse::<MediaType>()?;
        let id = id
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("Invalid media id in key: {}", s))?;
        Ok(Self { media_type, id })
    }
}

/// Normalized catalog record. Sources convert their raw payloads into this
/// at the fetch boundary; nothing downstream sees delimiter-encoded fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Movie(Movie),
    Tv(TvShow),
}

impl MediaItem {
    pub fn media_type(&self) -> MediaType {
        match self {
            MediaItem::Movie(_) => MediaType::Movie,
            MediaItem::Tv(_) => MediaType::Tv,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            MediaItem::Movie(movie) => movie.id,
            MediaItem::Tv(show) => show.id,
        }
    }

    pub fn key(&self) -> MediaKey {
        MediaKey::new(self.media_type(), self.id())
    }

    pub fn title(&self) -> &str {
        match self {
            MediaItem::Movie(movie) => &movie.title,
            MediaItem::Tv(show) => &show.name,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            MediaItem::Movie(movie) => movie.release_year,
            MediaItem::Tv(show) => show.year(),
        }
    }

    pub fn popularity(&self) -> f64 {
        match self {
            MediaItem::Movie(movie) => movie.popularity,
            MediaItem::Tv(show) => show.popularity,
        }
    }

    pub fn rating(&self) -> f64 {
        match self {
            MediaItem::Movie(movie) => movie.rating,
            MediaItem::Tv(show) => show.tmdb_rating,
        }
    }

    pub fn genres(&self) -> &[Genre] {
        match self {
            MediaItem::Movie(movie) => &movie.genres,
            MediaItem::Tv(show) => &show.genres,
        }
    }

    pub fn actors(&self) -> &[Actor] {
        match self {
            MediaItem::Movie(movie) => &movie.actors,
            MediaItem::Tv(show) => &show.actors,
        }
    }

    pub fn poster_url(&self) -> &str {
        match self {
            MediaItem::Movie(movie) => &movie.poster_url,
            MediaItem::Tv(show) => &show.poster_url,
        }
    }

    /// Short one-line description: runtime for movies, season/episode counts for shows
    pub fn metadata_line(&self) -> String {
        match self {
            MediaItem::Movie(movie) => format!("{} mins", movie.runtime_minutes),
            MediaItem::Tv(show) => format!(
                "{} Season{} • {} Episodes",
                show.seasons,
                if show.seasons > 1 { "s" } else { "" },
                show.episodes
            ),
        }
    }
}

impl From<Movie> for MediaItem {
    fn from(movie: Movie) -> Self {
        MediaItem::Movie(movie)
    }
}

impl From<TvShow> for MediaItem {
    fn from(show: TvShow) -> Self {
        MediaItem::Tv(show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_key_parse() {
        let key: MediaKey = "movie:42".parse().unwrap();
        assert_eq!(key, MediaKey::new(MediaType::Movie, 42));

        let key: MediaKey = "tv:7".parse().unwrap();
        assert_eq!(key, MediaKey::new(MediaType::Tv, 7));

        assert!("movie".parse::<MediaKey>().is_err());
        assert!("book:1".parse::<MediaKey>().is_err());
        assert!("tv:abc".parse::<MediaKey>().is_err());
    }

    #[test]
    fn test_keys_are_scoped_per_type() {
        let movie = MediaKey::new(MediaType::Movie, 1);
        let show = MediaKey::new(MediaType::Tv, 1);
        assert_ne!(movie, show);
    }

    #[test]
    fn test_media_item_serializes_with_type_tag() {
        let item = MediaItem::Movie(Movie {
            id: 3,
            title: "Heat".to_string(),
            ..Movie::default()
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "movie");
        assert_eq!(json["title"], "Heat");
    }

    #[test]
    fn test_metadata_line() {
        let show = MediaItem::Tv(TvShow {
            seasons: 1,
            episodes: 8,
            ..TvShow::default()
        });
        assert_eq!(show.metadata_line(), "1 Season • 8 Episodes");

        let movie = MediaItem::Movie(Movie {
            runtime_minutes: 121,
            ..Movie::default()
        });
        assert_eq!(movie.metadata_line(), "121 mins");
    }
}
