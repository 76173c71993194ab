// Normalization helpers for loosely encoded source fields

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::warn;

use crate::credits::{Actor, Genre};

/// Split a delimited list on `;` or `,`, trimming and dropping empty segments.
///
/// The movie source is inconsistent about which delimiter it uses (genres are
/// comma separated in some responses and semicolon separated in others), so
/// both are accepted, even mixed in the same string.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.split(|c| c == ';' || c == ',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Genre names from a delimited string. Movie genres carry no catalog id.
pub fn genres_from_delimited(raw: &str) -> Vec<Genre> {
    split_delimited(raw).into_iter().map(Genre::named).collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActorEntry {
    Full(Actor),
    Name(String),
}

/// Parse a JSON-encoded actor list.
///
/// Accepts an array of `{name, character}` objects or a bare array of names.
/// Empty input and malformed JSON both yield an empty list.
pub fn parse_actor_json(raw: &str) -> Vec<Actor> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "null" {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<ActorEntry>>(raw) {
        Ok(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                ActorEntry::Full(actor) => actor,
                ActorEntry::Name(name) => Actor::new(name, ""),
            })
            .filter(|actor| !actor.name.trim().is_empty())
            .collect(),
        Err(e) => {
            warn!("Error parsing actors, using empty list: {}", e);
            Vec::new()
        }
    }
}

/// Year of an ISO-8601 date or timestamp (`2008-01-20`, `2008-01-20T00:00:00.000Z`)
pub fn year_from_date(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(date.year());
    }
    // Some records only carry the year
    raw.get(..4)
        .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
        .and_then(|y| y.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_delimited_semicolon() {
        assert_eq!(
            split_delimited("Action; Drama ;Crime"),
            vec!["Action", "Drama", "Crime"]
        );
    }

    #[test]
    fn test_split_delimited_comma_and_mixed() {
        assert_eq!(split_delimited("Action, Drama"), vec!["Action", "Drama"]);
        assert_eq!(
            split_delimited("Action,Drama;Thriller"),
            vec!["Action", "Drama", "Thriller"]
        );
    }

    #[test]
    fn test_split_delimited_drops_empty_segments() {
        assert_eq!(split_delimited(";; Action ; ;"), vec!["Action"]);
        assert!(split_delimited("").is_empty());
        assert!(split_delimited("  ").is_empty());
    }

    #[test]
    fn test_genres_from_delimited_have_no_ids() {
        let genres = genres_from_delimited("Action;Drama");
        assert_eq!(genres.len(), 2);
        assert!(genres.iter().all(|g| g.id.is_none()));
        assert_eq!(genres[1].name, "Drama");
    }

    #[test]
    fn test_parse_actor_json() {
        let actors = parse_actor_json(
            r#"[{"name":"A","character":"X"},{"name":"B","character":"Y"}]"#,
        );
        assert_eq!(actors, vec![Actor::new("A", "X"), Actor::new("B", "Y")]);
    }

    #[test]
    fn test_parse_actor_json_name_array() {
        let actors = parse_actor_json(r#"["Al Pacino","Robert De Niro"]"#);
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].name, "Al Pacino");
        assert_eq!(actors[0].character, "");
    }

    #[test]
    fn test_parse_actor_json_malformed_is_empty() {
        assert!(parse_actor_json("not json").is_empty());
        assert!(parse_actor_json(r#"[{"name":"A""#).is_empty());
        assert!(parse_actor_json("").is_empty());
        assert!(parse_actor_json("null").is_empty());
    }

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date("2008-01-20"), Some(2008));
        assert_eq!(year_from_date("1999-01-01T00:00:00.000Z"), Some(1999));
        assert_eq!(year_from_date("2011"), Some(2011));
        assert_eq!(year_from_date(""), None);
        assert_eq!(year_from_date("unknown"), None);
    }
}
