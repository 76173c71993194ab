use super::*;
use media_catalog_models::{Genre, MediaItem, Movie, TvShow};
use std::collections::HashSet;

fn movie(id: u64, title: &str, genres: &[&str]) -> MediaItem {
    MediaItem::Movie(Movie {
        id,
        title: title.to_string(),
        genres: genres.iter().map(|g| Genre::named(*g)).collect(),
        ..Movie::default()
    })
}

fn show(id: u64, name: &str, genres: &[(u32, &str)]) -> MediaItem {
    MediaItem::Tv(TvShow {
        id,
        name: name.to_string(),
        genres: genres.iter().map(|(gid, g)| Genre::new(*gid, *g)).collect(),
        ..TvShow::default()
    })
}

fn scored(item: MediaItem, popularity: f64, rating: f64, year: Option<i32>) -> MediaItem {
    match item {
        MediaItem::Movie(mut m) => {
            m.popularity = popularity;
            m.rating = rating;
            m.release_year = year;
            MediaItem::Movie(m)
        }
        MediaItem::Tv(mut s) => {
            s.popularity = popularity;
            s.tmdb_rating = rating;
            s.first_air_date = year.map(|y| format!("{}-06-01", y));
            MediaItem::Tv(s)
        }
    }
}

fn keys(items: &[MediaItem]) -> Vec<String> {
    items.iter().map(|i| i.key().to_string()).collect()
}

#[test]
fn test_type_filter_movie() {
    let items = vec![movie(1, "Heat", &["Action"]), show(2, "The Wire", &[(18, "Drama")])];
    let query = CatalogQuery::new(TypeFilter::Movie, SortKey::Popularity);

    let visible = derive_visible_list(&items, &query);
    assert_eq!(keys(&visible), vec!["movie:1"]);
}

#[test]
fn test_type_filter_all_is_noop() {
    let items = vec![movie(1, "Heat", &[]), show(2, "The Wire", &[])];
    let visible = derive_visible_list(&items, &CatalogQuery::default());
    assert_eq!(visible.len(), 2);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let items = vec![
        movie(1, "The Dark Knight", &[]),
        show(1, "Dark", &[]),
        movie(2, "Heat", &[]),
    ];
    let mut query = CatalogQuery::default();
    query.search = "  DARK ".to_string();

    let visible = derive_visible_list(&items, &query);
    assert_eq!(keys(&visible), vec!["movie:1", "tv:1"]);
}

#[test]
fn test_genre_filter_by_catalog_id() {
    let items = vec![
        show(1, "The Wire", &[(18, "Drama"), (80, "Crime")]),
        show(2, "The Office", &[(35, "Comedy")]),
    ];
    let mut query = CatalogQuery::default();
    query.genres = GenreSelection::new(vec![Genre::new(80, "Crime")]);

    let visible = derive_visible_list(&items, &query);
    assert_eq!(keys(&visible), vec!["tv:1"]);
}

#[test]
fn test_genre_filter_matches_movie_genres_by_name() {
    let items = vec![movie(1, "Heat", &["Action", "crime"]), movie(2, "Up", &["Animation"])];
    let mut query = CatalogQuery::default();
    query.genres = GenreSelection::new(vec![Genre::new(80, "Crime")]);

    let visible = derive_visible_list(&items, &query);
    assert_eq!(keys(&visible), vec!["movie:1"]);
}

#[test]
fn test_genre_filter_keeps_records_without_genre_data() {
    let items = vec![
        movie(1, "No Genres Movie", &[]),
        show(2, "No Genres Show", &[]),
        show(3, "Comedy Show", &[(35, "Comedy")]),
    ];
    let mut query = CatalogQuery::default();
    query.genres = GenreSelection::new(vec![Genre::new(18, "Drama")]);

    let visible = derive_visible_list(&items, &query);
    assert_eq!(keys(&visible), vec!["movie:1", "tv:2"]);
}

#[test]
fn test_genre_filter_output_is_subset_of_input() {
    let items = vec![
        movie(1, "A", &["Drama"]),
        movie(2, "B", &["Comedy"]),
        show(1, "C", &[(18, "Drama")]),
        show(2, "D", &[]),
    ];
    let mut query = CatalogQuery::default();
    query.genres = GenreSelection::new(vec![Genre::new(18, "Drama")]);

    let input: HashSet<_> = items.iter().map(|i| i.key()).collect();
    let visible = derive_visible_list(&items, &query);
    assert!(visible.iter().all(|i| input.contains(&i.key())));
    assert_eq!(keys(&visible), vec!["movie:1", "tv:1", "tv:2"]);
}

#[test]
fn test_sort_popularity_and_rating_desc() {
    let items = vec![
        scored(movie(1, "Low", &[]), 1.0, 9.0, None),
        scored(show(2, "High", &[]), 50.0, 5.0, None),
        scored(movie(3, "Mid", &[]), 10.0, 7.0, None),
    ];

    let visible = derive_visible_list(&items, &CatalogQuery::new(TypeFilter::All, SortKey::Popularity));
    assert_eq!(keys(&visible), vec!["tv:2", "movie:3", "movie:1"]);

    let visible = derive_visible_list(&items, &CatalogQuery::new(TypeFilter::All, SortKey::Rating));
    assert_eq!(keys(&visible), vec!["movie:1", "movie:3", "tv:2"]);
}

#[test]
fn test_sort_title_ignores_case() {
    let items = vec![movie(1, "zodiac", &[]), movie(2, "Alien", &[]), show(3, "breaking Bad", &[])];
    let visible = derive_visible_list(&items, &CatalogQuery::new(TypeFilter::All, SortKey::Title));
    assert_eq!(keys(&visible), vec!["movie:2", "tv:3", "movie:1"]);
}

#[test]
fn test_sort_title_folds_accents() {
    let items = vec![movie(1, "Zorro", &[]), movie(2, "Éclair", &[]), show(3, "Apple", &[])];
    let visible = derive_visible_list(&items, &CatalogQuery::new(TypeFilter::All, SortKey::Title));
    let titles: Vec<&str> = visible.iter().map(|item| item.title()).collect();
    assert_eq!(titles, vec!["Apple", "Éclair", "Zorro"]);
}

#[test]
fn test_collation_key() {
    assert_eq!(collation_key("  Amélie "), "amelie");
    assert_eq!(collation_key("ÉCLAIR"), "eclair");
    assert_eq!(collation_key("Noël"), collation_key("noel"));
}

#[test]
fn test_sort_year_desc_unknown_last() {
    let items = vec![
        scored(movie(1, "Old", &[]), 0.0, 0.0, Some(1970)),
        scored(movie(2, "Unknown", &[]), 0.0, 0.0, None),
        scored(show(3, "New", &[]), 0.0, 0.0, Some(2020)),
    ];
    let visible = derive_visible_list(&items, &CatalogQuery::new(TypeFilter::All, SortKey::Year));
    assert_eq!(keys(&visible), vec!["tv:3", "movie:1", "movie:2"]);
}

#[test]
fn test_sort_is_stable_for_every_key() {
    // All four items tie on every key
    let items = vec![
        scored(movie(4, "Same", &[]), 3.0, 6.0, Some(2000)),
        scored(show(1, "same", &[]), 3.0, 6.0, Some(2000)),
        scored(movie(2, "SAME", &[]), 3.0, 6.0, Some(2000)),
        scored(show(3, "Same", &[]), 3.0, 6.0, Some(2000)),
    ];
    let expected = keys(&items);

    for sort in [SortKey::Popularity, SortKey::Rating, SortKey::Title, SortKey::Year] {
        let visible = derive_visible_list(&items, &CatalogQuery::new(TypeFilter::All, sort));
        assert_eq!(keys(&visible), expected, "sort {:?} reordered equal items", sort);
    }
}

#[test]
fn test_non_finite_scores_sort_last() {
    let items = vec![
        scored(movie(1, "NaN", &[]), f64::NAN, 0.0, None),
        scored(movie(2, "Real", &[]), 2.0, 0.0, None),
    ];
    let visible = derive_visible_list(&items, &CatalogQuery::new(TypeFilter::All, SortKey::Popularity));
    assert_eq!(keys(&visible), vec!["movie:2", "movie:1"]);
}

#[test]
fn test_derive_is_idempotent() {
    let items = vec![
        scored(movie(1, "Heat", &["Crime"]), 5.0, 8.0, Some(1995)),
        scored(show(2, "The Wire", &[(80, "Crime")]), 9.0, 9.3, Some(2002)),
        scored(show(3, "Friends", &[(35, "Comedy")]), 7.0, 8.4, Some(1994)),
        scored(movie(4, "Heathers", &[]), 1.0, 7.0, Some(1989)),
    ];
    let mut query = CatalogQuery::new(TypeFilter::All, SortKey::Rating);
    query.search = "e".to_string();
    query.genres = GenreSelection::new(vec![Genre::new(80, "Crime")]);

    let once = derive_visible_list(&items, &query);
    let twice = derive_visible_list(&once, &query);
    assert_eq!(once, twice);
}

#[test]
fn test_genre_selection_toggle() {
    let mut selection = GenreSelection::default();
    selection.toggle(Genre::new(18, "Drama"));
    selection.toggle(Genre::new(35, "Comedy"));
    assert_eq!(selection.ids(), vec![18, 35]);

    selection.toggle(Genre::new(18, "Drama"));
    assert_eq!(selection.ids(), vec![35]);
    assert_eq!(selection.len(), 1);
}

#[test]
fn test_genre_selection_dedupes() {
    let selection = GenreSelection::new(vec![Genre::new(18, "Drama"), Genre::new(18, "Drama")]);
    assert_eq!(selection.len(), 1);
}

#[test]
fn test_parse_filters_and_sort_keys() {
    assert_eq!("movies".parse::<TypeFilter>().unwrap(), TypeFilter::Movie);
    assert_eq!("TV".parse::<TypeFilter>().unwrap(), TypeFilter::Tv);
    assert!("books".parse::<TypeFilter>().is_err());
    assert_eq!("Year".parse::<SortKey>().unwrap(), SortKey::Year);
    assert!("random".parse::<SortKey>().is_err());
    assert_eq!(SortKey::from(SortSetting::Title), SortKey::Title);
}
