use crate::{CoreError, MovieInfo};

use chrono::NaiveDate;
use serde_json::json;

fn batman_begins() -> MovieInfo {
    MovieInfo::new(
        "Batman Begins",
        2005,
        vec!["Christian Bale".to_string(), "Michael Cane".to_string()],
        NaiveDate::from_ymd_opt(2005, 6, 15).unwrap(),
    )
}

#[test]
fn test_movie_info_new_has_no_id() {
    let movie_info = batman_begins();

    assert!(movie_info.movie_info_id.is_none());
    assert!(matches!(
        movie_info.id(),
        Err(CoreError::MissingIdentifier { record: "movie_info", .. })
    ));
}

#[test]
fn test_with_generated_id_assigns_id_once() {
    let movie_info = batman_begins().with_generated_id();
    let id = movie_info.movie_info_id.clone().unwrap();

    let again = movie_info.with_generated_id();
    assert_eq!(again.movie_info_id, Some(id));
}

#[test]
fn test_with_generated_id_keeps_client_supplied_id() {
    let mut movie_info = batman_begins();
    movie_info.movie_info_id = Some("abc".to_string());

    let movie_info = movie_info.with_generated_id();
    assert_eq!(movie_info.id().unwrap(), "abc");
}

#[test]
fn test_serializes_with_wire_field_names() {
    let mut movie_info = batman_begins();
    movie_info.movie_info_id = Some("abc".to_string());

    let value = serde_json::to_value(&movie_info).unwrap();

    assert_eq!(
        value,
        json!({
            "movieInfoId": "abc",
            "name": "Batman Begins",
            "year": 2005,
            "cast": ["Christian Bale", "Michael Cane"],
            "release_date": "2005-06-15"
        })
    );
}

#[test]
fn test_deserializes_without_id() {
    let movie_info: MovieInfo = serde_json::from_value(json!({
        "name": "The Dark Knight",
        "year": 2008,
        "cast": ["Christian Bale", "HeathLedger"],
        "release_date": "2008-07-18"
    }))
    .unwrap();

    assert!(movie_info.movie_info_id.is_none());
    assert_eq!(movie_info.year, 2008);
    assert_eq!(
        movie_info.release_date,
        NaiveDate::from_ymd_opt(2008, 7, 18).unwrap()
    );
}

#[test]
fn test_apply_update_keeps_identifier() {
    let mut stored = batman_begins();
    stored.movie_info_id = Some("abc".to_string());

    let mut incoming = MovieInfo::new(
        "Dark Knight Rises",
        2012,
        vec!["Tom Hardy".to_string()],
        NaiveDate::from_ymd_opt(2012, 7, 20).unwrap(),
    );
    incoming.movie_info_id = Some("ignored".to_string());

    stored.apply_update(incoming);

    assert_eq!(stored.id().unwrap(), "abc");
    assert_eq!(stored.name, "Dark Knight Rises");
    assert_eq!(stored.year, 2012);
    assert_eq!(stored.cast, vec!["Tom Hardy".to_string()]);
}

#[test]
fn test_parse_release_date_rejects_garbage() {
    assert!(MovieInfo::parse_release_date("2005-06-15").is_ok());
    assert!(matches!(
        MovieInfo::parse_release_date("15/06/2005"),
        Err(CoreError::InvalidReleaseDate { .. })
    ));
}
