use crate::{Movie, MovieInfo, Review};

use chrono::NaiveDate;

#[test]
fn test_movie_serializes_camel_case() {
    let movie = Movie::new(
        MovieInfo::new(
            "Batman Begins",
            2005,
            vec![],
            NaiveDate::from_ymd_opt(2005, 6, 15).unwrap(),
        ),
        vec![Review::new(1, "Great", 8.0)],
    );

    let value = serde_json::to_value(&movie).unwrap();

    assert_eq!(value["movieInfo"]["name"], "Batman Begins");
    assert_eq!(value["reviewList"].as_array().unwrap().len(), 1);
}
