use crate::Review;

use serde_json::json;

#[test]
fn test_review_wire_format() {
    let mut review = Review::new(1, "Awesome Movie", 9.0);
    review.review_id = Some("r-1".to_string());

    let value = serde_json::to_value(&review).unwrap();

    assert_eq!(
        value,
        json!({
            "reviewId": "r-1",
            "movieInfoId": 1,
            "comment": "Awesome Movie",
            "rating": 9.0
        })
    );
}

#[test]
fn test_apply_update_only_changes_comment_and_rating() {
    let mut stored = Review::new(1, "Awesome Movie", 9.0).with_generated_id();
    let id = stored.review_id.clone();

    stored.apply_update(Review::new(42, "Not as good on rewatch", 6.5));

    assert_eq!(stored.review_id, id);
    assert_eq!(stored.movie_info_id, 1);
    assert_eq!(stored.comment, "Not as good on rewatch");
    assert_eq!(stored.rating, 6.5);
}
