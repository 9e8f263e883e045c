use super::*;

#[test]
fn build_rating_requires_stars_in_range() {
    assert_eq!(build_rating(0, "nice"), Err("Please select a rating"));
    assert_eq!(build_rating(6, "nice"), Err("Please select a rating"));
}

#[test]
fn build_rating_trims_comment_and_drops_blank() {
    assert_eq!(
        build_rating(4, "  works great "),
        Ok(RatingRequest { rating: 4, comment: Some("works great".to_owned()) })
    );
    assert_eq!(build_rating(5, "   "), Ok(RatingRequest { rating: 5, comment: None }));
}

#[test]
fn stars_light_up_to_the_selection() {
    let lit: Vec<bool> = (1..=MAX_STARS).map(|n| star_is_active(3, n)).collect();
    assert_eq!(lit, [true, true, true, false, false]);
    assert!((1..=MAX_STARS).all(|n| !star_is_active(0, n)));
}
