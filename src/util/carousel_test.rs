use super::*;

#[test]
fn prev_wraps_from_first_to_last() {
    let carousel = Carousel::new(3);
    assert_eq!(carousel.prev().index(), 2);
}

#[test]
fn next_wraps_from_last_to_first() {
    let carousel = Carousel::new(3).select(2);
    assert_eq!(carousel.next().index(), 0);
}

#[test]
fn next_and_prev_step_through_middle() {
    let carousel = Carousel::new(3).next();
    assert_eq!(carousel.index(), 1);
    assert_eq!(carousel.next().index(), 2);
    assert_eq!(carousel.prev().index(), 0);
}

#[test]
fn single_image_stays_put_without_controls() {
    let carousel = Carousel::new(1);
    assert_eq!(carousel.next().index(), 0);
    assert_eq!(carousel.prev().index(), 0);
    assert!(!carousel.has_controls());
    assert!(Carousel::new(2).has_controls());
}

#[test]
fn empty_carousel_does_not_move() {
    let carousel = Carousel::new(0);
    assert!(carousel.is_empty());
    assert_eq!(carousel.next(), carousel);
    assert_eq!(carousel.prev(), carousel);
}

#[test]
fn select_out_of_range_resets_to_first() {
    assert_eq!(Carousel::new(3).select(1).index(), 1);
    assert_eq!(Carousel::new(3).select(5).index(), 0);
}

#[test]
fn resized_resets_out_of_bounds_index() {
    let carousel = Carousel::new(4).select(3);
    assert_eq!(carousel.resized(2).index(), 0);
    assert_eq!(carousel.resized(2).len(), 2);
    assert_eq!(Carousel::new(4).select(1).resized(2).index(), 1);
}

#[test]
fn counter_is_one_based() {
    assert_eq!(Carousel::new(3).next().counter(), "2 / 3");
}

#[test]
fn gallery_falls_back_to_placeholder() {
    assert_eq!(gallery_images(&[]), vec![PLACEHOLDER_IMAGE.to_owned()]);
    let own = vec!["a.png".to_owned(), "b.png".to_owned()];
    assert_eq!(gallery_images(&own), own);
}
