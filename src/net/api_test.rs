use super::*;

#[test]
fn listing_filter_empty_has_no_query() {
    assert_eq!(ListingFilter::default().query_string(), "");
    let blank = ListingFilter { category: Some("  ".to_owned()), search: None };
    assert_eq!(blank.query_string(), "");
}

#[test]
fn listing_filter_encodes_values() {
    let filter = ListingFilter {
        category: Some("Books & Notes".to_owned()),
        search: Some("calc 2".to_owned()),
    };
    assert_eq!(filter.query_string(), "?category=Books%20%26%20Notes&search=calc%202");
    assert_eq!(listings_endpoint(&filter), "/api/listings?category=Books%20%26%20Notes&search=calc%202");
}

#[test]
fn listing_endpoints_format_expected_paths() {
    assert_eq!(listing_endpoint("l1"), "/api/listings/l1");
    assert_eq!(purchase_endpoint("l1"), "/api/listings/l1/purchase");
    assert_eq!(ratings_endpoint("l1"), "/api/listings/l1/ratings");
}

#[test]
fn admin_endpoints_format_expected_paths() {
    assert_eq!(admin_listing_endpoint("l1"), "/api/admin/listings/l1");
    assert_eq!(ban_user_endpoint("u9"), "/api/admin/users/u9/ban");
}

#[test]
fn path_segments_are_escaped() {
    assert_eq!(listing_endpoint("a/b"), "/api/listings/a%2Fb");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("tok"), "Bearer tok");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn endpoints_are_unavailable_without_browser() {
    let result = futures::executor::block_on(fetch_listing("l1"));
    assert_eq!(result, Err(ApiError::Unavailable));
}
