use super::*;
use serde_json::json;

fn user(value: Value) -> User {
    serde_json::from_value(value).expect("user object")
}

// =============================================================
// User
// =============================================================

#[test]
fn user_accessors_read_known_fields() {
    let u = user(json!({
        "id": 7,
        "email": "ana@state.edu",
        "username": "ana",
        "full_name": "Ana Lopez",
        "balance": 12.5,
        "is_admin": true
    }));
    assert_eq!(u.id().as_deref(), Some("7"));
    assert_eq!(u.email(), Some("ana@state.edu"));
    assert_eq!(u.full_name(), Some("Ana Lopez"));
    assert_eq!(u.balance(), Some(12.5));
    assert!(u.is_admin());
}

#[test]
fn user_id_accepts_mongo_style_key() {
    let u = user(json!({ "_id": "abc123" }));
    assert_eq!(u.id().as_deref(), Some("abc123"));
}

#[test]
fn user_is_admin_defaults_false() {
    assert!(!user(json!({ "id": 1 })).is_admin());
    assert!(!user(json!({ "id": 1, "is_admin": "yes" })).is_admin());
}

#[test]
fn user_display_name_falls_back_in_order() {
    assert_eq!(user(json!({ "full_name": "A B", "username": "ab" })).display_name(), "A B");
    assert_eq!(user(json!({ "full_name": " ", "username": "ab" })).display_name(), "ab");
    assert_eq!(user(json!({ "email": "x@y.edu" })).display_name(), "x@y.edu");
    assert_eq!(user(json!({})).display_name(), "Student");
}

#[test]
fn user_merge_overwrites_and_keeps_unknown_fields() {
    let mut u = user(json!({ "id": 1, "balance": 10, "campus": "north" }));
    let Value::Object(partial) = json!({ "balance": 50 }) else {
        unreachable!()
    };
    u.merge(partial);
    assert_eq!(
        serde_json::to_value(&u).expect("serialize"),
        json!({ "id": 1, "balance": 50, "campus": "north" })
    );
}

#[test]
fn user_rejects_non_object_json() {
    assert!(serde_json::from_str::<User>("null").is_err());
    assert!(serde_json::from_str::<User>("[1,2]").is_err());
    assert!(serde_json::from_str::<User>("{not json").is_err());
}

// =============================================================
// Error bodies
// =============================================================

#[test]
fn error_body_prefers_string_detail() {
    let body: ErrorBody = serde_json::from_value(json!({ "detail": "Invalid credentials", "message": "other" }))
        .expect("error body");
    assert_eq!(body.text().as_deref(), Some("Invalid credentials"));
}

#[test]
fn error_body_reads_first_validation_msg() {
    let body: ErrorBody = serde_json::from_value(json!({
        "detail": [{ "loc": ["body", "email"], "msg": "field required" }]
    }))
    .expect("error body");
    assert_eq!(body.text().as_deref(), Some("field required"));
}

#[test]
fn error_body_falls_back_to_message_then_none() {
    let body: ErrorBody = serde_json::from_value(json!({ "message": "Chat already exists" })).expect("error body");
    assert_eq!(body.text().as_deref(), Some("Chat already exists"));
    let empty: ErrorBody = serde_json::from_value(json!({ "detail": "" })).expect("error body");
    assert_eq!(empty.text(), None);
}

// =============================================================
// Listings and friends
// =============================================================

#[test]
fn listing_decodes_sparse_payload_with_defaults() {
    let listing: Listing = serde_json::from_value(json!({
        "id": 42,
        "title": "Calculus textbook",
        "stock": null,
        "images": null,
        "seller_id": 9
    }))
    .expect("listing");
    assert_eq!(listing.id, "42");
    assert_eq!(listing.stock, 0);
    assert!(listing.images.is_empty());
    assert_eq!(listing.seller_id.as_deref(), Some("9"));
    assert!(!listing.is_sold);
    assert_eq!(listing.average_rating, None);
}

#[test]
fn listing_accepts_underscore_id() {
    let listing: Listing = serde_json::from_value(json!({ "_id": "l-1", "title": "Desk lamp" })).expect("listing");
    assert_eq!(listing.id, "l-1");
}

#[test]
fn listing_without_id_is_rejected() {
    assert!(serde_json::from_value::<Listing>(json!({ "title": "?" })).is_err());
}

#[test]
fn purchase_response_unwraps_data_envelope() {
    let wrapped: PurchaseResponse =
        serde_json::from_value(json!({ "data": { "transaction_id": "tx-1" } })).expect("wrapped");
    assert_eq!(wrapped.into_result().transaction_id, "tx-1");
    let bare: PurchaseResponse = serde_json::from_value(json!({ "transaction_id": 55, "total_price": 20.0 })).expect("bare");
    let result = bare.into_result();
    assert_eq!(result.transaction_id, "55");
    assert_eq!(result.total_price, Some(20.0));
}

#[test]
fn chat_reads_underscore_id() {
    let chat: Chat = serde_json::from_value(json!({ "_id": "c1", "participant_a_id": 1, "participant_b_id": "2" }))
        .expect("chat");
    assert_eq!(chat.id, "c1");
    assert_eq!(chat.participant_a_id.as_deref(), Some("1"));
}

#[test]
fn rating_request_omits_missing_comment() {
    let body = serde_json::to_value(RatingRequest { rating: 4, comment: None }).expect("serialize");
    assert_eq!(body, json!({ "rating": 4 }));
}

#[test]
fn register_request_serializes_api_field_names() {
    let body = serde_json::to_value(RegisterRequest {
        username: "ana".to_owned(),
        email: "ana@state.edu".to_owned(),
        full_name: "Ana Lopez".to_owned(),
        university: "U123".to_owned(),
        password: "pw".to_owned(),
    })
    .expect("serialize");
    assert_eq!(
        body,
        json!({
            "username": "ana",
            "email": "ana@state.edu",
            "full_name": "Ana Lopez",
            "university": "U123",
            "password": "pw"
        })
    );
}
