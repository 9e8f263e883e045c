use super::*;

#[test]
fn api_base_has_no_trailing_slash() {
    assert!(!api_base().ends_with('/'));
    assert!(!api_base().is_empty());
}

#[test]
fn api_url_joins_base_and_path() {
    let url = api_url("/api/auth/me");
    assert!(url.starts_with(api_base()));
    assert!(url.ends_with("/api/auth/me"));
}
