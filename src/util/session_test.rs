use super::*;

#[test]
fn auth_redirect_encodes_return_path() {
    assert_eq!(auth_redirect("/listing/42"), "/auth?redirect=%2Flisting%2F42");
}
