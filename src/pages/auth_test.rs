use super::*;

#[test]
fn redirect_target_defaults_to_browse() {
    assert_eq!(redirect_target(None), "/browse");
    assert_eq!(redirect_target(Some(String::new())), "/browse");
}

#[test]
fn redirect_target_keeps_local_paths_only() {
    assert_eq!(redirect_target(Some("/listing/42".to_owned())), "/listing/42");
    assert_eq!(redirect_target(Some("https://evil.example".to_owned())), "/browse");
    assert_eq!(redirect_target(Some("//evil.example".to_owned())), "/browse");
}

#[test]
fn passwords_differ_only_when_both_filled() {
    assert!(!passwords_differ("", "abc"));
    assert!(!passwords_differ("abc", ""));
    assert!(!passwords_differ("abc", "abc"));
    assert!(passwords_differ("abc", "abd"));
}

#[test]
fn check_passwords_reports_mismatch() {
    assert_eq!(check_passwords("a", "a"), Ok(()));
    let err = check_passwords("a", "b").expect_err("mismatch");
    assert_eq!(err, AuthError::PasswordMismatch);
    assert_eq!(err.to_string(), "Passwords do not match");
}

#[test]
fn signup_submit_requires_valid_email_matching_passwords_and_idle() {
    assert!(can_submit_signup("a@b.edu", "pw", "pw", false));
    assert!(!can_submit_signup("a@b.com", "pw", "pw", false));
    assert!(!can_submit_signup("a@b.edu", "pw", "px", false));
    assert!(!can_submit_signup("a@b.edu", "pw", "pw", true));
    assert!(!can_submit_signup("", "", "", false));
}
