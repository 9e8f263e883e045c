use super::*;

#[test]
fn accepts_plain_edu_addresses() {
    assert!(is_edu_email("student@university.edu"));
    assert!(is_edu_email("a.b+c@cs.state.edu"));
    assert!(is_edu_email("x@y.edu"));
}

#[test]
fn suffix_match_is_case_insensitive() {
    assert!(is_edu_email("Student@University.EDU"));
    assert!(is_edu_email("s@u.Edu"));
}

#[test]
fn rejects_non_edu_domains() {
    assert!(!is_edu_email("student@gmail.com"));
    assert!(!is_edu_email("student@university.edu.com"));
    assert!(!is_edu_email("student@university.education"));
    assert!(!is_edu_email("student@universityedu"));
}

#[test]
fn rejects_structural_problems() {
    assert!(!is_edu_email(""));
    assert!(!is_edu_email("@university.edu"));
    assert!(!is_edu_email("student@.edu"));
    assert!(!is_edu_email("student.edu"));
    assert!(!is_edu_email("a@b@c.edu"));
}

#[test]
fn rejects_whitespace_anywhere() {
    assert!(!is_edu_email(" student@university.edu"));
    assert!(!is_edu_email("student@university.edu "));
    assert!(!is_edu_email("stu dent@university.edu"));
    assert!(!is_edu_email("student@uni\tversity.edu"));
}

#[test]
fn dots_before_suffix_count_as_domain_characters() {
    assert!(is_edu_email("a@..edu"));
}

#[test]
fn multibyte_domains_do_not_panic() {
    assert!(!is_edu_email("a@é"));
    assert!(!is_edu_email("a@日本語"));
    assert!(is_edu_email("a@université.edu"));
}

#[test]
fn feedback_tracks_input_state() {
    assert_eq!(EmailFeedback::for_input(""), EmailFeedback::Empty);
    assert_eq!(EmailFeedback::for_input("a@b.edu"), EmailFeedback::Valid);
    assert_eq!(EmailFeedback::for_input("a@b.com"), EmailFeedback::Invalid);
    assert_eq!(EmailFeedback::Empty.message(), None);
    assert_eq!(
        EmailFeedback::Invalid.message(),
        Some("Please use your university .edu email address")
    );
}
