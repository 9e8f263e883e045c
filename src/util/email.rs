//! University email gate.
//!
//! Accepts exactly the addresses matched by `^[^\s@]+@[^\s@]+\.edu$`
//! (case-insensitive): one `@`, no whitespace anywhere, a non-empty local
//! part, and a domain with at least one character before a trailing `.edu`.

#[cfg(test)]
#[path = "email_test.rs"]
mod email_test;

const EDU_SUFFIX: &str = ".edu";

/// Whether `email` is a university `.edu` address.
pub fn is_edu_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some(split) = domain.len().checked_sub(EDU_SUFFIX.len()) else {
        return false;
    };
    match (domain.get(..split), domain.get(split..)) {
        (Some(head), Some(tail)) => !head.is_empty() && tail.eq_ignore_ascii_case(EDU_SUFFIX),
        _ => false,
    }
}

/// Live feedback shown under the sign-up email field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailFeedback {
    /// Nothing typed yet.
    Empty,
    Valid,
    Invalid,
}

impl EmailFeedback {
    pub fn for_input(email: &str) -> Self {
        if email.is_empty() {
            Self::Empty
        } else if is_edu_email(email) {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Valid => Some("✓ Valid university email"),
            Self::Invalid => Some("Please use your university .edu email address"),
        }
    }
}
