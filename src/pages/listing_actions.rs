//! Result handling for listing detail actions.
//!
//! DESIGN
//! ======
//! Each remote action maps its `Result` to an `ActionOutcome`: the toast to
//! show and where to navigate, if anywhere. The page applies outcomes; the
//! mapping itself stays free of signals so it can be tested directly.

#[cfg(test)]
#[path = "listing_actions_test.rs"]
mod listing_actions_test;

use crate::net::error::ApiError;
use crate::net::types::{Chat, PurchaseResult};
use crate::state::toast::ToastKind;
use crate::util::listing_view::{is_existing_chat, new_chat_link, purchase_success_message};

/// What the page should do once an action settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub kind: ToastKind,
    pub message: String,
    pub navigate_to: Option<String>,
}

impl ActionOutcome {
    fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into(), navigate_to: None }
    }

    fn failure(err: &ApiError, fallback: &str) -> Self {
        Self { kind: ToastKind::Error, message: err.user_message(fallback), navigate_to: None }
    }

    fn then_navigate(mut self, path: impl Into<String>) -> Self {
        self.navigate_to = Some(path.into());
        self
    }

    pub fn succeeded(&self) -> bool {
        self.kind != ToastKind::Error
    }
}

pub fn purchase_outcome(result: &Result<PurchaseResult, ApiError>) -> ActionOutcome {
    match result {
        Ok(receipt) => ActionOutcome::success(purchase_success_message(&receipt.transaction_id)),
        Err(e) => {
            log::warn!("purchase failed: {e}");
            ActionOutcome::failure(e, "Purchase failed")
        }
    }
}

/// A chat that already exists is not an error: the user is sent to their inbox.
pub fn chat_outcome(result: &Result<Chat, ApiError>, listing_title: &str) -> ActionOutcome {
    match result {
        Ok(chat) => ActionOutcome::success("Chat started successfully!").then_navigate(new_chat_link(&chat.id, listing_title)),
        Err(e) if is_existing_chat(e) => ActionOutcome {
            kind: ToastKind::Info,
            message: "Redirected to your existing conversation".to_owned(),
            navigate_to: Some("/messages".to_owned()),
        },
        Err(e) => {
            log::warn!("starting chat failed: {e}");
            ActionOutcome::failure(e, "Failed to start chat")
        }
    }
}

pub fn rating_outcome(result: &Result<(), ApiError>) -> ActionOutcome {
    match result {
        Ok(()) => ActionOutcome::success("Rating submitted"),
        Err(e) => ActionOutcome::failure(e, "Failed to submit rating"),
    }
}

pub fn delete_outcome(result: &Result<(), ApiError>) -> ActionOutcome {
    match result {
        Ok(()) => ActionOutcome::success("Listing deleted successfully").then_navigate("/admin"),
        Err(e) => ActionOutcome::failure(e, "Failed to delete listing"),
    }
}

pub fn ban_outcome(result: &Result<(), ApiError>) -> ActionOutcome {
    match result {
        Ok(()) => ActionOutcome::success("User banned successfully"),
        Err(e) => ActionOutcome::failure(e, "Failed to ban user"),
    }
}

/// Toast for the Share button once the clipboard write has settled.
pub fn share_outcome(copied: bool) -> ActionOutcome {
    if copied {
        ActionOutcome::success("Link copied to clipboard")
    } else {
        ActionOutcome { kind: ToastKind::Error, message: "Could not copy link".to_owned(), navigate_to: None }
    }
}

/// Message for the "Listing Not Found" card.
pub fn load_failure_message(err: &ApiError) -> &'static str {
    if err.status() == Some(404) {
        "This listing doesn't exist or has been removed."
    } else {
        "Failed to load listing details."
    }
}
