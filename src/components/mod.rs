//! Reusable UI components.
//!
//! ARCHITECTURE
//! ============
//! Components render data handed to them and report user intent through
//! callbacks; API calls stay in the pages that own the data.

pub mod listing_card;
pub mod navbar;
pub mod purchase_dialog;
pub mod rating_dialog;
pub mod ratings_list;
pub mod toast_host;
