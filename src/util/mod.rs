//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep validation, formatting and browser glue out of page
//! and component code so the rules can be unit tested without a DOM.

pub mod carousel;
pub mod email;
pub mod listing_view;
pub mod relative_date;
pub mod session;
