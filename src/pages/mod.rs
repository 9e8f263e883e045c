//! Routed pages. Each page owns its data loading and remote actions.

pub mod auth;
pub mod browse;
pub mod listing_actions;
pub mod listing_detail;
