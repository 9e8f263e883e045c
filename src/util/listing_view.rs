//! Presentation decisions for listing pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Listing detail and browse views stay declarative by asking these helpers
//! which badges, labels, links and actions apply to a listing for the
//! current viewer.

#[cfg(test)]
#[path = "listing_view_test.rs"]
mod listing_view_test;

use crate::net::error::ApiError;
use crate::net::types::Listing;

/// Badge shown next to the category on the detail card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusBadge {
    Available,
    Sold,
    Reported,
}

impl StatusBadge {
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Sold => "Sold",
            Self::Reported => "Reported",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Available => "badge badge--success",
            Self::Sold => "badge badge--danger",
            Self::Reported => "badge badge--warning",
        }
    }
}

pub fn status_badges(listing: &Listing) -> Vec<StatusBadge> {
    let mut badges = Vec::new();
    if !listing.is_sold && !listing.is_reported {
        badges.push(StatusBadge::Available);
    }
    if listing.is_sold {
        badges.push(StatusBadge::Sold);
    }
    if listing.is_reported {
        badges.push(StatusBadge::Reported);
    }
    badges
}

/// `"4.5/5 (2 reviews)"`, or `"N/A"` when unrated.
pub fn rating_summary(listing: &Listing) -> String {
    match listing.average_rating.filter(|avg| *avg > 0.0) {
        Some(avg) => {
            let noun = if listing.total_ratings == 1 { "review" } else { "reviews" };
            format!("{avg}/5 ({} {noun})", listing.total_ratings)
        }
        None => "N/A".to_owned(),
    }
}

pub fn format_price(price: f64) -> String {
    format!("${price}")
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Upper-cased first character of the seller's name or email, else `"U"`.
pub fn seller_initial(listing: &Listing) -> String {
    non_blank(listing.seller_name.as_ref())
        .or_else(|| non_blank(listing.seller_email.as_ref()))
        .and_then(|s| s.chars().next())
        .map_or_else(|| "U".to_owned(), |c| c.to_uppercase().collect())
}

pub fn seller_display_name(listing: &Listing) -> String {
    non_blank(listing.seller_name.as_ref())
        .or_else(|| non_blank(listing.seller_email.as_ref()))
        .unwrap_or("Anonymous User")
        .to_owned()
}

fn is_seller(listing: &Listing, viewer_id: Option<&str>) -> bool {
    matches!((listing.seller_id.as_deref(), viewer_id), (Some(seller), Some(viewer)) if seller == viewer)
}

/// Main call-to-action on the detail card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    /// "Buy Now" plus "Message Seller". Buying is disabled when out of stock.
    BuyNow { out_of_stock: bool },
    Sold,
    OwnListing,
    LoginToPurchase,
}

impl PrimaryAction {
    /// Button text. Out of stock keeps "Buy Now" and only disables it.
    pub fn label(self) -> &'static str {
        match self {
            Self::BuyNow { .. } => "Buy Now",
            Self::Sold => "Item Sold",
            Self::OwnListing => "Your Listing",
            Self::LoginToPurchase => "Login to Purchase",
        }
    }

    pub fn is_disabled(self) -> bool {
        match self {
            Self::BuyNow { out_of_stock } => out_of_stock,
            Self::Sold | Self::OwnListing => true,
            Self::LoginToPurchase => false,
        }
    }
}

pub fn primary_action(listing: &Listing, viewer_id: Option<&str>) -> PrimaryAction {
    if listing.is_sold {
        return PrimaryAction::Sold;
    }
    match viewer_id {
        Some(_) if is_seller(listing, viewer_id) => PrimaryAction::OwnListing,
        Some(_) => PrimaryAction::BuyNow { out_of_stock: listing.stock == 0 },
        None => PrimaryAction::LoginToPurchase,
    }
}

/// Signed-in viewers may rate anything they are not selling.
pub fn can_rate(listing: &Listing, viewer_id: Option<&str>) -> bool {
    viewer_id.is_some() && !is_seller(listing, viewer_id)
}

pub fn listing_link(id: &str) -> String {
    format!("/listing/{}", urlencoding::encode(id))
}

pub fn explore_link(category: &str) -> String {
    format!("/browse?category={}", urlencoding::encode(category))
}

pub fn seller_profile_link(seller_id: &str) -> String {
    format!("/user/{}", urlencoding::encode(seller_id))
}

pub fn admin_user_link(seller_id: &str) -> String {
    format!("/admin/user/{}", urlencoding::encode(seller_id))
}

pub fn chat_greeting(title: &str) -> String {
    format!("Hi! I'm interested in your listing: {title}")
}

/// Messages route opening `chat_id` with the greeting pre-filled.
pub fn new_chat_link(chat_id: &str, title: &str) -> String {
    format!(
        "/messages?chat={}&initial={}",
        urlencoding::encode(chat_id),
        urlencoding::encode(&chat_greeting(title))
    )
}

/// A 400 whose `message` mentions "already exists" means the conversation is
/// already open. `detail` is not consulted.
pub fn is_existing_chat(err: &ApiError) -> bool {
    err.status() == Some(400) && err.message_field().is_some_and(|m| m.contains("already exists"))
}

pub fn purchase_success_message(transaction_id: &str) -> String {
    format!("Purchase successful! Transaction ID: {transaction_id}")
}
