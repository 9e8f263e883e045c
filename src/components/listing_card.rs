//! Card for one listing in the browse grid.

use leptos::prelude::*;

use crate::net::types::Listing;
use crate::util::carousel::gallery_images;
use crate::util::listing_view::{format_price, listing_link};

/// A clickable card linking to the listing detail page.
#[component]
pub fn ListingCard(listing: Listing) -> impl IntoView {
    let href = listing_link(&listing.id);
    let cover = gallery_images(&listing.images).into_iter().next().unwrap_or_default();
    let sold = listing.is_sold;

    view! {
        <a class="listing-card" class:listing-card--sold=sold href=href>
            <img class="listing-card__image" src=cover alt=listing.title.clone()/>
            <div class="listing-card__body">
                <span class="listing-card__title">{listing.title}</span>
                <span class="listing-card__price">{format_price(listing.price)}</span>
                <span class="listing-card__category">{listing.category}</span>
                <Show when=move || sold>
                    <span class="badge badge--danger">"Sold"</span>
                </Show>
            </div>
        </a>
    }
}
