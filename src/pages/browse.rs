//! Listing grid with category and search filters.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public landing route. Filters live in the query string so links such as
//! "Explore More" on a detail page open a pre-filtered grid.

#[cfg(test)]
#[path = "browse_test.rs"]
mod browse_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::listing_card::ListingCard;
use crate::components::navbar::Navbar;
use crate::net::api::ListingFilter;

/// Categories offered in the filter dropdown.
pub const CATEGORIES: &[&str] = &["Books", "Electronics", "Furniture", "Clothing", "Tickets", "Other"];

/// Build a filter from raw query values, ignoring blanks.
pub fn filter_from_query(category: Option<String>, search: Option<String>) -> ListingFilter {
    let clean = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
    ListingFilter { category: clean(category), search: clean(search) }
}

/// Browse route for a filter, e.g. `/browse?category=Books`.
pub fn browse_link(filter: &ListingFilter) -> String {
    format!("/browse{}", filter.query_string())
}

#[component]
pub fn BrowsePage() -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();
    let filter = Memo::new(move |_| {
        let q = query.read();
        filter_from_query(q.get("category"), q.get("search"))
    });
    let search_input = RwSignal::new(filter.get_untracked().search.unwrap_or_default());

    let listings = LocalResource::new(move || {
        let filter = filter.get();
        async move { crate::net::api::fetch_listings(&filter).await }
    });

    let apply = move |category: Option<String>, search: Option<String>| {
        let link = browse_link(&filter_from_query(category, search));
        navigate(&link, NavigateOptions::default());
    };

    let on_search = {
        let apply = apply.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            apply(filter.get_untracked().category, Some(search_input.get()));
        }
    };

    let on_category = move |ev: leptos::ev::Event| {
        apply(Some(event_target_value(&ev)), filter.get_untracked().search);
    };

    view! {
        <div class="page browse-page">
            <Navbar/>
            <div class="browse-page__container">
                <form class="browse-filters" on:submit=on_search>
                    <input
                        class="field__input browse-filters__search"
                        type="search"
                        placeholder="Search listings"
                        prop:value=move || search_input.get()
                        on:input=move |ev| search_input.set(event_target_value(&ev))
                    />
                    <select
                        class="field__input browse-filters__category"
                        prop:value=move || filter.get().category.unwrap_or_default()
                        on:change=on_category
                    >
                        <option value="">"All categories"</option>
                        {CATEGORIES
                            .iter()
                            .map(|c| view! { <option value=*c>{*c}</option> })
                            .collect_view()}
                    </select>
                    <button class="button" type="submit">"Search"</button>
                </form>
                <Suspense fallback=move || view! { <p class="muted">"Loading listings..."</p> }>
                    {move || {
                        listings
                            .get()
                            .map(|result| match result {
                                Ok(items) if items.is_empty() => {
                                    view! { <p class="muted">"No listings found."</p> }.into_any()
                                }
                                Ok(items) => {
                                    view! {
                                        <div class="listing-grid">
                                            {items
                                                .into_iter()
                                                .map(|listing| view! { <ListingCard listing=listing/> })
                                                .collect_view()}
                                        </div>
                                    }
                                        .into_any()
                                }
                                Err(e) => {
                                    log::warn!("loading listings failed: {e}");
                                    view! { <p class="form-error">"Failed to load listings."</p> }.into_any()
                                }
                            })
                    }}
                </Suspense>
            </div>
        </div>
    }
}
