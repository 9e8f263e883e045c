//! Single listing view: gallery, seller card, purchase and rating flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routed at `/listing/:id`. The listing and its ratings load as two
//! independent resources so a new review only refetches the ratings, and a
//! purchase refetches the listing (stock, sold flag).
//!
//! ERROR HANDLING
//! ==============
//! Load failures render a "Listing Not Found" card. Action failures surface
//! as error toasts carrying the server's message when one was sent. Actions
//! that need a session redirect to `/auth` with a return path.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::navbar::Navbar;
use crate::components::purchase_dialog::PurchaseDialog;
use crate::components::rating_dialog::RatingDialog;
use crate::components::ratings_list::RatingsList;
use crate::config::HOME_ROUTE;
use crate::net::error::ApiError;
use crate::net::types::{Listing, Rating, RatingRequest};
use crate::pages::listing_actions::{ActionOutcome, load_failure_message};
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::carousel::{Carousel, gallery_images};
use crate::util::listing_view::{
    PrimaryAction, admin_user_link, can_rate, explore_link, format_price, listing_link, primary_action,
    rating_summary, seller_display_name, seller_initial, seller_profile_link, status_badges,
};
use crate::util::relative_date::format_posted;
use crate::util::session::auth_redirect;

/// Toast the outcome and follow its navigation, if any.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn apply_outcome(toasts: RwSignal<ToastState>, navigate: &impl Fn(&str, NavigateOptions), outcome: &ActionOutcome) {
    toasts.update(|t| {
        t.push(outcome.kind, outcome.message.clone());
    });
    if let Some(path) = &outcome.navigate_to {
        navigate(path, NavigateOptions::default());
    }
}

/// Token and user id of the signed-in viewer, or a redirect to `/auth`.
fn require_session(
    auth: RwSignal<AuthState>,
    toasts: RwSignal<ToastState>,
    navigate: &impl Fn(&str, NavigateOptions),
    message: &str,
    return_to: &str,
) -> Option<(String, String)> {
    let state = auth.get_untracked();
    let session = state
        .credentials()
        .and_then(|(token, user)| user.id().map(|id| (token.to_owned(), id)));
    if session.is_none() {
        toasts.update(|t| {
            t.error(message);
        });
        navigate(&auth_redirect(return_to), NavigateOptions::default());
    }
    session
}

#[component]
pub fn ListingDetailPage() -> impl IntoView {
    let params = use_params_map();
    let listing_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());

    let listing = LocalResource::new(move || {
        let id = listing_id.get();
        async move { crate::net::api::fetch_listing(&id).await }
    });
    let ratings = LocalResource::new(move || {
        let id = listing_id.get();
        async move { crate::net::api::fetch_listing_ratings(&id).await }
    });

    view! {
        <div class="page listing-page">
            <Navbar/>
            <div class="listing-page__container">
                <Suspense fallback=move || view! { <p class="muted">"Loading listing..."</p> }>
                    {move || {
                        listing
                            .get()
                            .map(|result| match result {
                                Ok(item) => view! { <ListingDetail listing=item listing_res=listing ratings=ratings/> }.into_any(),
                                Err(e) => {
                                    log::warn!("loading listing failed: {e}");
                                    view! { <NotFound message=load_failure_message(&e)/> }.into_any()
                                }
                            })
                    }}
                </Suspense>
            </div>
        </div>
    }
}

#[component]
fn NotFound(message: &'static str) -> impl IntoView {
    view! {
        <div class="card not-found">
            <h1 class="not-found__title">"Listing Not Found"</h1>
            <p class="muted">{message}</p>
            <a class="button" href=HOME_ROUTE>"Back to Browse"</a>
        </div>
    }
}

#[component]
fn ListingDetail(
    listing: Listing,
    listing_res: LocalResource<Result<Listing, ApiError>>,
    ratings: LocalResource<Result<Vec<Rating>, ApiError>>,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let images = gallery_images(&listing.images);
    let carousel = RwSignal::new(Carousel::new(images.len()));
    let show_purchase = RwSignal::new(false);
    let show_rating = RwSignal::new(false);
    let purchasing = RwSignal::new(false);
    let rating_busy = RwSignal::new(false);
    let admin_busy = RwSignal::new(false);

    let here = listing_link(&listing.id);
    let viewer_id = Memo::new(move |_| auth.get().user_id());
    let is_admin = Memo::new(move |_| auth.get().is_admin());
    let balance = Signal::derive(move || auth.get().user.and_then(|u| u.balance()));

    let action = {
        let listing = listing.clone();
        Memo::new(move |_| primary_action(&listing, viewer_id.get().as_deref()))
    };
    let rateable = {
        let listing = listing.clone();
        Memo::new(move |_| can_rate(&listing, viewer_id.get().as_deref()))
    };

    let on_buy = {
        let navigate = navigate.clone();
        let here = here.clone();
        move |_| {
            if require_session(auth, toasts, &navigate, "Please log in to purchase items", &here).is_some() {
                show_purchase.set(true);
            }
        }
    };

    let on_confirm_purchase = {
        let navigate = navigate.clone();
        let here = here.clone();
        let id = listing.id.clone();
        Callback::new(move |quantity: u32| {
            let Some((token, _)) = require_session(auth, toasts, &navigate, "Please log in to purchase items", &here)
            else {
                return;
            };
            #[cfg(feature = "hydrate")]
            {
                let id = id.clone();
                let navigate = navigate.clone();
                purchasing.set(true);
                leptos::task::spawn_local(async move {
                    let result = crate::net::api::purchase_listing(&token, &id, quantity).await;
                    purchasing.set(false);
                    let outcome = crate::pages::listing_actions::purchase_outcome(&result);
                    apply_outcome(toasts, &navigate, &outcome);
                    if let Ok(receipt) = result {
                        show_purchase.set(false);
                        debit_balance(auth, receipt.total_price);
                        crate::util::session::refresh_user(auth).await;
                        listing_res.refetch();
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&id, token, quantity, purchasing, listing_res);
            }
        })
    };

    let on_message = {
        let navigate = navigate.clone();
        let here = here.clone();
        let seller_id = listing.seller_id.clone();
        let title = listing.title.clone();
        move |_| {
            let Some((token, user_id)) =
                require_session(auth, toasts, &navigate, "Please log in to message the seller", &here)
            else {
                return;
            };
            let Some(seller_id) = seller_id.clone() else {
                toasts.update(|t| {
                    t.error("Seller information not available");
                });
                return;
            };
            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                let title = title.clone();
                leptos::task::spawn_local(async move {
                    let request = crate::net::types::CreateChatRequest {
                        participant_a_id: user_id,
                        participant_b_id: seller_id,
                    };
                    let result = crate::net::api::create_chat(&token, &request).await;
                    let outcome = crate::pages::listing_actions::chat_outcome(&result, &title);
                    apply_outcome(toasts, &navigate, &outcome);
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, user_id, seller_id, &title);
            }
        }
    };

    let on_rate = {
        let navigate = navigate.clone();
        let here = here.clone();
        move |_| {
            if require_session(auth, toasts, &navigate, "Please log in to rate this listing", &here).is_some() {
                show_rating.set(true);
            }
        }
    };

    let on_submit_rating = {
        let navigate = navigate.clone();
        let here = here.clone();
        let id = listing.id.clone();
        Callback::new(move |request: RatingRequest| {
            let Some((token, _)) = require_session(auth, toasts, &navigate, "Please log in to rate this listing", &here)
            else {
                return;
            };
            #[cfg(feature = "hydrate")]
            {
                let id = id.clone();
                let navigate = navigate.clone();
                rating_busy.set(true);
                leptos::task::spawn_local(async move {
                    let result = crate::net::api::rate_listing(&token, &id, &request).await;
                    rating_busy.set(false);
                    let outcome = crate::pages::listing_actions::rating_outcome(&result);
                    apply_outcome(toasts, &navigate, &outcome);
                    if result.is_ok() {
                        show_rating.set(false);
                        ratings.refetch();
                        listing_res.refetch();
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&id, token, request, rating_busy, ratings, listing_res);
            }
        })
    };

    let on_share = move |_| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let copied = copy_page_link().await;
                if let Err(e) = &copied {
                    log::warn!("copying link failed: {e:?}");
                }
                let outcome = crate::pages::listing_actions::share_outcome(copied.is_ok());
                toasts.update(|t| {
                    t.push(outcome.kind, outcome.message);
                });
            });
        }
    };

    let on_ban = {
        let navigate = navigate.clone();
        let here = here.clone();
        let seller_id = listing.seller_id.clone();
        move |_| {
            let Some((token, _)) = require_session(auth, toasts, &navigate, "Please log in as an admin", &here) else {
                return;
            };
            let Some(seller_id) = seller_id.clone() else {
                toasts.update(|t| {
                    t.error("Seller information not available");
                });
                return;
            };
            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                admin_busy.set(true);
                leptos::task::spawn_local(async move {
                    let result = crate::net::api::ban_user(&token, &seller_id).await;
                    admin_busy.set(false);
                    apply_outcome(toasts, &navigate, &crate::pages::listing_actions::ban_outcome(&result));
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, seller_id);
            }
        }
    };

    let on_delete = {
        let navigate = navigate.clone();
        let here = here.clone();
        let id = listing.id.clone();
        move |_| {
            let Some((token, _)) = require_session(auth, toasts, &navigate, "Please log in as an admin", &here) else {
                return;
            };
            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                let id = id.clone();
                admin_busy.set(true);
                leptos::task::spawn_local(async move {
                    let result = crate::net::api::delete_listing(&token, &id).await;
                    admin_busy.set(false);
                    apply_outcome(toasts, &navigate, &crate::pages::listing_actions::delete_outcome(&result));
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, &id);
            }
        }
    };

    let on_view_seller = {
        let navigate = navigate.clone();
        let seller_id = listing.seller_id.clone();
        move |_| {
            if let Some(id) = &seller_id {
                navigate(&admin_user_link(id), NavigateOptions::default());
            }
        }
    };

    let on_login = {
        let navigate = navigate.clone();
        let here = here.clone();
        move |_| navigate(&auth_redirect(&here), NavigateOptions::default())
    };

    let current_image = {
        let images = images.clone();
        move || images.get(carousel.get().index()).cloned().unwrap_or_default()
    };
    let thumbnails = images
        .iter()
        .enumerate()
        .map(|(i, src)| {
            view! {
                <button
                    class="gallery__thumb"
                    class:gallery__thumb--active=move || carousel.get().index() == i
                    on:click=move |_| carousel.update(|c| *c = c.select(i))
                >
                    <img src=src.clone() alt=format!("Image {}", i + 1)/>
                </button>
            }
        })
        .collect_view();

    let seller_link = listing.seller_id.as_deref().map(seller_profile_link);
    let seller_name = seller_display_name(&listing);
    let condition = listing.condition.clone();
    let pickup = listing.pickup_location.clone();
    let tags = listing.tags.clone();
    let explore = explore_link(&listing.category);
    let title = listing.title.clone();

    view! {
        <div class="listing-detail">
            <section class="gallery">
                <img class="gallery__main" src=current_image alt=title.clone()/>
                <Show when=move || carousel.get().has_controls()>
                    <button class="gallery__nav gallery__nav--prev" on:click=move |_| carousel.update(|c| *c = c.prev())>
                        "‹"
                    </button>
                    <button class="gallery__nav gallery__nav--next" on:click=move |_| carousel.update(|c| *c = c.next())>
                        "›"
                    </button>
                    <span class="gallery__counter">{move || carousel.get().counter()}</span>
                </Show>
                {carousel.get_untracked().has_controls().then(|| view! { <div class="gallery__thumbs">{thumbnails}</div> })}
            </section>

            <section class="card listing-detail__info">
                <div class="listing-detail__badges">
                    <span class="badge badge--secondary">{listing.category.clone()}</span>
                    {status_badges(&listing)
                        .into_iter()
                        .map(|badge| view! { <span class=badge.class()>{badge.label()}</span> })
                        .collect_view()}
                </div>
                <h1 class="listing-detail__title">{title.clone()}</h1>
                <p class="listing-detail__rating">"★ " {rating_summary(&listing)}</p>
                <p class="listing-detail__price">{format_price(listing.price)}</p>
                <p class="listing-detail__stock">{format!("{} available", listing.stock)}</p>
                <dl class="listing-detail__facts">
                    <dt>"Category"</dt>
                    <dd>{listing.category.clone()}</dd>
                    {condition.map(|c| view! { <dt>"Condition"</dt><dd>{c}</dd> })}
                    {pickup.map(|p| view! { <dt>"Pickup"</dt><dd>{p}</dd> })}
                </dl>
                <p class="listing-detail__meta muted">
                    {listing.created_at.as_deref().map(|raw| format!("Posted {}", format_posted(raw)))}
                    " · "
                    {format!("{} views", listing.views)}
                </p>
                <p class="listing-detail__description">{listing.description.clone()}</p>
                <SafetyTips/>
                {(!tags.is_empty())
                    .then(|| {
                        view! {
                            <ul class="listing-detail__tags">
                                {tags.iter().map(|tag| view! { <li class="tag">{format!("#{tag}")}</li> }).collect_view()}
                            </ul>
                        }
                    })}

                <div class="listing-detail__actions">
                    {move || match action.get() {
                        current @ PrimaryAction::BuyNow { .. } => {
                            view! {
                                <button class="button" disabled=current.is_disabled() on:click=on_buy.clone()>
                                    {current.label()}
                                </button>
                                <button class="button button--ghost" on:click=on_message.clone()>
                                    "Message Seller"
                                </button>
                            }
                                .into_any()
                        }
                        current @ PrimaryAction::LoginToPurchase => {
                            view! { <button class="button" on:click=on_login.clone()>{current.label()}</button> }
                                .into_any()
                        }
                        current => {
                            view! { <button class="button" disabled=current.is_disabled()>{current.label()}</button> }
                                .into_any()
                        }
                    }}
                    <Show when=move || rateable.get()>
                        <button class="button button--ghost" on:click=on_rate.clone()>"Rate this Item"</button>
                    </Show>
                    <button class="button button--ghost" on:click=on_share>"Share"</button>
                </div>
            </section>

            <section class="card seller-card">
                <span class="seller-card__avatar">{seller_initial(&listing)}</span>
                <div class="seller-card__body">
                    <p class="seller-card__name">
                        {match seller_link {
                            Some(href) => view! { <a href=href>{seller_name.clone()}</a> }.into_any(),
                            None => view! { <span>{seller_name.clone()}</span> }.into_any(),
                        }}
                    </p>
                    {listing.seller_email.clone().map(|email| view! { <p class="muted">{email}</p> })}
                </div>
            </section>

            <Show when=move || is_admin.get()>
                <section class="card admin-panel">
                    <h2 class="admin-panel__title">"Admin Actions"</h2>
                    <button class="button button--ghost" on:click=on_view_seller.clone()>"View Seller Profile"</button>
                    <button class="button button--danger" disabled=move || admin_busy.get() on:click=on_ban.clone()>
                        "Ban Seller"
                    </button>
                    <button class="button button--danger" disabled=move || admin_busy.get() on:click=on_delete.clone()>
                        "Delete Listing"
                    </button>
                </section>
            </Show>

            <a class="listing-detail__explore" href=explore>
                {format!("Explore More in {}", listing.category)}
            </a>

            <RatingsList ratings=ratings/>

            <PurchaseDialog
                open=show_purchase
                busy=purchasing
                title=title.clone()
                price=listing.price
                stock=listing.stock
                balance=balance
                on_confirm=on_confirm_purchase
            />
            <RatingDialog open=show_rating busy=rating_busy title=title on_submit=on_submit_rating/>
        </div>
    }
}

#[component]
fn SafetyTips() -> impl IntoView {
    view! {
        <aside class="card safety-tips">
            <h3 class="safety-tips__title">"Safety Tips"</h3>
            <ul class="safety-tips__list">
                <li>"Meet in a public place on campus"</li>
                <li>"Inspect the item before purchasing"</li>
                <li>"Never share financial information via messages"</li>
                <li>"Report suspicious listings immediately"</li>
            </ul>
        </aside>
    }
}

/// Write the current page URL to the clipboard, resolving once the browser
/// has accepted it.
#[cfg(feature = "hydrate")]
async fn copy_page_link() -> Result<(), wasm_bindgen::JsValue> {
    let window = web_sys::window().ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))?;
    let href = window.location().href()?;
    let promise = window.navigator().clipboard().write_text(&href);
    wasm_bindgen_futures::JsFuture::from(promise).await.map(|_| ())
}

/// Optimistically subtract a purchase from the cached balance before the
/// authoritative user record arrives.
#[cfg(feature = "hydrate")]
fn debit_balance(auth: RwSignal<AuthState>, total: Option<f64>) {
    let balance = auth.get_untracked().user.and_then(|u| u.balance());
    if let (Some(total), Some(balance)) = (total, balance) {
        let mut partial = serde_json::Map::new();
        partial.insert("balance".to_owned(), serde_json::json!(balance - total));
        crate::util::session::update_user(auth, partial);
    }
}
