//! Star rating and comment form for a listing.

#[cfg(test)]
#[path = "rating_dialog_test.rs"]
mod rating_dialog_test;

use leptos::prelude::*;

use crate::net::types::RatingRequest;

pub const MAX_STARS: u8 = 5;

/// Star `n` is lit when the selection reaches it.
pub fn star_is_active(selected: u8, n: u8) -> bool {
    selected >= n
}

/// Build the request body from the form, or explain what is missing.
///
/// # Errors
///
/// Returns a user-facing message when no star rating is selected.
pub fn build_rating(stars: u8, comment: &str) -> Result<RatingRequest, &'static str> {
    if !(1..=MAX_STARS).contains(&stars) {
        return Err("Please select a rating");
    }
    let comment = comment.trim();
    Ok(RatingRequest {
        rating: stars,
        comment: (!comment.is_empty()).then(|| comment.to_owned()),
    })
}

/// Modal collecting 1-5 stars and an optional comment.
#[component]
pub fn RatingDialog(
    open: RwSignal<bool>,
    busy: RwSignal<bool>,
    title: String,
    on_submit: Callback<RatingRequest>,
) -> impl IntoView {
    let stars = RwSignal::new(0_u8);
    let comment = RwSignal::new(String::new());
    let error = RwSignal::new(None::<&'static str>);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        match build_rating(stars.get(), &comment.get()) {
            Ok(request) => {
                error.set(None);
                on_submit.run(request);
            }
            Err(message) => error.set(Some(message)),
        }
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| open.set(false)></div>
            <form class="dialog rating-dialog" on:submit=submit>
                <h2 class="dialog__title">"Rate this Item"</h2>
                <p class="dialog__subtitle">{title.clone()}</p>
                <div class="star-picker" role="radiogroup" aria-label="Rating">
                    {(1..=MAX_STARS)
                        .map(|n| {
                            view! {
                                <button
                                    type="button"
                                    class="star-picker__star"
                                    class:star-picker__star--active={move || star_is_active(stars.get(), n)}
                                    aria-label=format!("{n} stars")
                                    on:click=move |_| stars.set(n)
                                >
                                    "★"
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <textarea
                    class="dialog__input rating-dialog__comment"
                    placeholder="Share your experience (optional)"
                    prop:value=move || comment.get()
                    on:input=move |ev| comment.set(event_target_value(&ev))
                ></textarea>
                <Show when=move || error.get().is_some()>
                    <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="button button--ghost" type="button" on:click=move |_| open.set(false)>
                        "Cancel"
                    </button>
                    <button class="button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Submitting..." } else { "Submit Rating" }}
                    </button>
                </div>
            </form>
        </Show>
    }
}
