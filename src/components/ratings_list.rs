//! Reviews section under a listing.

use leptos::prelude::*;

use crate::net::error::ApiError;
use crate::net::types::Rating;
use crate::util::relative_date::format_posted;

/// Renders a ratings resource owned by the page so it can refetch after a new review.
#[component]
pub fn RatingsList(ratings: LocalResource<Result<Vec<Rating>, ApiError>>) -> impl IntoView {
    view! {
        <section class="ratings">
            <h2 class="ratings__title">"Ratings & Reviews"</h2>
            <Suspense fallback=move || view! { <p class="ratings__loading">"Loading reviews..."</p> }>
                {move || {
                    ratings
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <p class="ratings__empty">"No reviews yet."</p> }.into_any()
                            }
                            Ok(list) => {
                                view! {
                                    <ul class="ratings__list">
                                        {list.into_iter().map(render_rating).collect_view()}
                                    </ul>
                                }
                                    .into_any()
                            }
                            Err(_) => {
                                view! { <p class="ratings__error">"Failed to load reviews."</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn render_rating(rating: Rating) -> impl IntoView {
    let author = rating.user_name.unwrap_or_else(|| "Anonymous".to_owned());
    let posted = rating.created_at.as_deref().map(format_posted).unwrap_or_default();
    view! {
        <li class="ratings__item">
            <div class="ratings__header">
                <span class="ratings__stars" aria-label=format!("{} out of 5", rating.rating)>
                    {stars(rating.rating)}
                </span>
                <span class="ratings__author">{author}</span>
                <span class="ratings__date">{posted}</span>
            </div>
            {rating.comment.map(|c| view! { <p class="ratings__comment">{c}</p> })}
        </li>
    }
}
