//! Quantity picker and confirmation for buying a listing.
//!
//! DESIGN
//! ======
//! The dialog only checks what the client can know (stock, balance); the
//! server remains the authority and its rejection message is shown by the
//! caller.

#[cfg(test)]
#[path = "purchase_dialog_test.rs"]
mod purchase_dialog_test;

use leptos::prelude::*;

use crate::util::listing_view::format_price;

/// Parse a quantity field, clamped to `1..=stock` (at least 1).
pub fn parse_quantity(raw: &str, stock: u32) -> u32 {
    let max = stock.max(1);
    raw.trim().parse::<u32>().unwrap_or(1).clamp(1, max)
}

pub fn purchase_total(price: f64, quantity: u32) -> f64 {
    price * f64::from(quantity)
}

/// Total cost if the purchase can go ahead, else the reason it cannot.
///
/// # Errors
///
/// Returns a user-facing message when the item is out of stock or the total
/// exceeds a known `balance`.
pub fn validate_purchase(price: f64, quantity: u32, stock: u32, balance: Option<f64>) -> Result<f64, &'static str> {
    if stock == 0 {
        return Err("Out of stock");
    }
    if quantity == 0 || quantity > stock {
        return Err("Invalid quantity");
    }
    let total = purchase_total(price, quantity);
    if balance.is_some_and(|b| total > b) {
        return Err("Insufficient balance");
    }
    Ok(total)
}

/// Modal asking how many units to buy. Confirm runs `on_confirm(quantity)`.
#[component]
pub fn PurchaseDialog(
    open: RwSignal<bool>,
    busy: RwSignal<bool>,
    title: String,
    price: f64,
    stock: u32,
    #[prop(into)] balance: Signal<Option<f64>>,
    on_confirm: Callback<u32>,
) -> impl IntoView {
    let quantity = RwSignal::new(1_u32);
    let check = move || validate_purchase(price, quantity.get(), stock, balance.get());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || check().is_err() {
            return;
        }
        on_confirm.run(quantity.get());
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| open.set(false)></div>
            <form class="dialog purchase-dialog" on:submit=on_submit>
                <h2 class="dialog__title">"Confirm Purchase"</h2>
                <p class="dialog__subtitle">{title.clone()}</p>
                <label class="dialog__field">
                    "Quantity"
                    <input
                        class="dialog__input"
                        type="number"
                        min="1"
                        max=stock.max(1).to_string()
                        prop:value=move || quantity.get().to_string()
                        on:input=move |ev| quantity.set(parse_quantity(&event_target_value(&ev), stock))
                    />
                </label>
                <p class="purchase-dialog__line">
                    "Unit price: " {format_price(price)}
                </p>
                <p class="purchase-dialog__line purchase-dialog__total">
                    "Total: " {move || format_price(purchase_total(price, quantity.get()))}
                </p>
                <p class="purchase-dialog__line">
                    "Your balance: "
                    {move || balance.get().map_or_else(|| "unknown".to_owned(), |b| format!("${b:.2}"))}
                </p>
                <Show when=move || check().is_err()>
                    <p class="dialog__error">{move || check().err().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="button button--ghost" type="button" on:click=move |_| open.set(false)>
                        "Cancel"
                    </button>
                    <button class="button" type="submit" disabled=move || busy.get() || check().is_err()>
                        {move || if busy.get() { "Processing..." } else { "Confirm Purchase" }}
                    </button>
                </div>
            </form>
        </Show>
    }
}
