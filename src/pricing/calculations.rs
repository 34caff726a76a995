use crate::models::{OrderDraft, PriceBreakdown};
use crate::pricing::constants::*;

/// Price of a single thali.
///
/// Base price, plus the special surcharge, plus extra rotis.
pub fn per_unit_price(has_special_dish: bool, extra_units: u32) -> u32 {
    let special = if has_special_dish {
        SPECIAL_DISH_SURCHARGE
    } else {
        0
    };
    BASE_THALI_PRICE + special + extra_units * EXTRA_ROTI_PRICE
}

/// Bulk discount on the subtotal: 5% from three thalis upward.
pub fn bulk_discount(subtotal: u32, quantity: u32) -> f64 {
    if quantity >= BULK_DISCOUNT_MIN_QUANTITY {
        subtotal as f64 * BULK_DISCOUNT_RATE
    } else {
        0.0
    }
}

/// Tax on the discounted subtotal.
pub fn tax_on(subtotal: u32, discount: f64) -> f64 {
    (subtotal as f64 - discount) * TAX_RATE
}

/// Round an amount to the nearest whole currency unit, halves up.
pub fn round_currency(amount: f64) -> u32 {
    amount.round().max(0.0) as u32
}

/// Compute the full price breakdown for a draft.
///
/// Pure: no side effects, same draft gives the same breakdown. Intermediate
/// discount and tax keep their fractions; only the total is rounded.
pub fn compute_price_breakdown(draft: &OrderDraft) -> PriceBreakdown {
    let has_special_dish = draft.has_special_dish();
    let per_unit = per_unit_price(has_special_dish, draft.extra_units());
    let subtotal = per_unit * draft.quantity();
    let discount = bulk_discount(subtotal, draft.quantity());
    let tax = tax_on(subtotal, discount);
    let delivery_fee = DELIVERY_FEE;

    let total = round_currency(subtotal as f64 - discount + tax + delivery_fee as f64);

    PriceBreakdown {
        per_unit_price: per_unit,
        subtotal,
        discount,
        tax,
        delivery_fee,
        total,
        has_special_dish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DishSelection;

    fn draft_with(dishes: &[(&str, bool)], extra_units: u32, quantity: u32) -> OrderDraft {
        let mut draft = OrderDraft::default();
        draft.selected_dishes = dishes
            .iter()
            .map(|(name, special)| DishSelection::new(*name, *special))
            .collect();
        draft.extra_units = extra_units;
        draft.quantity = quantity;
        draft
    }

    #[test]
    fn test_per_unit_price() {
        assert_eq!(per_unit_price(false, 0), 120);
        assert_eq!(per_unit_price(true, 0), 140);
        assert_eq!(per_unit_price(true, 3), 155);
    }

    #[test]
    fn test_bulk_discount_threshold() {
        assert_eq!(bulk_discount(240, 2), 0.0);
        assert!((bulk_discount(360, 3) - 18.0).abs() < 1e-9);
        assert!((bulk_discount(600, 5) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_currency_halves_up() {
        assert_eq!(round_currency(177.5), 178);
        assert_eq!(round_currency(379.1), 379);
        assert_eq!(round_currency(146.0), 146);
    }

    #[test]
    fn test_plain_single_thali() {
        let draft = draft_with(&[("Dal", false), ("Aloo Gobi", false)], 0, 1);
        let pricing = compute_price_breakdown(&draft);
        assert_eq!(pricing.per_unit_price, 120);
        assert_eq!(pricing.subtotal, 120);
        assert_eq!(pricing.discount, 0.0);
        assert!((pricing.tax - 6.0).abs() < 1e-9);
        assert_eq!(pricing.delivery_fee, 20);
        assert_eq!(pricing.total, 146);
        assert!(!pricing.has_special_dish);
    }

    #[test]
    fn test_max_everything() {
        // (155 * 5 = 775) - 38.75 = 736.25, + 36.8125 tax + 20 = 793.06
        let draft = draft_with(&[("Paneer", true), ("Dal", false)], 3, 5);
        let pricing = compute_price_breakdown(&draft);
        assert_eq!(pricing.per_unit_price, 155);
        assert_eq!(pricing.subtotal, 775);
        assert!((pricing.discount - 38.75).abs() < 1e-9);
        assert_eq!(pricing.total, 793);
    }

    #[test]
    fn test_empty_draft_still_prices_base() {
        let pricing = compute_price_breakdown(&OrderDraft::default());
        assert_eq!(pricing.per_unit_price, BASE_THALI_PRICE);
        assert_eq!(pricing.total, 146);
    }
}
