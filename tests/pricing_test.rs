use assert_float_eq::*;

use thali_order_rs::models::{Base, DishSelection};
use thali_order_rs::pricing::{DELIVERY_FEE, compute_price_breakdown};
use thali_order_rs::state::{MemoryDraftStore, OrderBuilder};

fn builder_with(dishes: &[(&str, bool)]) -> OrderBuilder<MemoryDraftStore> {
    let mut builder = OrderBuilder::load(MemoryDraftStore::new());
    for (name, special) in dishes {
        builder.select_dish(&DishSelection::new(*name, *special));
    }
    builder
}

#[test]
fn test_plain_thali_for_one() {
    let mut builder = builder_with(&[("Aloo Gobi", false), ("Dal Tadka", false)]);
    builder.select_base(Base::Roti);
    builder.set_extra_units(0);
    builder.set_quantity(1);

    let pricing = builder.price_breakdown();
    assert_eq!(pricing.per_unit_price, 120);
    assert_eq!(pricing.subtotal, 120);
    assert_float_absolute_eq!(pricing.discount, 0.0, 1e-9);
    assert_float_absolute_eq!(pricing.tax, 6.0, 1e-9);
    assert_eq!(pricing.delivery_fee, DELIVERY_FEE);
    assert_eq!(pricing.total, 146);
}

#[test]
fn test_special_dish_with_extra_rotis() {
    let mut builder = builder_with(&[("Paneer Butter Masala", true), ("Dal Tadka", false)]);
    builder.set_extra_units(2);
    builder.set_quantity(1);

    let pricing = builder.price_breakdown();
    assert!(pricing.has_special_dish);
    assert_eq!(pricing.per_unit_price, 150);
    assert_eq!(pricing.subtotal, 150);
    assert_float_absolute_eq!(pricing.discount, 0.0, 1e-9);
    assert_float_absolute_eq!(pricing.tax, 7.5, 1e-9);
    assert_eq!(pricing.total, 178);
}

#[test]
fn test_bulk_discount_from_three_thalis() {
    let mut builder = builder_with(&[("Aloo Gobi", false), ("Dal Tadka", false)]);
    builder.set_quantity(3);

    let pricing = builder.price_breakdown();
    assert_eq!(pricing.subtotal, 360);
    assert_float_absolute_eq!(pricing.discount, 18.0, 1e-9);
    assert_float_absolute_eq!(pricing.tax, 17.1, 1e-9);
    assert_eq!(pricing.total, 379);
}

#[test]
fn test_no_discount_below_three() {
    let mut builder = builder_with(&[("Aloo Gobi", false), ("Dal Tadka", false)]);
    builder.set_quantity(2);

    let pricing = builder.price_breakdown();
    assert_eq!(pricing.subtotal, 240);
    assert_float_absolute_eq!(pricing.discount, 0.0, 1e-9);
    assert_float_absolute_eq!(pricing.tax, 12.0, 1e-9);
    assert_eq!(pricing.total, 272);
}

#[test]
fn test_base_does_not_change_price() {
    let mut builder = builder_with(&[("Aloo Gobi", false), ("Dal Tadka", false)]);
    let roti = builder.price_breakdown();
    builder.select_base(Base::Rice);
    assert_eq!(builder.price_breakdown(), roti);
}

#[test]
fn test_breakdown_is_idempotent() {
    let mut builder = builder_with(&[("Paneer", true), ("Bhindi", false)]);
    builder.set_quantity(4);
    builder.set_extra_units(1);

    let first = builder.price_breakdown();
    let second = builder.price_breakdown();
    assert_eq!(first, second);
    assert_eq!(compute_price_breakdown(builder.draft()), first);
}

#[test]
fn test_finalized_order_carries_breakdown() {
    let mut builder = builder_with(&[("Paneer", true), ("Bhindi", false)]);
    builder.set_quantity(3);
    builder.set_address(Some(Default::default()));

    let order = builder.build_finalized_order().unwrap();
    assert_eq!(order.dish_names, vec!["Paneer".to_string(), "Bhindi".to_string()]);
    assert!(order.is_special);
    assert_eq!(order.total_price, order.pricing.total);
    assert_eq!(order.pricing, builder.price_breakdown());

    let json = serde_json::to_value(&order).unwrap();
    assert_eq!(json["sabjisSelected"][0], "Paneer");
    assert_eq!(json["totalPrice"], order.total_price);
    assert_eq!(json["pricing"]["perThaliPrice"], 140);
}
