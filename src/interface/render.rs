use crate::models::{Menu, OrderDraft, PlacedOrder, PriceBreakdown};
use crate::pricing::constants::{MAX_DISHES, SPECIAL_DISH_SURCHARGE};

/// Display the menu with selection markers.
pub fn display_menu(menu: &Menu, draft: &OrderDraft) {
    if menu.is_empty() {
        println!("No menu available for today.");
        return;
    }

    println!();
    println!("=== {} Menu ===", menu.meal_type.serving_window());
    println!();

    let max_name_len = name_column_width(menu);

    for (i, dish) in menu.dishes.iter().enumerate() {
        let marker = if draft.is_selected(&dish.name) { "[x]" } else { "[ ]" };
        let special = if dish.is_special {
            format!("  Special +Rs.{}", SPECIAL_DISH_SURCHARGE)
        } else {
            String::new()
        };
        println!(
            "{:>3}. {} {:<width$}{}",
            i + 1,
            marker,
            dish.name,
            special,
            width = max_name_len
        );
    }

    println!();
    println!(
        "Sabjis selected: {}/{}",
        draft.selected_dishes().len(),
        MAX_DISHES
    );
    println!();
}

/// Widest dish name in characters, as `{:<width$}` pads by characters.
fn name_column_width(menu: &Menu) -> usize {
    menu.dishes
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(10)
}

fn thali_label(quantity: u32) -> String {
    format!("{} Thali{}", quantity, if quantity > 1 { "s" } else { "" })
}

/// Display the order contents and delivery details.
pub fn display_order_summary(draft: &OrderDraft) {
    println!();
    println!("=== Your Order ===");
    println!();

    let names = draft.dish_names();
    if names.is_empty() {
        println!("Sabjis:    (none selected)");
    } else {
        println!("Sabjis:    {}", names.join(", "));
    }
    println!("Base:      {}", draft.base().label());
    if draft.extra_units() > 0 {
        println!("Extra rotis: {}", draft.extra_units());
    }
    println!("Quantity:  {}", thali_label(draft.quantity()));

    if let Some(address) = draft.delivery_address() {
        println!();
        println!("Deliver to:");
        for line in address.display_lines() {
            println!("  {}", line);
        }
    }
    if !draft.special_instructions().is_empty() {
        println!("Instructions: {}", draft.special_instructions());
    }
    println!();
}

/// Display a price breakdown. Discount and tax are rounded for display only.
pub fn display_price_breakdown(pricing: &PriceBreakdown) {
    println!("--- Price ---");
    println!("Price per thali: Rs.{}", pricing.per_unit_price);
    println!("Subtotal:        Rs.{}", pricing.subtotal);
    if pricing.discount > 0.0 {
        println!("Discount:       -Rs.{}", pricing.display_discount());
    }
    println!("Tax:             Rs.{}", pricing.display_tax());
    println!("Delivery:        Rs.{}", pricing.delivery_fee);
    println!("Total:           Rs.{}", pricing.total);
    println!();
}

/// Display placed orders, one line each.
pub fn display_orders(orders: &[PlacedOrder]) {
    if orders.is_empty() {
        println!("You have not placed any orders yet.");
        return;
    }

    println!();
    println!("=== My Orders ({}) ===", orders.len());
    println!();

    for order in orders {
        println!(
            "{}  {}  {:<8} {} | {} | Rs.{} ({})",
            order.order_id,
            order.placed_at.format("%Y-%m-%d %H:%M"),
            order.status,
            order.order.dish_names.join(" + "),
            thali_label(order.order.quantity),
            order.order.total_price,
            order.payment_method.as_str()
        );
    }

    println!();
}
