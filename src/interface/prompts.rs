use dialoguer::{Confirm, Input, Select};

use crate::error::{OrderError, Result};
use crate::models::{Base, DeliveryAddress, DishSelection, Menu, PaymentMethod};
use crate::pricing::constants::{
    EXTRA_ROTI_PRICE, MAX_EXTRA_UNITS, MAX_QUANTITY, MIN_EXTRA_UNITS, MIN_QUANTITY,
};
use crate::services::match_dishes;

/// Prompt for a dish name with fuzzy matching. `None` when the customer is
/// done choosing.
pub fn prompt_dish(menu: &Menu) -> Result<Option<DishSelection>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Toggle a sabji by name (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let candidates = match_dishes(menu, input);

        if candidates.is_empty() {
            println!("No sabji on today's menu matches '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let dish = candidates[0];
            if dish.key() == input.to_lowercase() {
                return Ok(Some(dish.clone()));
            }
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", dish.name))
                .default(true)
                .interact()?;
            if confirm {
                return Ok(Some(dish.clone()));
            }
            continue;
        }

        // Multiple matches - let the customer pick
        let options: Vec<String> = candidates.iter().take(5).map(|d| d.name.clone()).collect();
        let mut selection_options = options.clone();
        selection_options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&selection_options)
            .default(0)
            .interact()?;

        if selection < options.len() {
            return Ok(Some(candidates[selection].clone()));
        }
    }
}

/// Prompt for the thali base.
pub fn prompt_base(current: Base) -> Result<Base> {
    let options: Vec<String> = Base::ALL
        .iter()
        .map(|b| format!("{} - {}", b.label(), b.description()))
        .collect();
    let default = Base::ALL.iter().position(|b| *b == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Choose your base")
        .items(&options)
        .default(default)
        .interact()?;

    Ok(Base::ALL[selection])
}

/// Prompt for a whole number. Range enforcement is left to the builder.
fn prompt_count(prompt: &str, default: u32) -> Result<i64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| OrderError::InvalidInput(format!("'{}' is not a whole number", input)))
}

pub fn prompt_extra_units(current: u32) -> Result<i64> {
    prompt_count(
        &format!(
            "Extra rotis at Rs.{} each ({}-{})",
            EXTRA_ROTI_PRICE, MIN_EXTRA_UNITS, MAX_EXTRA_UNITS
        ),
        current,
    )
}

pub fn prompt_quantity(current: u32) -> Result<i64> {
    prompt_count(
        &format!("How many thalis? ({}-{})", MIN_QUANTITY, MAX_QUANTITY),
        current,
    )
}

fn prompt_field(prompt: &str, current: &str, optional: bool) -> Result<String> {
    let mut input = Input::<String>::new();
    input = input.with_prompt(prompt).allow_empty(optional);
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?.trim().to_string())
}

/// Prompt for a delivery address, pre-filled from `current`.
pub fn prompt_address(current: Option<&DeliveryAddress>) -> Result<DeliveryAddress> {
    let current = current.cloned().unwrap_or_default();
    Ok(DeliveryAddress {
        full_name: prompt_field("Full name", &current.full_name, false)?,
        phone: prompt_field("Phone number (10 digits)", &current.phone, false)?,
        street: prompt_field("Street address", &current.street, false)?,
        apartment: prompt_field("Apartment / building (optional)", &current.apartment, true)?,
        landmark: prompt_field("Landmark (optional)", &current.landmark, true)?,
        city: prompt_field("City", &current.city, false)?,
        pincode: prompt_field("Pincode (6 digits)", &current.pincode, false)?,
    })
}

pub fn prompt_special_instructions(current: &str) -> Result<String> {
    prompt_field(
        "Special instructions (e.g. extra spicy, less oil, gate code)",
        current,
        true,
    )
}

pub fn prompt_payment_method() -> Result<PaymentMethod> {
    let options: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
    let selection = Select::new()
        .with_prompt("Select payment method")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(PaymentMethod::ALL[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
