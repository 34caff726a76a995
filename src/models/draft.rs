use serde::{Deserialize, Serialize};

use crate::models::{Base, DeliveryAddress, DishSelection};
use crate::pricing::constants::{MIN_QUANTITY, MIN_STEP};

/// In-progress order configuration for one customer session.
///
/// Fields are only mutated through [`crate::state::OrderBuilder`], which keeps
/// the selection and range invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// At most two dishes, unique by name, in selection order.
    #[serde(rename = "selectedSabjis")]
    pub(crate) selected_dishes: Vec<DishSelection>,

    #[serde(rename = "selectedBase")]
    pub(crate) base: Base,

    /// Extra rotis per thali, 0..=3.
    #[serde(rename = "extraRoti")]
    pub(crate) extra_units: u32,

    /// Thalis ordered, 1..=5.
    #[serde(rename = "quantity")]
    pub(crate) quantity: u32,

    #[serde(rename = "address")]
    pub(crate) delivery_address: Option<DeliveryAddress>,

    #[serde(rename = "specialInstructions")]
    pub(crate) special_instructions: String,

    /// Wizard position, 1..=3.
    #[serde(rename = "currentStep")]
    pub(crate) step: u32,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            selected_dishes: Vec::new(),
            base: Base::default(),
            extra_units: 0,
            quantity: MIN_QUANTITY,
            delivery_address: None,
            special_instructions: String::new(),
            step: MIN_STEP,
        }
    }
}

impl OrderDraft {
    pub fn selected_dishes(&self) -> &[DishSelection] {
        &self.selected_dishes
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn extra_units(&self) -> u32 {
        self.extra_units
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn delivery_address(&self) -> Option<&DeliveryAddress> {
        self.delivery_address.as_ref()
    }

    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Whether a dish with this exact name is selected.
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected_dishes.iter().any(|d| d.name == name)
    }

    /// True iff any selected dish is special.
    pub fn has_special_dish(&self) -> bool {
        self.selected_dishes.iter().any(|d| d.is_special)
    }

    pub fn dish_names(&self) -> Vec<String> {
        self.selected_dishes.iter().map(|d| d.name.clone()).collect()
    }
}
